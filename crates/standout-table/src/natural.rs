//! Natural-order string comparison.
//!
//! Runs of ASCII digits compare by numeric value, everything else compares
//! character by character (case-sensitive, locale-independent). So `"a2"`
//! sorts before `"a10"`.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compares two strings in natural order.
///
/// ```rust
/// use standout_table::natural::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("a2", "a10"), Ordering::Less);
/// assert_eq!(natural_cmp("file10.txt", "file9.txt"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let ord = compare_digit_runs(&take_digits(&mut left), &take_digits(&mut right));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Numeric comparison of two digit runs of any length.
///
/// Equal magnitudes with different zero padding order the shorter run
/// first, so `"a1" < "a01"` keeps the comparison total.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut items: Vec<&str>) -> Vec<&str> {
        items.sort_by(|a, b| natural_cmp(a, b));
        items
    }

    #[test]
    fn test_numeric_runs() {
        assert_eq!(sorted(vec!["a10", "a2"]), vec!["a2", "a10"]);
        assert_eq!(
            sorted(vec!["img12", "img10", "img2", "img1"]),
            vec!["img1", "img2", "img10", "img12"]
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(natural_cmp("apple", "banana"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
        assert_eq!(natural_cmp("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(natural_cmp("B", "a"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("a007", "a7"), Ordering::Greater);
        assert_eq!(natural_cmp("a007", "a8"), Ordering::Less);
    }

    #[test]
    fn test_long_digit_runs() {
        assert_eq!(
            natural_cmp("v99999999999999999999", "v100000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_digits_before_letters() {
        assert_eq!(natural_cmp("1x", "x1"), Ordering::Less);
    }
}
