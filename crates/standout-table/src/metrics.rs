//! ANSI-aware text measurement, padding, and slicing.
//!
//! Escape sequences never count toward width. Both the 7-bit form
//! (`ESC [ params intermediates final`) and the single-byte C1 CSI are
//! recognized. Widths are terminal columns, so CJK characters count as 2.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::Align;

/// Marker appended to text cut short by [`truncate`].
pub const ELLIPSIS: char = '…';

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\x1b\[|\x{9b})[0-?]*[ -/]*[@-~]").expect("escape pattern is valid")
});

/// Removes all ANSI escape sequences from `s`.
///
/// Borrows when there is nothing to strip.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(s, "")
}

/// Returns the visible width of a string, ignoring ANSI escape codes.
///
/// ```rust
/// use standout_table::metrics::visible_length;
///
/// assert_eq!(visible_length("hello"), 5);
/// assert_eq!(visible_length("\x1b[4mid\x1b[0m"), 2);
/// ```
pub fn visible_length(s: &str) -> usize {
    strip_ansi(s).width()
}

/// Pads `s` with spaces up to `width` visible columns.
///
/// Text already at or beyond `width` is returned unchanged. `Align::Even`
/// puts the odd extra space on the right.
///
/// ```rust
/// use standout_table::{metrics::pad, Align};
///
/// assert_eq!(pad("42", 5, Align::Right), "   42");
/// assert_eq!(pad("hi", 5, Align::Even), " hi  ");
/// ```
pub fn pad(s: &str, width: usize, align: Align) -> String {
    let len = visible_length(s);
    if len >= width {
        return s.to_string();
    }

    let gap = width - len;
    let (left, right) = match align {
        Align::Left => (0, gap),
        Align::Right => (gap, 0),
        Align::Even => (gap / 2, gap - gap / 2),
    };

    let mut out = String::with_capacity(s.len() + gap);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

/// Takes `len` visible columns of `s`, starting `start` columns in.
///
/// Operates on the ANSI-stripped text. A wide character that would straddle
/// the end boundary is left out.
pub fn substring(s: &str, start: usize, len: usize) -> String {
    let plain = strip_ansi(s);
    let end = start.saturating_add(len);

    let mut out = String::new();
    let mut col = 0;
    for c in plain.chars() {
        let w = c.width().unwrap_or(0);
        if col < start {
            col += w;
            continue;
        }
        if col + w > end {
            break;
        }
        out.push(c);
        col += w;
    }
    out
}

/// Cuts `s` down to `width` visible columns, ending in [`ELLIPSIS`].
///
/// Text that already fits is returned unchanged (escape codes included).
///
/// ```rust
/// use standout_table::metrics::truncate;
///
/// assert_eq!(truncate("Hello World", 6), "Hello…");
/// assert_eq!(truncate("Hello", 10), "Hello");
/// ```
pub fn truncate(s: &str, width: usize) -> String {
    if visible_length(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = substring(s, 0, width - 1);
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_length_plain() {
        assert_eq!(visible_length(""), 0);
        assert_eq!(visible_length("hello"), 5);
    }

    #[test]
    fn test_visible_length_ignores_escapes() {
        assert_eq!(visible_length("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(visible_length("\x1b[1;4mab\x1b[0m"), 2);
        assert_eq!(visible_length("\u{9b}4mab\u{9b}0m"), 2);
    }

    #[test]
    fn test_visible_length_wide_chars() {
        assert_eq!(visible_length("日本"), 4);
    }

    #[test]
    fn test_strip_ansi_borrows_plain_text() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed(_)));
        assert_eq!(strip_ansi("\x1b[4mx\x1b[0m"), "x");
    }

    #[test]
    fn test_pad_alignments() {
        assert_eq!(pad("ab", 5, Align::Left), "ab   ");
        assert_eq!(pad("ab", 5, Align::Right), "   ab");
        assert_eq!(pad("ab", 5, Align::Even), " ab  ");
        assert_eq!(pad("ab", 6, Align::Even), "  ab  ");
    }

    #[test]
    fn test_pad_no_truncation() {
        assert_eq!(pad("hello", 3, Align::Left), "hello");
        assert_eq!(pad("hello", 5, Align::Right), "hello");
    }

    #[test]
    fn test_pad_counts_visible_width() {
        let styled = "\x1b[4mid\x1b[0m";
        let padded = pad(styled, 4, Align::Left);
        assert_eq!(visible_length(&padded), 4);
        assert!(padded.starts_with(styled));
    }

    #[test]
    fn test_substring() {
        assert_eq!(substring("hello world", 0, 5), "hello");
        assert_eq!(substring("hello world", 6, 5), "world");
        assert_eq!(substring("hello", 3, 10), "lo");
        assert_eq!(substring("hello", 10, 2), "");
    }

    #[test]
    fn test_substring_strips_escapes() {
        assert_eq!(substring("\x1b[31mhello\x1b[0m", 1, 3), "ell");
    }

    #[test]
    fn test_substring_wide_char_boundary() {
        assert_eq!(substring("日本語", 0, 3), "日");
        assert_eq!(substring("日本語", 0, 4), "日本");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("this-is-long", 5), "this…");
        assert_eq!(truncate("exact", 5), "exact");
        assert_eq!(truncate("abc", 1), "…");
        assert_eq!(truncate("abc", 0), "");
    }
}
