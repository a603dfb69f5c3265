//! Row data: scalar values, cells, records, and rows.
//!
//! A [`Cell`] is either a plain [`Value`] or a (raw, display) pair. Sorting and
//! filtering always look at the raw value, rendering at the display text, so a
//! byte count can sort numerically while showing `"1.2 KiB"`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// A scalar cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Missing or null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Text.
    Str(String),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the text, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Reads the value as a number.
    ///
    /// Strings that parse as finite numbers count, so `"42"` is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n).filter(|n| n.is_finite()),
            Value::Str(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Value::Null | Value::Bool(_) => None,
        }
    }

    /// Reads the value as an exact integer: an `Int`, or a string of one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Str(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Orders two values numerically, or `None` if either is not a number.
    ///
    /// Two integers compare exactly; anything else goes through `f64`.
    pub fn numeric_cmp(&self, other: &Value) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return Some(a.cmp(&b));
        }
        self.as_f64()?.partial_cmp(&other.as_f64()?)
    }

    /// The value as text. `Null` is the empty string.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Value::Str(s) => Cow::Borrowed(s),
            Value::Null => Cow::Borrowed(""),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Loose comparison: numeric when both sides read as numbers,
    /// otherwise by text.
    pub fn loose_cmp(&self, other: &Value) -> Ordering {
        self.numeric_cmp(other)
            .unwrap_or_else(|| self.text().cmp(&other.text()))
    }

    /// Loose equality, consistent with [`Value::loose_cmp`].
    ///
    /// `Int(1)`, `Float(1.0)` and `Str("1")` are all equal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        self.loose_cmp(other) == Ordering::Equal
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i64)
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Str(s),
            other => Value::Str(other.to_string()),
        }
    }
}

/// Content of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A value that is both compared and shown.
    Scalar(Value),
    /// A raw value for sorting and filtering, shown as `display`.
    Pair { raw: Value, display: String },
}

impl Cell {
    /// Creates a (raw, display) pair.
    pub fn pair(raw: impl Into<Value>, display: impl Into<String>) -> Self {
        Cell::Pair {
            raw: raw.into(),
            display: display.into(),
        }
    }

    /// The value used for sorting and filtering.
    pub fn raw(&self) -> &Value {
        match self {
            Cell::Scalar(v) => v,
            Cell::Pair { raw, .. } => raw,
        }
    }

    /// The text shown in the table.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Scalar(v) => v.text(),
            Cell::Pair { display, .. } => Cow::Borrowed(display),
        }
    }
}

impl From<Value> for Cell {
    fn from(v: Value) -> Self {
        Cell::Scalar(v)
    }
}

macro_rules! scalar_into {
    ($target:ident, $wrap:expr; $($t:ty),*) => {
        $(
            impl From<$t> for $target {
                fn from(v: $t) -> Self {
                    $wrap(Value::from(v))
                }
            }
        )*
    };
}

scalar_into!(Cell, Cell::Scalar;
    bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, &str, String, &String,
    serde_json::Value);

/// The cells of one data row, keyed by column id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: HashMap<String, Cell>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, id: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.insert(id, cell);
        self
    }

    /// Sets the cell for a column, returning the previous one.
    pub fn insert(&mut self, id: impl Into<String>, cell: impl Into<Cell>) -> Option<Cell> {
        self.cells.insert(id.into(), cell.into())
    }

    /// The cell for a column, if present.
    pub fn get(&self, id: &str) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// The raw value for a column, `Null` when the cell is missing.
    pub fn value(&self, id: &str) -> &Value {
        const MISSING: &Value = &Value::Null;
        self.cells.get(id).map_or(MISSING, Cell::raw)
    }

    /// Number of cells present.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is present.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over `(column id, cell)` in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Cell>, const N: usize> From<[(K, V); N]> for Record {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

/// One row of table data.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A data row.
    Record(Record),
    /// A structural divider drawn across the table.
    Separator,
}

impl Row {
    /// Returns `true` for a separator row.
    pub fn is_separator(&self) -> bool {
        matches!(self, Row::Separator)
    }

    /// The record, unless this is a separator.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Row::Record(r) => Some(r),
            Row::Separator => None,
        }
    }

    /// The cell for a column. Separators have none.
    pub fn get(&self, id: &str) -> Option<&Cell> {
        self.as_record().and_then(|r| r.get(id))
    }

    /// The raw value for a column, `Null` for missing cells and separators.
    pub fn value(&self, id: &str) -> &Value {
        const MISSING: &Value = &Value::Null;
        self.as_record().map_or(MISSING, |r| r.value(id))
    }
}

impl From<Record> for Row {
    fn from(r: Record) -> Self {
        Row::Record(r)
    }
}

impl<K: Into<String>, V: Into<Cell>, const N: usize> From<[(K, V); N]> for Row {
    fn from(pairs: [(K, V); N]) -> Self {
        Row::Record(pairs.into())
    }
}

/// Anything that can be handed to `Table::add_data`.
///
/// Scalars are wrapped into a one-cell row by the table.
#[derive(Debug, Clone, PartialEq)]
pub enum DataItem {
    /// A full row (or separator).
    Row(Row),
    /// A lone value to wrap.
    Scalar(Cell),
}

impl From<Row> for DataItem {
    fn from(r: Row) -> Self {
        DataItem::Row(r)
    }
}

impl From<Record> for DataItem {
    fn from(r: Record) -> Self {
        DataItem::Row(Row::Record(r))
    }
}

impl<K: Into<String>, V: Into<Cell>, const N: usize> From<[(K, V); N]> for DataItem {
    fn from(pairs: [(K, V); N]) -> Self {
        DataItem::Row(pairs.into())
    }
}

impl From<Cell> for DataItem {
    fn from(c: Cell) -> Self {
        DataItem::Scalar(c)
    }
}

scalar_into!(DataItem, |v| DataItem::Scalar(Cell::Scalar(v));
    Value, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, &str, String, &String);

impl From<serde_json::Value> for DataItem {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Object(map) => DataItem::Row(Row::Record(map.into())),
            other => DataItem::Scalar(Cell::Scalar(other.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_text() {
        assert_eq!(Value::Null.text(), "");
        assert_eq!(Value::Int(7).text(), "7");
        assert_eq!(Value::Float(2.5).text(), "2.5");
        assert_eq!(Value::Bool(true).text(), "true");
        assert_eq!(Value::from("x").text(), "x");
    }

    #[test]
    fn test_value_as_f64() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::from(" 4.5 ").as_f64(), Some(4.5));
        assert_eq!(Value::from("abc").as_f64(), None);
        assert_eq!(Value::from("NaN").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
        assert_eq!(Value::Float(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let big = 1i64 << 53;
        assert_eq!(
            Value::Int(big + 1).loose_cmp(&Value::Int(big)),
            Ordering::Greater
        );
        assert_eq!(
            Value::from((big + 1).to_string()).loose_cmp(&Value::Int(big)),
            Ordering::Greater
        );
        assert!(!Value::Int(big + 1).loose_eq(&Value::Int(big)));
        assert!(Value::Int(big).loose_eq(&Value::from(big.to_string())));
    }

    #[test]
    fn test_nan_is_not_equal_to_numbers() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.numeric_cmp(&Value::Int(1)), None);
        assert!(!nan.loose_eq(&Value::Int(1)));
        assert!(!nan.loose_eq(&Value::Float(2.5)));
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert!(Value::Int(1).loose_eq(&Value::from("1")));
        assert!(Value::from("bob").loose_eq(&Value::from("bob")));
        assert!(!Value::from("bob").loose_eq(&Value::from("Bob")));
        assert!(Value::Null.loose_eq(&Value::from("")));
    }

    #[test]
    fn test_loose_cmp_numeric_vs_text() {
        assert_eq!(Value::Int(9).loose_cmp(&Value::Int(10)), Ordering::Less);
        // Text comparison is lexicographic
        assert_eq!(
            Value::from("9a").loose_cmp(&Value::from("10a")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_value_from_json() {
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!([1, 2])), Value::Str("[1,2]".into()));
    }

    #[test]
    fn test_value_from_large_u64() {
        assert_eq!(Value::from(5u64), Value::Int(5));
        assert!(matches!(Value::from(u64::MAX), Value::Float(_)));
    }

    #[test]
    fn test_cell_pair() {
        let cell = Cell::pair(1024, "1 KiB");
        assert_eq!(cell.raw(), &Value::Int(1024));
        assert_eq!(cell.display_text(), "1 KiB");

        let scalar = Cell::from(12);
        assert_eq!(scalar.raw(), &Value::Int(12));
        assert_eq!(scalar.display_text(), "12");
    }

    #[test]
    fn test_record_lookup() {
        let record = Record::new().with("id", 1).with("name", "al");
        assert_eq!(record.len(), 2);
        assert_eq!(record.value("id"), &Value::Int(1));
        assert_eq!(record.value("missing"), &Value::Null);
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_row_from_pairs() {
        let row = Row::from([("id", 2), ("n", 3)]);
        assert_eq!(row.get("id").map(Cell::raw), Some(&Value::Int(2)));
        assert!(Row::Separator.get("id").is_none());
        assert!(Row::Separator.is_separator());
    }

    #[test]
    fn test_data_item_from_json() {
        match DataItem::from(json!({"id": 1, "name": "al"})) {
            DataItem::Row(Row::Record(r)) => assert_eq!(r.value("name"), &Value::from("al")),
            other => panic!("expected record, got {:?}", other),
        }
        assert_eq!(
            DataItem::from(json!("solo")),
            DataItem::Scalar(Cell::Scalar(Value::from("solo")))
        );
    }
}
