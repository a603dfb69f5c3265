//! Column model: type, flags, alignment, and sort state.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use console::Style;
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::natural::natural_cmp;
use crate::value::Value;

/// Glyph shown on a column sorted ascending.
pub const ASCENDING_GLYPH: char = '▼';
/// Glyph shown on a column sorted descending.
pub const DESCENDING_GLYPH: char = '▲';

/// Declared type of a column's values.
///
/// The type picks the default alignment and the sort comparator: natural
/// string order for text, numeric order for numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Resolved to `String` when the column is created.
    #[default]
    Auto,
    /// Free text. The only type whose column may be shrunk to fit.
    String,
    /// Whole numbers.
    Integer,
    /// Decimal numbers.
    Float,
}

impl ColumnType {
    /// Returns `true` for `Integer` and `Float`.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// The concrete type a column is built with.
    pub fn resolve(self) -> ColumnType {
        match self {
            ColumnType::Auto => ColumnType::String,
            other => other,
        }
    }

    /// Alignment used when no alignment flag is set.
    pub fn default_alignment(self) -> Align {
        if self.is_numeric() {
            Align::Right
        } else {
            Align::Left
        }
    }

    /// Compares two raw values the way a column of this type sorts them.
    ///
    /// Numeric columns put values that are not numbers after all numbers.
    pub fn compare(self, a: &Value, b: &Value) -> Ordering {
        if self.is_numeric() {
            match (a.as_f64().is_some(), b.as_f64().is_some()) {
                (true, true) => a.numeric_cmp(b).unwrap_or(Ordering::Equal),
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => Ordering::Equal,
            }
        } else {
            natural_cmp(&a.text(), &b.text())
        }
    }

    /// Like [`ColumnType::compare`], ordered for `direction`.
    ///
    /// Values that are not numbers stay last in both directions.
    pub fn compare_directed(self, a: &Value, b: &Value, direction: SortDirection) -> Ordering {
        if self.is_numeric() && (a.as_f64().is_none() || b.as_f64().is_none()) {
            return self.compare(a, b);
        }
        direction.apply(self.compare(a, b))
    }

    /// The type tag as written in specs.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Auto => "auto",
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
        }
    }
}

impl FromStr for ColumnType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColumnType::Auto),
            "string" => Ok(ColumnType::String),
            "integer" => Ok(ColumnType::Integer),
            "float" => Ok(ColumnType::Float),
            _ => Err(TableError::NoSuchColumnType(s.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Per-column behaviour switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ColumnFlags: u8 {
        const SORTABLE = 1 << 0;
        const HIDDEN = 1 << 1;
        const ALIGN_LEFT = 1 << 2;
        const ALIGN_RIGHT = 1 << 3;
        const ALIGN_EVEN = 1 << 4;
    }
}

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
    /// Pad on both sides, extra space on the right.
    Even,
}

/// Requested sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Largest first.
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sort state shown in a column header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl From<SortDirection> for SortState {
    fn from(dir: SortDirection) -> Self {
        match dir {
            SortDirection::Ascending => SortState::Ascending,
            SortDirection::Descending => SortState::Descending,
        }
    }
}

/// A column descriptor.
///
/// The column id is not stored here; the table keys columns by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    flags: ColumnFlags,
    sort_state: SortState,
}

impl Column {
    /// Creates a column of the given type. `Auto` becomes `String`.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            column_type: column_type.resolve(),
            flags: ColumnFlags::empty(),
            sort_state: SortState::Unsorted,
        }
    }

    /// Builder-style flag assignment.
    pub fn with_flags(mut self, flags: ColumnFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concrete column type.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn flags(&self) -> ColumnFlags {
        self.flags
    }

    pub fn has_flag(&self, flag: ColumnFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set_flag(&mut self, flag: ColumnFlags) {
        self.flags.insert(flag);
    }

    pub fn clear_flag(&mut self, flag: ColumnFlags) {
        self.flags.remove(flag);
    }

    pub fn is_visible(&self) -> bool {
        !self.has_flag(ColumnFlags::HIDDEN)
    }

    pub fn is_sortable(&self) -> bool {
        self.has_flag(ColumnFlags::SORTABLE)
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type.is_numeric()
    }

    /// Alignment for this column's cells.
    ///
    /// An explicit flag wins, checked Left, then Right, then Even.
    pub fn value_alignment(&self) -> Align {
        if self.has_flag(ColumnFlags::ALIGN_LEFT) {
            Align::Left
        } else if self.has_flag(ColumnFlags::ALIGN_RIGHT) {
            Align::Right
        } else if self.has_flag(ColumnFlags::ALIGN_EVEN) {
            Align::Even
        } else {
            self.column_type.default_alignment()
        }
    }

    pub fn sort_state(&self) -> SortState {
        self.sort_state
    }

    /// Sets the sort state. Keeping a single sorted column is up to the table.
    pub fn set_sorted(&mut self, state: SortState) {
        self.sort_state = state;
    }

    /// Header text, with the sort glyph and underline when sorted.
    ///
    /// Numeric columns put the glyph before the name, others after it.
    pub fn rendered_header(&self) -> String {
        let glyph = match self.sort_state {
            SortState::Unsorted => return self.name.clone(),
            SortState::Ascending => ASCENDING_GLYPH,
            SortState::Descending => DESCENDING_GLYPH,
        };
        let label = if self.is_numeric() {
            format!("{} {}", glyph, self.name)
        } else {
            format!("{} {}", self.name, glyph)
        };
        Style::new()
            .underlined()
            .force_styling(true)
            .apply_to(label)
            .to_string()
    }
}
