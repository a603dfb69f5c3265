//! Standout Table - box-drawn terminal tables with typed columns.
//!
//! A [`Table`] holds an ordered set of typed columns and a list of rows. On
//! display it filters, sorts, and measures the rows, fits the result to the
//! terminal, and draws it with box-drawing characters:
//!
//! - Typed columns (string, integer, float) with natural-order string sorting
//! - At most one sorted column, marked with an underlined `▼`/`▲` header
//! - Filters combined with AND: comparison clauses or arbitrary predicates
//! - Width fitting that shrinks string columns (widest first, never below the
//!   header) and truncates overflowing cells with `…`
//! - ANSI-aware, Unicode-aware width measurement (CJK counts as 2 columns)
//!
//! # Quick Start
//!
//! ```rust
//! use standout_table::{ColumnFlags, ColumnType, Filter, FixedWidth, SortDirection, Table};
//!
//! let mut table = Table::new().with_terminal(FixedWidth(80));
//! table
//!     .add_column("id", "id", ColumnType::Integer, Some(SortDirection::Ascending), ColumnFlags::SORTABLE)
//!     .add_column("name", "name", ColumnType::String, None, ColumnFlags::SORTABLE)
//!     .add_data([("id", "2"), ("name", "bob")])
//!     .add_data([("id", "1"), ("name", "al")])
//!     .add_data([("id", "3"), ("name", "carol")]);
//!
//! table.add_filter(Filter::new("id", "<", 3)?);
//! assert_eq!(table.count(), 2);
//!
//! let output = table.render();
//! let lines: Vec<&str> = output.lines().collect();
//! assert_eq!(lines[0], "┌──────┬──────┐");
//! assert_eq!(lines[3], "│    1 │ al   │");
//! assert_eq!(lines[4], "│    2 │ bob  │");
//! # Ok::<(), standout_table::TableError>(())
//! ```
//!
//! # Declarative Tables
//!
//! Column definitions can also come from YAML through [`TableSpec`]:
//!
//! ```rust
//! use standout_table::TableSpec;
//!
//! let spec = TableSpec::from_yaml(r#"
//! title: Files
//! columns:
//!   - { id: path, type: string, sort: asc }
//!   - { id: size, type: integer, flags: [align_right] }
//! "#)?;
//! let table = spec.build()?;
//! assert_eq!(table.sort_key(), Some("path"));
//! # Ok::<(), standout_table::TableError>(())
//! ```
//!
//! # Data
//!
//! Rows are [`Record`]s keyed by column id. Anything convertible to a
//! [`DataItem`] can be added: key/value arrays, records, JSON objects, or a
//! lone scalar (wrapped under the first column's id). A [`Cell::Pair`] sorts
//! and filters by its raw value but displays its formatted text.

mod column;
mod error;
mod filter;
pub mod metrics;
pub mod natural;
pub mod spec;
mod table;
pub mod terminal;
mod value;

// Re-export public API
pub use column::{
    Align, Column, ColumnFlags, ColumnType, SortDirection, SortState, ASCENDING_GLYPH,
    DESCENDING_GLYPH,
};
pub use error::{Result, TableError};
pub use filter::{Clause, Filter, Op};
pub use metrics::ELLIPSIS;
pub use spec::{ColumnSpec, TableSpec};
pub use table::{ColumnLayout, Layout, Table, TableFlags, NO_SORT};
pub use terminal::{FixedWidth, SystemTerminal, TerminalWidth};
pub use value::{Cell, DataItem, Record, Row, Value};
