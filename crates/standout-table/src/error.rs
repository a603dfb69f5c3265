//! Error types for table construction and rendering.
//!
//! Only configuration mistakes are errors. Sparse or oddly shaped row data
//! degrades gracefully instead (missing cells render empty).

use thiserror::Error;

/// Errors that can occur when configuring or rendering a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A column type tag that does not name a known column type.
    #[error("no such column type: '{0}'")]
    NoSuchColumnType(String),

    /// A filter operator outside the supported set.
    #[error("unknown filter operator: '{0}'")]
    UnknownOperator(String),

    /// A column id that is not part of the table.
    #[error("no such column: '{0}'")]
    UnknownColumn(String),

    /// A flag name that does not match any column or table flag.
    #[error("unknown flag: '{0}'")]
    UnknownFlag(String),

    /// A filter position past the end of the filter list.
    #[error("filter index {index} out of range (table has {len} filters)")]
    FilterIndex { index: usize, len: usize },

    /// Malformed table spec.
    #[error("invalid table spec: {0}")]
    Spec(#[from] serde_yaml::Error),

    /// Failure writing rendered output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
