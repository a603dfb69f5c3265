//! Declarative table definitions.
//!
//! A [`TableSpec`] describes a table's title, flags, and columns as data, so a
//! table layout can live in a config file:
//!
//! ```yaml
//! title: Users
//! flags: [hide_column_headers]
//! truncate: true
//! columns:
//!   - id: id
//!     name: ID
//!     type: integer
//!     sort: asc
//!   - id: name
//!     name: Name
//!     type: string
//!     flags: [sortable, align_right]
//! ```
//!
//! Type tags and flag names are case-insensitive. Everything except `columns`
//! is optional; a column's `name` defaults to its id and its type to `auto`.

use serde::{Deserialize, Serialize};

use crate::column::{ColumnFlags, ColumnType, SortDirection};
use crate::error::{Result, TableError};
use crate::table::{Table, TableFlags};
use crate::terminal::TerminalWidth;

fn default_true() -> bool {
    true
}

fn default_type() -> String {
    ColumnType::Auto.as_str().to_string()
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Table flag names, e.g. `hide_column_headers`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    /// Whether string columns may be shrunk to fit the terminal.
    #[serde(default = "default_true")]
    pub truncate: bool,
    pub columns: Vec<ColumnSpec>,
}

/// One column of a [`TableSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub id: String,
    /// Header text. Defaults to the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Column type tag: `auto`, `string`, `integer` or `float`.
    #[serde(rename = "type", default = "default_type")]
    pub column_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
    /// Column flag names, e.g. `sortable` or `hidden`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

impl TableSpec {
    /// Parses a spec from YAML (or JSON, which YAML accepts).
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Builds an empty table with this spec's columns and settings.
    pub fn build(&self) -> Result<Table> {
        let mut table = Table::new();
        self.apply(&mut table)?;
        Ok(table)
    }

    /// Like [`TableSpec::build`], sized against the given terminal.
    pub fn build_with_terminal(&self, terminal: impl TerminalWidth + 'static) -> Result<Table> {
        let mut table = Table::new().with_terminal(terminal);
        self.apply(&mut table)?;
        Ok(table)
    }

    fn apply(&self, table: &mut Table) -> Result<()> {
        let flags = parse_flags::<TableFlags>(&self.flags)?;
        table
            .set_flag(flags)
            .set_allow_truncate_string_columns(self.truncate);
        if let Some(title) = &self.title {
            table.set_title(title.as_str());
        }

        for column in &self.columns {
            let column_type: ColumnType = column.column_type.parse()?;
            let flags = parse_flags::<ColumnFlags>(&column.flags)?;
            let name = column.name.as_deref().unwrap_or(&column.id);
            table.add_column(column.id.as_str(), name, column_type, column.sort, flags);
        }
        Ok(())
    }
}

fn parse_flags<F: bitflags::Flags>(names: &[String]) -> Result<F> {
    names.iter().try_fold(F::empty(), |acc, name| {
        F::from_name(&name.trim().to_ascii_uppercase())
            .map(|flag| acc.union(flag))
            .ok_or_else(|| TableError::UnknownFlag(name.clone()))
    })
}
