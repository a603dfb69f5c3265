//! The table: columns, rows, filters, sort, and the display pipeline.
//!
//! Each render runs the same fixed sequence over a fresh working copy of the
//! data, so filtering and sorting never touch the rows as supplied:
//!
//! 1. filter: narrow the rows with every filter in order (AND)
//! 2. sort: stable sort by the sort column, if one is set
//! 3. header widths: rendered header width of each visible column
//! 4. data widths: widest cell of each visible column
//! 5. adjust: shrink string columns when the table overflows the terminal
//! 6. draw: emit the box-drawn table
//!
//! # Example
//!
//! ```rust
//! use standout_table::{ColumnFlags, ColumnType, FixedWidth, SortDirection, Table};
//!
//! let mut table = Table::new().with_terminal(FixedWidth(80));
//! table
//!     .add_column("id", "ID", ColumnType::Integer, None, ColumnFlags::SORTABLE)
//!     .add_column("name", "Name", ColumnType::String, None, ColumnFlags::SORTABLE)
//!     .add_data([("id", "2"), ("name", "bob")])
//!     .add_data([("id", "1"), ("name", "al")]);
//!
//! table.sort_column("id", SortDirection::Ascending).unwrap();
//! let output = table.render();
//! assert!(output.find("al").unwrap() < output.find("bob").unwrap());
//! ```

mod layout;
mod render;

use std::io::{self, Write};
use std::ops::Index;

use bitflags::bitflags;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnFlags, ColumnType, SortDirection, SortState};
use crate::error::{Result, TableError};
use crate::filter::Filter;
use crate::metrics::visible_length;
use crate::terminal::{SystemTerminal, TerminalWidth};
use crate::value::{DataItem, Record, Row, Value};

pub use layout::{ColumnLayout, Layout};

/// Column id that clears sorting when passed to [`Table::sort_column`].
pub const NO_SORT: &str = "none";

/// Key used for wrapped scalars when the table has no columns yet.
const FALLBACK_KEY: &str = "0";

bitflags! {
    /// Table-wide behaviour switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TableFlags: u8 {
        const HIDE_COLUMN_HEADERS = 1 << 0;
    }
}

/// A terminal table.
///
/// Not meant to be shared across threads while rendering: a render rewrites
/// the working rows and the cached layout.
#[derive(Debug)]
pub struct Table {
    columns: Vec<(String, Column)>,
    data_original: Vec<Row>,
    data: Vec<Row>,
    filters: Vec<Filter>,
    sort_key: Option<String>,
    sort_direction: SortDirection,
    flags: TableFlags,
    title: Option<String>,
    allow_truncate_string_columns: bool,
    layout: Layout,
    terminal: Box<dyn TerminalWidth>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Creates an empty table sized against the system terminal.
    pub fn new() -> Self {
        Table {
            columns: Vec::new(),
            data_original: Vec::new(),
            data: Vec::new(),
            filters: Vec::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            flags: TableFlags::empty(),
            title: None,
            allow_truncate_string_columns: true,
            layout: Layout::default(),
            terminal: Box::new(SystemTerminal),
        }
    }

    /// Replaces the terminal width source.
    pub fn with_terminal(mut self, terminal: impl TerminalWidth + 'static) -> Self {
        self.terminal = Box::new(terminal);
        self
    }

    pub fn set_terminal(&mut self, terminal: impl TerminalWidth + 'static) -> &mut Self {
        self.terminal = Box::new(terminal);
        self
    }

    // --- Configuration ---

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn clear_title(&mut self) -> &mut Self {
        self.title = None;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_flag(&mut self, flag: TableFlags) -> &mut Self {
        self.flags.insert(flag);
        self
    }

    pub fn clear_flag(&mut self, flag: TableFlags) -> &mut Self {
        self.flags.remove(flag);
        self
    }

    pub fn has_flag(&self, flag: TableFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Allows or forbids shrinking string columns (and truncating their cells)
    /// to fit the terminal. Allowed by default.
    pub fn set_allow_truncate_string_columns(&mut self, allow: bool) -> &mut Self {
        self.allow_truncate_string_columns = allow;
        self
    }

    pub fn allows_truncate_string_columns(&self) -> bool {
        self.allow_truncate_string_columns
    }

    // --- Columns and sorting ---

    /// Adds a column, or replaces the column already registered under `id`.
    ///
    /// Columns display in the order they were first added. A `sort` request
    /// makes this the table's only sorted column.
    pub fn add_column(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        column_type: ColumnType,
        sort: Option<SortDirection>,
        flags: ColumnFlags,
    ) -> &mut Self {
        let id = id.into();
        let mut column = Column::new(name, column_type).with_flags(flags);

        match sort {
            Some(direction) => {
                for (_, existing) in &mut self.columns {
                    existing.set_sorted(SortState::Unsorted);
                }
                column.set_sorted(direction.into());
                self.sort_key = Some(id.clone());
                self.sort_direction = direction;
            }
            None if self.sort_key.as_deref() == Some(id.as_str()) => {
                column.set_sorted(self.sort_direction.into());
            }
            None => {}
        }

        match self.columns.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => *slot = column,
            None => self.columns.push((id, column)),
        }
        self
    }

    /// The column registered under `id`.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, column)| column)
    }

    /// Mutable access to a column, for flag changes.
    ///
    /// Use [`Table::sort_column`] to change sorting.
    pub fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|(key, _)| key == id)
            .map(|(_, column)| column)
    }

    /// All columns in display order, hidden ones included.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(id, column)| (id.as_str(), column))
    }

    fn visible_columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns().filter(|(_, column)| column.is_visible())
    }

    /// Sorts by the column `id`, clearing every other column's sort state.
    ///
    /// Passing [`NO_SORT`] clears sorting entirely.
    pub fn sort_column(&mut self, id: &str, direction: SortDirection) -> Result<&mut Self> {
        if id == NO_SORT {
            return Ok(self.clear_sort());
        }
        if self.column(id).is_none() {
            return Err(TableError::UnknownColumn(id.to_string()));
        }

        for (key, column) in &mut self.columns {
            let state = if key == id {
                direction.into()
            } else {
                SortState::Unsorted
            };
            column.set_sorted(state);
        }
        self.sort_key = Some(id.to_string());
        self.sort_direction = direction;
        Ok(self)
    }

    /// Clears the sort key and every column's sort indicator.
    pub fn clear_sort(&mut self) -> &mut Self {
        for (_, column) in &mut self.columns {
            column.set_sorted(SortState::Unsorted);
        }
        self.sort_key = None;
        self
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    // --- Data ---

    /// Replaces all rows.
    pub fn set_data<I>(&mut self, rows: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<DataItem>,
    {
        let rows: Vec<Row> = rows.into_iter().map(|item| self.wrap(item.into())).collect();
        self.data = rows.clone();
        self.data_original = rows;
        self
    }

    /// Appends one row.
    ///
    /// A lone value becomes a one-cell row under the first column's id.
    pub fn add_data(&mut self, item: impl Into<DataItem>) -> &mut Self {
        let row = self.wrap(item.into());
        self.data.push(row.clone());
        self.data_original.push(row);
        self
    }

    /// Appends a separator row.
    pub fn add_separator(&mut self) -> &mut Self {
        self.add_data(Row::Separator)
    }

    fn wrap(&self, item: DataItem) -> Row {
        match item {
            DataItem::Row(row) => row,
            DataItem::Scalar(cell) => {
                let key = self
                    .columns
                    .first()
                    .map_or(FALLBACK_KEY, |(id, _)| id.as_str());
                Row::Record(Record::new().with(key, cell))
            }
        }
    }

    /// The first row, as supplied, whose `key` cell loosely equals `value`.
    pub fn get_row_with(&self, key: &str, value: impl Into<Value>) -> Option<&Row> {
        let value = value.into();
        self.data_original
            .iter()
            .find(|row| row.get(key).is_some_and(|cell| cell.raw().loose_eq(&value)))
    }

    // --- Filters ---

    pub fn add_filter(&mut self, filter: impl Into<Filter>) -> &mut Self {
        self.filters.push(filter.into());
        self
    }

    /// Swaps the filter at `index`, returning the old one.
    pub fn replace_filter(&mut self, index: usize, filter: impl Into<Filter>) -> Result<Filter> {
        let len = self.filters.len();
        let slot = self
            .filters
            .get_mut(index)
            .ok_or(TableError::FilterIndex { index, len })?;
        Ok(std::mem::replace(slot, filter.into()))
    }

    /// Removes and returns the filter at `index`.
    pub fn remove_filter(&mut self, index: usize) -> Result<Filter> {
        let len = self.filters.len();
        if index >= len {
            return Err(TableError::FilterIndex { index, len });
        }
        Ok(self.filters.remove(index))
    }

    pub fn clear_filters(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    pub fn set_filters(&mut self, filters: impl IntoIterator<Item = Filter>) -> &mut Self {
        self.filters = filters.into_iter().collect();
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    // --- Reading ---

    /// Number of data rows passing every filter. Separators are not counted.
    ///
    /// Refreshes the working rows (filtered, unsorted).
    pub fn count(&mut self) -> usize {
        self.apply_filters();
        self.data.iter().filter(|row| !row.is_separator()).count()
    }

    /// Working rows as of the last render or count, in display order.
    pub fn rows(&self) -> std::slice::Iter<'_, Row> {
        self.data.iter()
    }

    /// Working row at `index`.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.data.get(index)
    }

    /// Number of working rows, separators included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column widths from the last render.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    // --- Display pipeline ---

    /// Runs the display pipeline and returns the table as text.
    pub fn render(&mut self) -> String {
        self.apply_filters();
        self.apply_sort();
        self.calculate_column_widths();
        if !self.calculate_data_widths()
            && self.allow_truncate_string_columns
            && self.layout.has_shrinkable()
        {
            self.adjust_column_widths();
        }
        self.layout
            .expand_for_title(self.allow_truncate_string_columns);
        render::draw(self)
    }

    /// Renders the table into `out`, followed by a newline.
    pub fn write_to<W: Write>(&mut self, out: &mut W) -> Result<&mut Self> {
        let rendered = self.render();
        if !rendered.is_empty() {
            writeln!(out, "{}", rendered)?;
        }
        Ok(self)
    }

    /// Renders the table to stdout.
    pub fn display(&mut self) -> Result<&mut Self> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)
    }

    fn apply_filters(&mut self) {
        let mut rows = self.data_original.clone();
        for filter in &self.filters {
            rows.retain(|row| match row {
                Row::Record(record) => filter.matches(record),
                Row::Separator => true,
            });
            trace!("filter {:?} left {} rows", filter, rows.len());
        }
        debug!(
            "{} of {} rows pass {} filters",
            rows.len(),
            self.data_original.len(),
            self.filters.len()
        );
        self.data = rows;
    }

    fn apply_sort(&mut self) {
        let Some(key) = self.sort_key.clone() else {
            return;
        };
        let Some(column_type) = self.column(&key).map(Column::column_type) else {
            return;
        };
        let direction = self.sort_direction;
        debug!("sorting by '{}' ({:?}, {})", key, direction, column_type);

        self.data.retain(|row| !row.is_separator());
        // Vec::sort_by is stable: equal keys keep their filtered order.
        self.data.sort_by(|a, b| {
            column_type.compare_directed(a.value(&key), b.value(&key), direction)
        });
    }

    fn calculate_column_widths(&mut self) {
        let columns = self
            .visible_columns()
            .map(|(id, column)| {
                ColumnLayout::new(
                    id,
                    visible_length(&column.rendered_header()),
                    column.column_type() == ColumnType::String,
                )
            })
            .collect();
        self.layout = Layout {
            columns,
            terminal_width: self.terminal.columns(),
            title_width: layout::title_width(self.title.as_deref()),
        };
    }

    /// Fills in data widths. Returns whether the table already fits.
    fn calculate_data_widths(&mut self) -> bool {
        // Queried again; a resize since the header pass is best-effort.
        self.layout.terminal_width = self.terminal.columns();
        for column in &mut self.layout.columns {
            column.data_width = self
                .data
                .iter()
                .filter_map(|row| row.get(&column.id))
                .map(|cell| visible_length(&cell.display_text()))
                .max()
                .unwrap_or(0);
        }
        self.layout.fits()
    }

    fn adjust_column_widths(&mut self) {
        let reclaimed = self.layout.shrink();
        debug!(
            "reclaimed {} columns, table now {} wide",
            reclaimed,
            self.layout.table_width()
        );
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

impl Index<usize> for Table {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.data[index]
    }
}
