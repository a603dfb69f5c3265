//! Width calculation and adjustment for table columns.
//!
//! Every visible column has a header width (its rendered header, sort glyph
//! included) and a data width (its widest cell). A column is drawn at the
//! larger of the two plus one space of padding each side, and columns are
//! joined by single vertical bars:
//!
//! ```text
//! │ id │ name  │      width = (2+2) + (5+2) + 3 bars = 14
//! ```
//!
//! When the table is wider than the terminal, string columns give up data
//! width, widest first, but never below their header width.

use log::{debug, trace};

use crate::metrics::visible_length;

/// Cell padding on each side of a column.
const CELL_PADDING: usize = 1;

/// Widths for one visible column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Column id.
    pub id: String,
    /// Visible width of the rendered header.
    pub header_width: usize,
    /// Widest cell, after any shrinking.
    pub data_width: usize,
    /// Extra width granted so a wide title row lines up.
    pub padding: usize,
    /// Whether this column may be shrunk (visible string columns only).
    pub shrinkable: bool,
}

impl ColumnLayout {
    pub fn new(id: impl Into<String>, header_width: usize, shrinkable: bool) -> Self {
        ColumnLayout {
            id: id.into(),
            header_width,
            data_width: 0,
            padding: 0,
            shrinkable,
        }
    }

    /// Content width the column is drawn at, excluding cell padding.
    pub fn width(&self) -> usize {
        self.header_width.max(self.data_width) + self.padding
    }
}

/// Resolved widths for a whole table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    /// Visible columns in display order.
    pub columns: Vec<ColumnLayout>,
    /// Terminal width the layout was fitted against.
    pub terminal_width: usize,
    /// Width the title row needs (title plus borders and padding), 0 without a title.
    pub title_width: usize,
}

impl Layout {
    /// Total rendered width of the column block, borders included.
    pub fn table_width(&self) -> usize {
        if self.columns.is_empty() {
            return 0;
        }
        let cells: usize = self
            .columns
            .iter()
            .map(|c| c.width() + 2 * CELL_PADDING)
            .sum();
        cells + self.columns.len() + 1
    }

    /// Whether the table fits the terminal as is and the title does not
    /// force it wider.
    pub fn fits(&self) -> bool {
        let width = self.table_width();
        width < self.terminal_width && self.title_width <= width
    }

    /// Whether any column can give up width.
    pub fn has_shrinkable(&self) -> bool {
        self.columns.iter().any(|c| c.shrinkable)
    }

    /// Width the adjustment aims for.
    ///
    /// The terminal width when the table overflows it; otherwise the current
    /// width, or the title's width capped at the terminal if that is wider.
    pub fn target_width(&self) -> usize {
        let current = self.table_width();
        if current > self.terminal_width {
            self.terminal_width
        } else {
            current.max(self.title_width.min(self.terminal_width))
        }
    }

    /// Shrinks string columns, widest first, until the table reaches its
    /// target width or no column has room left above its header width.
    ///
    /// Returns the number of columns reclaimed.
    pub fn shrink(&mut self) -> usize {
        let current = self.table_width();
        let target = self.target_width();
        let mut excess = current.saturating_sub(target);
        debug!(
            "fitting table: width {} terminal {} target {} excess {}",
            current, self.terminal_width, target, excess
        );
        if excess == 0 {
            return 0;
        }

        let mut candidates: Vec<usize> = (0..self.columns.len())
            .filter(|&i| self.columns[i].shrinkable)
            .collect();
        // Stable, so equally wide columns shrink in display order.
        candidates.sort_by(|&a, &b| self.columns[b].data_width.cmp(&self.columns[a].data_width));

        let mut reclaimed = 0;
        for i in candidates {
            if excess == 0 {
                break;
            }
            let column = &mut self.columns[i];
            let room = column.data_width.saturating_sub(column.header_width);
            let cut = room.min(excess);
            if cut == 0 {
                continue;
            }
            trace!(
                "shrinking column '{}' from {} to {}",
                column.id,
                column.data_width,
                column.data_width - cut
            );
            column.data_width -= cut;
            excess -= cut;
            reclaimed += cut;
        }

        if excess > 0 {
            debug!("table still {} columns wider than its target", excess);
        }
        reclaimed
    }

    /// Widens the last column so the block is as wide as the title row.
    ///
    /// With `bounded`, the title's claim is capped at the terminal width (the
    /// title text is truncated instead); without, it widens the table fully.
    pub fn expand_for_title(&mut self, bounded: bool) {
        let current = self.table_width();
        let wanted = if bounded {
            self.title_width.min(self.terminal_width.max(current))
        } else {
            self.title_width
        };
        if wanted > current {
            if let Some(last) = self.columns.last_mut() {
                last.padding += wanted - current;
            }
        }
    }

    /// Content width available to the title text.
    pub fn title_text_width(&self) -> usize {
        self.table_width().saturating_sub(2 + 2 * CELL_PADDING)
    }

    /// Width of a column by id, if it is visible.
    pub fn width_of(&self, id: &str) -> Option<usize> {
        self.columns.iter().find(|c| c.id == id).map(ColumnLayout::width)
    }
}

/// Width a title row needs, borders and padding included. 0 without a title.
pub fn title_width(title: Option<&str>) -> usize {
    title.map_or(0, |t| visible_length(t) + 2 + 2 * CELL_PADDING)
}
