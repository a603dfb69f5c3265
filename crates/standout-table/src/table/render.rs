//! Glyph-level table assembly.
//!
//! Turns a laid-out [`Table`] into box-drawn text:
//!
//! ```text
//! ┌──────────────┐
//! │    Users     │
//! ├────┬─────────┤
//! │ id │ name    │
//! ├────┼─────────┤
//! │  1 │ al      │
//! └────┴─────────┘
//! ```

use crate::column::Align;
use crate::metrics::{pad, truncate, visible_length};
use crate::value::Row;

use super::layout::Layout;
use super::{Table, TableFlags};

/// Box-drawing characters used for borders.
struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    left_t: char,
    cross: char,
    right_t: char,
    top_t: char,
    bottom_t: char,
}

const LIGHT: BorderChars = BorderChars {
    horizontal: '─',
    vertical: '│',
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    left_t: '├',
    cross: '┼',
    right_t: '┤',
    top_t: '┬',
    bottom_t: '┴',
};

/// Type of horizontal line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineType {
    /// Top of the title box, no column joints.
    TitleTop,
    /// Top of the column block.
    Top,
    /// Top of the column block under a title row.
    TitleJoin,
    /// Between header and data, and for separator rows.
    Middle,
    Bottom,
}

/// Renders the table from its current layout and working rows.
pub(super) fn draw(table: &Table) -> String {
    let layout = &table.layout;
    if layout.columns.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(table.data.len() + 6);

    match table.title.as_deref() {
        Some(title) => {
            lines.push(horizontal_line(layout, LineType::TitleTop));
            lines.push(title_row(layout, title, table.allow_truncate_string_columns));
            lines.push(horizontal_line(layout, LineType::TitleJoin));
        }
        None => lines.push(horizontal_line(layout, LineType::Top)),
    }

    let columns: Vec<_> = layout
        .columns
        .iter()
        .filter_map(|c| table.column(&c.id).map(|col| (c, col)))
        .collect();

    if !table.has_flag(TableFlags::HIDE_COLUMN_HEADERS) {
        let cells = columns.iter().map(|(slot, col)| {
            let header = col.rendered_header();
            pad(&header, slot.width(), col.value_alignment())
        });
        lines.push(wrap_row(cells));
        lines.push(horizontal_line(layout, LineType::Middle));
    }

    for row in &table.data {
        match row {
            Row::Separator => lines.push(horizontal_line(layout, LineType::Middle)),
            Row::Record(record) => {
                let cells = columns.iter().map(|(slot, col)| {
                    let text = record
                        .get(&slot.id)
                        .map(|cell| cell.display_text())
                        .unwrap_or_default();
                    fit_cell(
                        &text,
                        slot.width(),
                        col.value_alignment(),
                        table.allow_truncate_string_columns,
                    )
                });
                lines.push(wrap_row(cells));
            }
        }
    }

    lines.push(horizontal_line(layout, LineType::Bottom));
    lines.join("\n")
}

/// Pads a cell to `width`, truncating with an ellipsis when allowed.
fn fit_cell(text: &str, width: usize, align: Align, allow_truncate: bool) -> String {
    if allow_truncate && visible_length(text) > width {
        pad(&truncate(text, width), width, align)
    } else {
        pad(text, width, align)
    }
}

/// Joins cell contents with vertical bars and one space of padding.
fn wrap_row(cells: impl Iterator<Item = String>) -> String {
    let bar = LIGHT.vertical;
    let mut line = String::new();
    line.push(bar);
    for cell in cells {
        line.push(' ');
        line.push_str(&cell);
        line.push(' ');
        line.push(bar);
    }
    line
}

fn title_row(layout: &Layout, title: &str, allow_truncate: bool) -> String {
    let width = layout.title_text_width();
    let text = fit_cell(title, width, Align::Even, allow_truncate);
    wrap_row(std::iter::once(text))
}

fn horizontal_line(layout: &Layout, line_type: LineType) -> String {
    let chars = &LIGHT;
    let (left, joint, right) = match line_type {
        LineType::TitleTop => (chars.top_left, chars.horizontal, chars.top_right),
        LineType::Top => (chars.top_left, chars.top_t, chars.top_right),
        LineType::TitleJoin => (chars.left_t, chars.top_t, chars.right_t),
        LineType::Middle => (chars.left_t, chars.cross, chars.right_t),
        LineType::Bottom => (chars.bottom_left, chars.bottom_t, chars.bottom_right),
    };

    let mut line = String::new();
    line.push(left);
    for (i, column) in layout.columns.iter().enumerate() {
        if i > 0 {
            line.push(joint);
        }
        line.extend(std::iter::repeat_n(chars.horizontal, column.width() + 2));
    }
    line.push(right);
    line
}
