//! Terminal width lookup.
//!
//! The table asks a [`TerminalWidth`] for the column count each time it lays
//! itself out. Nothing is cached, so a resize between two renders is picked
//! up by the next one.

use std::fmt::Debug;

/// Width used when no terminal and no `COLUMNS` override are available.
pub const DEFAULT_WIDTH: usize = 80;

/// Source of the terminal's width in columns.
pub trait TerminalWidth: Debug {
    /// Current width in columns.
    fn columns(&self) -> usize;
}

/// Queries the controlling terminal.
///
/// Falls back to the `COLUMNS` environment variable, then to
/// [`DEFAULT_WIDTH`], when stdout is not a terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTerminal;

impl TerminalWidth for SystemTerminal {
    fn columns(&self) -> usize {
        if let Some((w, _)) = terminal_size::terminal_size() {
            return w.0 as usize;
        }
        std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&w| w > 0)
            .unwrap_or(DEFAULT_WIDTH)
    }
}

/// A fixed width, for piped output and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWidth(pub usize);

impl TerminalWidth for FixedWidth {
    fn columns(&self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width() {
        assert_eq!(FixedWidth(42).columns(), 42);
    }

    #[test]
    fn test_system_terminal_reports_positive_width() {
        assert!(SystemTerminal.columns() > 0);
    }
}
