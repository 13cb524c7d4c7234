//! Terminal width query. The renderer takes this as a collaborator so it can
//! be driven with a fixed width in tests and when output is not a tty.

use std::io;
use thiserror::Error;

/// Width used when the terminal cannot be queried.
pub const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal size query failed: {0}")]
    Query(#[source] io::Error),
    #[error("terminal reported zero columns")]
    ZeroWidth,
}

/// Source of the current terminal width in columns.
pub trait TerminalSize {
    fn width(&self) -> Result<usize, TerminalError>;
}

/// The terminal this process is attached to.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentTerminal;

impl TerminalSize for CurrentTerminal {
    fn width(&self) -> Result<usize, TerminalError> {
        let (cols, _rows) = crossterm::terminal::size().map_err(TerminalError::Query)?;
        if cols == 0 {
            return Err(TerminalError::ZeroWidth);
        }
        Ok(cols as usize)
    }
}

/// Always reports the same width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub usize);

impl TerminalSize for FixedWidth {
    fn width(&self) -> Result<usize, TerminalError> {
        if self.0 == 0 {
            return Err(TerminalError::ZeroWidth);
        }
        Ok(self.0)
    }
}

/// Width from `term`, or `FALLBACK_WIDTH` if the query fails.
pub fn width_or_fallback(term: &dyn TerminalSize) -> usize {
    width_or(term, FALLBACK_WIDTH)
}

/// Width from `term`, or `fallback` if the query fails.
pub fn width_or(term: &dyn TerminalSize, fallback: usize) -> usize {
    match term.width() {
        Ok(w) => w,
        Err(e) => {
            tracing::trace!(error = %e, fallback, "terminal width unavailable");
            fallback
        }
    }
}
