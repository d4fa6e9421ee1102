//! Indent-tracking writer over a character sink.

use std::fmt;

use crate::error::GenError;

const INDENT: &str = "    ";

/// Wraps a [`fmt::Write`] sink and tracks the current indent level; every
/// fresh line starts with one four-space group per level.
pub(crate) struct Writer<'a, W: fmt::Write> {
    out: &'a mut W,
    indent: usize,
}

impl<'a, W: fmt::Write> Writer<'a, W> {
    pub(crate) fn new(out: &'a mut W) -> Self {
        Self { out, indent: 0 }
    }

    /// Write text on the current line.
    pub(crate) fn word(&mut self, text: &str) -> Result<(), GenError> {
        self.out.write_str(text)?;
        Ok(())
    }

    /// Start a fresh line at the current indent.
    pub(crate) fn line(&mut self) -> Result<(), GenError> {
        self.out.write_char('\n')?;
        for _ in 0..self.indent {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }

    /// Terminate the current line, leaving the next one empty (no
    /// trailing indent spaces on blank lines).
    pub(crate) fn blank(&mut self) -> Result<(), GenError> {
        self.out.write_char('\n')?;
        Ok(())
    }

    pub(crate) fn indent_in(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn indent_out(&mut self) {
        self.indent -= 1;
    }

    #[cfg(test)]
    pub(crate) fn indent(&self) -> usize {
        self.indent
    }
}
