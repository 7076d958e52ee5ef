//! Tab-aware indentation model.
//!
//! Tabs and spaces must compare on a common visual scale so mixed-indentation
//! buffers still nest correctly: tabs expand to the next tab stop, and wide
//! characters count by their terminal cell width.

use unicode_width::UnicodeWidthChar;

/// Computes visual indentation depth and blank-line classification.
#[derive(Debug, Clone, Copy)]
pub struct IndentModel {
    tab_width: usize,
}

impl IndentModel {
    /// Create a model with the given tab width (clamped to at least 1).
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    /// The configured tab width.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Returns `true` if the line is empty or whitespace-only.
    pub fn is_blank(&self, line: &str) -> bool {
        line.chars().all(char::is_whitespace)
    }

    /// Visual column of the first non-whitespace character.
    ///
    /// Tabs expand to the next multiple of the tab width. For a blank line the
    /// expanded width of the whole line is returned, so trailing whitespace on an
    /// otherwise empty line still compares like content at that depth.
    pub fn visible_indent(&self, line: &str) -> usize {
        let mut column = 0;
        for ch in line.chars() {
            if !ch.is_whitespace() {
                return column;
            }
            column = self.advance(column, ch);
        }
        column
    }

    fn advance(&self, column: usize, ch: char) -> usize {
        if ch == '\t' {
            (column / self.tab_width + 1) * self.tab_width
        } else {
            column + ch.width().unwrap_or(0)
        }
    }
}

impl Default for IndentModel {
    fn default() -> Self {
        Self::new(4)
    }
}
