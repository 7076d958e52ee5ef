//! Rope-backed buffer index.
//!
//! Provides the random-access view the resolvers need: character access by offset,
//! line text, and offset↔(line, column) conversion, all in O(log n) via a Rope.
//! The buffer is a read-only snapshot of the host document's current text; the
//! resolvers are stateless and always work against the text they are handed.

use crate::span::{Offset, Position};
use ropey::Rope;

/// An indexed, read-only view over a document's text.
///
/// All offsets are character offsets; line indices are zero-based logical lines.
/// A `\r\n` terminator counts as a single logical line break: column positions
/// clamp to the line content and never land between `\r` and `\n`.
#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Build a buffer index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total line count.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The character at `offset`, or `None` past the end.
    pub fn char_at(&self, offset: Offset) -> Option<char> {
        if offset >= self.rope.len_chars() {
            return None;
        }
        Some(self.rope.char(offset))
    }

    /// Text of the given line, with the line terminator stripped.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Character offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> Offset {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Character offset just past the content of `line`, before its terminator.
    pub fn line_end(&self, line: usize) -> Offset {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let start = self.rope.line_to_char(line);
        start + self.line_content_len(line)
    }

    /// Content length of `line` in characters, excluding the terminator.
    pub fn line_content_len(&self, line: usize) -> usize {
        let full = self.rope.line(line);
        let mut len = full.len_chars();
        if len > 0 && full.char(len - 1) == '\n' {
            len -= 1;
        }
        if len > 0 && full.char(len - 1) == '\r' {
            len -= 1;
        }
        len
    }

    /// Line index containing `offset`.
    pub fn line_of_offset(&self, offset: Offset) -> usize {
        let offset = offset.min(self.rope.len_chars());
        self.rope.char_to_line(offset)
    }

    /// Convert a character offset to a logical position.
    ///
    /// Offsets falling on a line terminator clamp to the end of the line content,
    /// so a two-character terminator is never split.
    pub fn offset_to_position(&self, offset: Offset) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let column = (offset - self.rope.line_to_char(line)).min(self.line_content_len(line));
        Position::new(line, column)
    }

    /// Convert a logical position to a character offset, clamping the column to
    /// the line content.
    pub fn position_to_offset(&self, pos: Position) -> Offset {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(pos.line) + pos.column.min(self.line_content_len(pos.line))
    }

    /// Full text of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}
