//! UTF-16 coordinate conversion.
//!
//! LSP positions count UTF-16 code units within a line; the navigation kernel
//! works in character offsets from the document start. Conversion goes through
//! the line text, so surrogate-pair characters count as two code units on the
//! LSP side and one character on ours.

use scope_nav::{Buffer, Offset, Position, Span};

/// LSP Position (0-based line, UTF-16 code unit column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LspPosition {
    /// Line number (0-based).
    pub line: u32,
    /// Character offset (UTF-16 code units, 0-based).
    pub character: u32,
}

impl LspPosition {
    /// Create a new LSP position (UTF-16 based).
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// LSP Range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LspRange {
    /// Range start position (inclusive).
    pub start: LspPosition,
    /// Range end position (exclusive).
    pub end: LspPosition,
}

impl LspRange {
    /// Create a new LSP range.
    pub fn new(start: LspPosition, end: LspPosition) -> Self {
        Self { start, end }
    }
}

/// LSP coordinate converter.
///
/// Handles conversions between character offsets and LSP UTF-16 columns.
pub struct LspCoordinateConverter;

impl LspCoordinateConverter {
    /// Convert a character offset within a line to a UTF-16 code unit offset.
    pub fn char_offset_to_utf16(line_text: &str, char_offset: usize) -> usize {
        line_text
            .chars()
            .take(char_offset)
            .map(|c| c.len_utf16())
            .sum()
    }

    /// Convert a UTF-16 code unit offset within a line to a character offset.
    pub fn utf16_to_char_offset(line_text: &str, utf16_offset: usize) -> usize {
        let mut current_utf16 = 0;
        let mut char_count = 0;
        for ch in line_text.chars() {
            if current_utf16 >= utf16_offset {
                break;
            }
            current_utf16 += ch.len_utf16();
            char_count += 1;
        }
        char_count
    }
}

/// Convert an LSP position to a document character offset.
///
/// Out-of-range lines and columns clamp to the buffer content.
pub fn lsp_position_to_offset(buffer: &Buffer, pos: LspPosition) -> Offset {
    let line = pos.line as usize;
    let line_text = buffer.line_text(line).unwrap_or_default();
    let column = LspCoordinateConverter::utf16_to_char_offset(&line_text, pos.character as usize);
    buffer.position_to_offset(Position::new(line, column))
}

/// Convert a document character offset to an LSP position.
pub fn offset_to_lsp_position(buffer: &Buffer, offset: Offset) -> LspPosition {
    let pos = buffer.offset_to_position(offset);
    let line_text = buffer.line_text(pos.line).unwrap_or_default();
    let character = LspCoordinateConverter::char_offset_to_utf16(&line_text, pos.column);
    LspPosition::new(pos.line as u32, character as u32)
}

/// Convert an LSP range to a character-offset span, normalizing order.
pub fn lsp_range_to_span(buffer: &Buffer, range: LspRange) -> Span {
    let start = lsp_position_to_offset(buffer, range.start);
    let end = lsp_position_to_offset(buffer, range.end);
    Span::new(start.min(end), start.max(end))
}
