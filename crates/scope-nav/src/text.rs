//! Character-offset to byte-offset mapping.

use crate::span::Offset;

/// Character-offset to byte-offset index over a text snapshot.
///
/// The resolvers scan per character; regex and slicing work in bytes. Building the
/// index once per query keeps each per-offset lookup O(log n) or better.
#[derive(Debug)]
pub struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    /// Build the index for one text snapshot.
    pub fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    /// Total character count of the indexed text.
    pub fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    /// Byte offset of the character at `char_offset`, clamped to the text end.
    pub fn char_to_byte(&self, char_offset: Offset) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .cloned()
            .unwrap_or(self.text_len)
    }

    /// Character offset containing (or following) `byte_offset`.
    pub fn byte_to_char(&self, byte_offset: usize) -> Offset {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}
