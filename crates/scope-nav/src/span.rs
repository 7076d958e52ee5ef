//! Core coordinate and range types.
//!
//! All offsets are **character offsets** (Unicode scalar values) from the start of the
//! document; spans are half-open (`[start, end)`). Scope-navigation semantics treat a
//! position exactly on a span boundary as *outside* that span, which keeps adjacent
//! sibling scopes from overlapping ambiguously.

use std::cmp::Ordering;

/// A character offset from the start of the document.
pub type Offset = usize;

/// Direction of a scan relative to a starting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the start of the buffer.
    Before,
    /// Toward the end of the buffer.
    After,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }

    /// Returns `true` for [`Direction::Before`].
    pub fn is_before(self) -> bool {
        matches!(self, Self::Before)
    }
}

/// A half-open character-offset range (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start offset.
    pub start: Offset,
    /// Exclusive end offset.
    pub end: Offset,
}

impl Span {
    /// Create a new span. `start` must not exceed `end`.
    pub fn new(start: Offset, end: Offset) -> Self {
        debug_assert!(start <= end, "span start {start} > end {end}");
        Self { start, end }
    }

    /// Returns the length of the span in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `pos` lies strictly inside the span.
    ///
    /// Boundary positions are outside: `contains_inside(start)` and
    /// `contains_inside(end)` are both `false`.
    pub fn contains_inside(&self, pos: Offset) -> bool {
        self.start < pos && pos < self.end
    }

    /// Returns `true` if `pos` lies inside the span or on its boundary.
    pub fn contains(&self, pos: Offset) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Returns `true` if `other` lies entirely within this span (boundaries may touch).
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` if `other` lies entirely within the interior of this span.
    pub fn contains_span_inside(&self, other: Span) -> bool {
        self.start < other.start && other.end < self.end
    }

    /// Returns `true` if the two spans share at least one position (boundaries count).
    pub fn intersects(&self, other: Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The endpoint the cursor moves to for a query in `direction`.
    ///
    /// Navigating `Before` lands on the span start, `After` on the span end.
    pub fn active_end(&self, direction: Direction) -> Offset {
        match direction {
            Direction::Before => self.start,
            Direction::After => self.end,
        }
    }
}

/// Position coordinates (line and column numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
