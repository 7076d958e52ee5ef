//! Indentation-based scope resolver.
//!
//! Blocks nest by visual indentation depth. The first non-blank line whose
//! indentation drops strictly below the cursor line's depth is a fence-post: it
//! terminates the scope without belonging to it (or to any sibling at the lower
//! depth), the way a wide delimiter token would. Blank lines do not participate
//! in depth comparison except at the very edges of the buffer.

use crate::buffer::Buffer;
use crate::indent::IndentModel;
use crate::span::{Direction, Offset, Span};

/// A resolved indentation scope with both boundary flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentScope {
    /// Span out to the fence-post rows (their first-non-blank columns) or the
    /// buffer edges.
    pub span: Span,
    /// Span trimmed to the nearest non-blank content rows.
    pub near_span: Span,
}

impl IndentScope {
    /// The navigable span for the requested mode.
    pub fn resolved_span(&self, near: bool) -> Span {
        if near { self.near_span } else { self.span }
    }
}

/// Indentation scope queries over a buffer.
pub struct IndentResolver<'b> {
    buffer: &'b Buffer,
    model: IndentModel,
}

impl<'b> IndentResolver<'b> {
    /// Create a resolver over the buffer with the given indentation model.
    pub fn new(buffer: &'b Buffer, model: IndentModel) -> Self {
        Self { buffer, model }
    }

    fn line_text(&self, line: usize) -> String {
        self.buffer.line_text(line).unwrap_or_default()
    }

    fn indent_of(&self, line: usize) -> usize {
        self.model.visible_indent(&self.line_text(line))
    }

    fn is_blank(&self, line: usize) -> bool {
        self.model.is_blank(&self.line_text(line))
    }

    /// Offset of the first non-whitespace character of `line` (end of content
    /// for a blank line).
    fn first_content_offset(&self, line: usize) -> Offset {
        let text = self.line_text(line);
        let lead = text
            .chars()
            .take_while(|ch| ch.is_whitespace())
            .count();
        self.buffer.line_start(line) + lead
    }

    /// Find the fence-post line in `direction` from `from` (exclusive): the
    /// first non-blank line with indentation strictly below `baseline`. Blank
    /// lines participate only when they are the absolute first/last line.
    fn fence_line(&self, from: usize, direction: Direction, baseline: usize) -> Option<usize> {
        let last = self.buffer.line_count().saturating_sub(1);
        let mut line = from;
        loop {
            match direction {
                Direction::Before => {
                    if line == 0 {
                        return None;
                    }
                    line -= 1;
                }
                Direction::After => {
                    if line >= last {
                        return None;
                    }
                    line += 1;
                }
            }
            let at_edge = line == 0 || line == last;
            if self.is_blank(line) && !at_edge {
                continue;
            }
            if self.indent_of(line) < baseline {
                return Some(line);
            }
        }
    }

    /// Nearest non-blank row on the `direction` side of `line` (inclusive),
    /// stopping at `limit`.
    fn nearest_content_row(&self, line: usize, direction: Direction, limit: usize) -> Option<usize> {
        let mut l = line;
        loop {
            if !self.is_blank(l) {
                return Some(l);
            }
            match direction {
                Direction::Before => {
                    if l >= limit {
                        return None;
                    }
                    l += 1;
                }
                Direction::After => {
                    if l <= limit {
                        return None;
                    }
                    l -= 1;
                }
            }
        }
    }

    /// Find the indentation scope enclosing `pos`.
    ///
    /// Returns `None` when no line on either side is indented less than the
    /// cursor line, i.e. the cursor is at the top indentation level.
    pub fn outer(&self, pos: Offset) -> Option<IndentScope> {
        let line = self.buffer.line_of_offset(pos);
        let baseline = self.indent_of(line);

        let before_fence = self.fence_line(line, Direction::Before, baseline);
        let after_fence = self.fence_line(line, Direction::After, baseline);
        if before_fence.is_none() && after_fence.is_none() {
            return None;
        }

        let start = match before_fence {
            Some(f) => self.first_content_offset(f),
            None => 0,
        };
        let end = match after_fence {
            Some(f) => self.first_content_offset(f),
            None => self.buffer.char_count(),
        };

        // Interior rows for near mode: between the fences, nearest non-blank.
        let first_interior = before_fence.map_or(0, |f| f + 1);
        let last_interior = after_fence.map_or_else(
            || self.buffer.line_count().saturating_sub(1),
            |f| f.saturating_sub(1),
        );
        let near_start = self
            .nearest_content_row(first_interior, Direction::Before, line)
            .map_or(start, |l| self.first_content_offset(l));
        let near_end = self
            .nearest_content_row(last_interior, Direction::After, line)
            .map_or(end, |l| self.buffer.line_end(l));

        Some(IndentScope {
            span: Span::new(start, end),
            near_span: Span::new(near_start.max(start), near_end.min(end)),
        })
    }

    /// Find the adjacent indentation block at the cursor line's depth.
    ///
    /// Lines at the baseline depth pass by; a strictly deeper run is a candidate
    /// sibling block, complete when the depth returns exactly to the baseline.
    /// A drop below the baseline means there is no sibling at this level. Blank
    /// lines inside a candidate block never terminate it; a buffer edge does.
    pub fn sibling(&self, pos: Offset, direction: Direction) -> Option<IndentScope> {
        let start_line = self.buffer.line_of_offset(pos);
        let baseline = self.indent_of(start_line);
        let last = self.buffer.line_count().saturating_sub(1);

        let mut entered: Option<usize> = None;
        let mut far_deeper: Option<usize> = None;
        let mut line = start_line;
        loop {
            match direction {
                Direction::Before => {
                    if line == 0 {
                        break;
                    }
                    line -= 1;
                }
                Direction::After => {
                    if line >= last {
                        break;
                    }
                    line += 1;
                }
            }
            if self.is_blank(line) {
                continue;
            }
            let indent = self.indent_of(line);
            if indent > baseline {
                if entered.is_none() {
                    entered = Some(line);
                }
                far_deeper = Some(line);
                continue;
            }
            if indent == baseline {
                if entered.is_some() {
                    break;
                }
                continue;
            }
            // Strictly shallower: exited the current block without a sibling.
            return None;
        }

        let (near_edge, far_edge) = (entered?, far_deeper?);
        let (top, bottom) = match direction {
            Direction::After => (near_edge, far_edge),
            Direction::Before => (far_edge, near_edge),
        };
        let span = Span::new(self.buffer.line_start(top), self.buffer.line_end(bottom));
        let near_span = Span::new(self.first_content_offset(top), self.buffer.line_end(bottom));
        Some(IndentScope { span, near_span })
    }
}
