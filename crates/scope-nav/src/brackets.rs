//! Literal-scan bracket scope resolver.
//!
//! Resolves outer and sibling bracket scopes with a streaming nesting counter
//! over the delimiter table. The scan is lenient about unmatched brackets: when
//! one side of a scope is missing, the buffer edge stands in for it, so
//! navigation still works in buffers that do not parse.
//!
//! Scope spans run from the start of the opening token to the end of the closing
//! token; near-mode shrinks both ends inward past the tokens.

use crate::buffer::Buffer;
use crate::delimiters::{DelimiterRole, DelimiterTable};
use crate::span::{Direction, Offset, Span};
use crate::text::CharIndex;

/// A resolved bracket scope: the full span plus the delimiter token lengths at
/// each end (zero where a lenient buffer-edge boundary stands in for a token).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketScope {
    /// Span from the outside edge of the opening token to the outside edge of
    /// the closing token.
    pub span: Span,
    /// Length of the opening-side token in characters.
    pub open_len: usize,
    /// Length of the closing-side token in characters.
    pub close_len: usize,
}

impl BracketScope {
    /// The navigable span: the full span, or with `near` the span shrunk inward
    /// past the delimiter tokens so the boundary sits just inside the content.
    pub fn resolved_span(&self, near: bool) -> Span {
        if near {
            Span::new(self.span.start + self.open_len, self.span.end - self.close_len)
        } else {
            self.span
        }
    }
}

/// A matched delimiter token and where it sits.
#[derive(Debug, Clone, Copy)]
struct TokenAt {
    span: Span,
}

const SCAN_ROLES: &[DelimiterRole] = &[
    DelimiterRole::Opening,
    DelimiterRole::Closing,
    DelimiterRole::Separator,
    DelimiterRole::PseudoSeparator,
];

/// Bracket scope queries over one text snapshot.
///
/// The resolver is stateless between queries; it holds only the materialized
/// text, its character index, and the delimiter table in use.
pub struct BracketResolver<'t> {
    text: String,
    index: CharIndex,
    table: &'t DelimiterTable,
}

impl<'t> BracketResolver<'t> {
    /// Build a resolver over the buffer's current text.
    pub fn new(buffer: &Buffer, table: &'t DelimiterTable) -> Self {
        Self::from_text(buffer.text(), table)
    }

    /// Build a resolver over raw text.
    pub fn from_text(text: String, table: &'t DelimiterTable) -> Self {
        let index = CharIndex::new(&text);
        Self { text, index, table }
    }

    fn char_count(&self) -> usize {
        self.index.char_count()
    }

    fn match_at(&self, offset: Offset, direction: Direction) -> Option<(DelimiterRole, usize)> {
        self.table
            .match_at(&self.text, &self.index, offset, direction, SCAN_ROLES)
            .map(|m| (m.role, m.len))
    }

    /// Scan away from `pos` in `direction` until the nesting counter drops below
    /// the starting depth; returns the boundary token.
    ///
    /// Scanning `After`, opening tokens increment and closing tokens decrement;
    /// scanning `Before` the senses swap.
    fn scan_boundary(&self, pos: Offset, direction: Direction) -> Option<TokenAt> {
        let mut nesting: usize = 0;
        match direction {
            Direction::After => {
                let end = self.char_count();
                let mut o = pos;
                while o < end {
                    let Some((role, len)) = self.match_at(o, Direction::After) else {
                        o += 1;
                        continue;
                    };
                    match role {
                        DelimiterRole::Opening => nesting += 1,
                        DelimiterRole::Closing => {
                            if nesting == 0 {
                                return Some(TokenAt {
                                    span: Span::new(o, o + len),
                                });
                            }
                            nesting -= 1;
                        }
                        DelimiterRole::Separator | DelimiterRole::PseudoSeparator => {}
                    }
                    o += len;
                }
            }
            Direction::Before => {
                let mut o = pos;
                while o > 0 {
                    let Some((role, len)) = self.match_at(o, Direction::Before) else {
                        o -= 1;
                        continue;
                    };
                    match role {
                        DelimiterRole::Closing => nesting += 1,
                        DelimiterRole::Opening => {
                            if nesting == 0 {
                                return Some(TokenAt {
                                    span: Span::new(o - len, o),
                                });
                            }
                            nesting -= 1;
                        }
                        DelimiterRole::Separator | DelimiterRole::PseudoSeparator => {}
                    }
                    o -= len;
                }
            }
        }
        None
    }

    /// Find the smallest bracket scope enclosing `pos`.
    ///
    /// Both sides are scanned; a side that reaches the buffer edge without a
    /// boundary token uses the edge itself. Returns `None` only when neither
    /// side leaves nesting depth zero, i.e. `pos` is not inside any scope.
    pub fn outer(&self, pos: Offset) -> Option<BracketScope> {
        let opening = self.scan_boundary(pos, Direction::Before);
        let closing = self.scan_boundary(pos, Direction::After);
        if opening.is_none() && closing.is_none() {
            return None;
        }

        let (start, open_len) = match opening {
            Some(token) => (token.span.start, token.span.len()),
            None => (0, 0),
        };
        let (end, close_len) = match closing {
            Some(token) => (token.span.end, token.span.len()),
            None => (self.char_count(), 0),
        };
        Some(BracketScope {
            span: Span::new(start, end),
            open_len,
            close_len,
        })
    }

    /// Find the adjacent scope at the same nesting depth, skipping over it.
    ///
    /// Returns the skipped sibling's span when a full delimiter group completes
    /// at the starting depth. With `separators` enabled, a separator token at
    /// depth zero opens a separator-delimited span that runs to the next
    /// depth-zero separator or closing token (argument-level granularity).
    /// Returns `None` when the scan exits the current scope first; the caller
    /// retries one ancestor level up.
    pub fn sibling(
        &self,
        pos: Offset,
        direction: Direction,
        separators: bool,
    ) -> Option<BracketScope> {
        match direction {
            Direction::After => self.sibling_after(pos, separators),
            Direction::Before => self.sibling_before(pos, separators),
        }
    }

    fn sibling_after(&self, pos: Offset, separators: bool) -> Option<BracketScope> {
        let end = self.char_count();
        let mut nesting: usize = 0;
        let mut entered: Option<(Offset, usize)> = None;
        let mut sep_start: Option<(Offset, usize)> = None;
        let mut o = pos;
        while o < end {
            let Some((role, len)) = self.match_at(o, Direction::After) else {
                o += 1;
                continue;
            };
            match role {
                DelimiterRole::Opening => {
                    if nesting == 0 && entered.is_none() {
                        entered = Some((o, len));
                    }
                    nesting += 1;
                }
                DelimiterRole::Closing => {
                    if nesting == 0 {
                        // Exiting the current scope: a pending separator span
                        // ends here, otherwise there is no sibling at this level.
                        return sep_start.map(|(s, slen)| BracketScope {
                            span: Span::new(s, o),
                            open_len: slen,
                            close_len: 0,
                        });
                    }
                    nesting -= 1;
                    if nesting == 0 && sep_start.is_none() {
                        let (group_start, open_len) = entered?;
                        return Some(BracketScope {
                            span: Span::new(group_start, o + len),
                            open_len,
                            close_len: len,
                        });
                    }
                }
                DelimiterRole::Separator if separators => {
                    if nesting == 0 {
                        if let Some((s, slen)) = sep_start {
                            return Some(BracketScope {
                                span: Span::new(s, o),
                                open_len: slen,
                                close_len: 0,
                            });
                        }
                        sep_start = Some((o, len));
                    }
                }
                DelimiterRole::Separator | DelimiterRole::PseudoSeparator => {}
            }
            o += len;
        }
        sep_start.map(|(s, slen)| BracketScope {
            span: Span::new(s, end),
            open_len: slen,
            close_len: 0,
        })
    }

    fn sibling_before(&self, pos: Offset, separators: bool) -> Option<BracketScope> {
        let mut nesting: usize = 0;
        let mut entered: Option<(Offset, usize)> = None;
        let mut sep_end: Option<(Offset, usize)> = None;
        let mut o = pos;
        while o > 0 {
            let Some((role, len)) = self.match_at(o, Direction::Before) else {
                o -= 1;
                continue;
            };
            match role {
                DelimiterRole::Closing => {
                    if nesting == 0 && entered.is_none() {
                        entered = Some((o, len));
                    }
                    nesting += 1;
                }
                DelimiterRole::Opening => {
                    if nesting == 0 {
                        return sep_end.map(|(e, elen)| BracketScope {
                            span: Span::new(o, e),
                            open_len: 0,
                            close_len: elen,
                        });
                    }
                    nesting -= 1;
                    if nesting == 0 && sep_end.is_none() {
                        let (group_end, close_len) = entered?;
                        return Some(BracketScope {
                            span: Span::new(o - len, group_end),
                            open_len: len,
                            close_len,
                        });
                    }
                }
                DelimiterRole::Separator if separators => {
                    if nesting == 0 {
                        if let Some((e, elen)) = sep_end {
                            return Some(BracketScope {
                                span: Span::new(o, e),
                                open_len: 0,
                                close_len: elen,
                            });
                        }
                        sep_end = Some((o, len));
                    }
                }
                DelimiterRole::Separator | DelimiterRole::PseudoSeparator => {}
            }
            o -= len;
        }
        sep_end.map(|(e, elen)| BracketScope {
            span: Span::new(0, e),
            open_len: 0,
            close_len: elen,
        })
    }

    /// The bracket scope whose delimiter token sits exactly at `endpoint`.
    ///
    /// For a `Before` query this looks for an opening token starting at
    /// `endpoint`; for `After`, a closing token ending there. Used by the
    /// combiner when a chosen boundary lands on a delimiter that itself opens a
    /// nested scope.
    pub fn delimited_scope_at(&self, endpoint: Offset, direction: Direction) -> Option<BracketScope> {
        let role = if direction.is_before() {
            DelimiterRole::Opening
        } else {
            DelimiterRole::Closing
        };
        let m = self
            .table
            .match_at(&self.text, &self.index, endpoint, direction.opposite(), &[role])?;
        match direction {
            Direction::Before => {
                let closing = self.scan_boundary(endpoint + m.len, direction.opposite())?;
                Some(BracketScope {
                    span: Span::new(endpoint, closing.span.end),
                    open_len: m.len,
                    close_len: closing.span.len(),
                })
            }
            Direction::After => {
                let opening = self.scan_boundary(endpoint - m.len, direction.opposite())?;
                Some(BracketScope {
                    span: Span::new(opening.span.start, endpoint),
                    open_len: opening.span.len(),
                    close_len: m.len,
                })
            }
        }
    }
}
