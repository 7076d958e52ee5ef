//! Host-verified bracket backend.
//!
//! Instead of the literal scan, this backend drives the host editor's
//! "go to matching delimiter" primitive: jump once from the cursor to land on
//! one end of the enclosing pair, jump again to land on the other, re-anchor
//! one character left when the host matched the right-adjacent scope, and step
//! left while the resolved end still precedes the cursor. Sibling queries use
//! the same primitive to cross whole bracket groups instead of counting
//! nesting, so a delimiter the host disowns (string or comment content) never
//! miscounts. Host results are memoized per input offset for the duration of
//! one query, and results that violate the matching invariants are reported
//! and dropped rather than trusted.

use crate::brackets::BracketScope;
use crate::delimiters::{DelimiterRole, DelimiterTable};
use crate::span::{Direction, Offset, Span};
use crate::text::CharIndex;
use std::collections::HashMap;

const SIBLING_ROLES: &[DelimiterRole] = &[
    DelimiterRole::Opening,
    DelimiterRole::Closing,
    DelimiterRole::Separator,
    DelimiterRole::PseudoSeparator,
];

/// A black-box "go to matching delimiter" primitive supplied by the host.
pub trait BracketJumper {
    /// Jump from `pos` to the matching delimiter, or `None` when the host has
    /// no match there.
    fn jump(&mut self, pos: Offset) -> Option<Offset>;
}

/// Bracket scope resolution through a [`BracketJumper`], valid for one query.
pub struct HostBracketResolver<'a, J: BracketJumper + ?Sized> {
    jumper: &'a mut J,
    table: &'a DelimiterTable,
    text: &'a str,
    index: CharIndex,
    cache: HashMap<Offset, Offset>,
}

impl<'a, J: BracketJumper + ?Sized> HostBracketResolver<'a, J> {
    /// Create a resolver for one query over the given text snapshot.
    pub fn new(jumper: &'a mut J, table: &'a DelimiterTable, text: &'a str) -> Self {
        let index = CharIndex::new(text);
        Self {
            jumper,
            table,
            text,
            index,
            cache: HashMap::new(),
        }
    }

    fn jump_cached(&mut self, pos: Offset) -> Option<Offset> {
        if let Some(&target) = self.cache.get(&pos) {
            return Some(target);
        }
        let target = self.jumper.jump(pos)?;
        if target == pos {
            log::warn!("bracket-jump primitive did not move from offset {pos}");
            return None;
        }
        self.cache.insert(pos, target);
        Some(target)
    }

    /// Jump twice from `from` and return the resolved pair ordered
    /// (start, end).
    fn jump_pair(&mut self, from: Offset) -> Option<(Offset, Offset)> {
        let first = self.jump_cached(from)?;
        let second = self.jump_cached(first)?;
        if second <= first {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }

    fn is_delimiter(&self, offset: Offset, direction: Direction, role: DelimiterRole) -> bool {
        self.table
            .match_at(self.text, &self.index, offset, direction, &[role])
            .is_some()
    }

    /// Find the bracket scope enclosing `pos` via the host primitive.
    ///
    /// Returns `None` both when there is genuinely no enclosing pair and when
    /// the host's answers fail validation (the latter is also reported).
    pub fn outer(&mut self, pos: Offset) -> Option<BracketScope> {
        let (mut start, mut end) = self.jump_pair(pos)?;
        if start >= pos {
            // The host matched the right-adjacent scope; re-anchor one left.
            let (s, e) = self.jump_pair(pos.checked_sub(1)?)?;
            start = s;
            end = e;
        }
        let mut probe = start;
        while end < pos {
            // Ran past a scope that ends before the cursor; keep stepping left.
            probe = probe.checked_sub(1)?;
            let (s, e) = self.jump_pair(probe)?;
            start = s;
            end = e;
            probe = probe.min(s);
        }

        // The primitive works on single-character tokens; the scope runs past
        // the closing one.
        let span = Span::new(start, end + 1);
        if !span.contains_inside(pos) {
            return None;
        }
        if !self.is_delimiter(span.start, Direction::After, DelimiterRole::Opening)
            || !self.is_delimiter(span.end, Direction::Before, DelimiterRole::Closing)
        {
            log::warn!(
                "bracket-jump primitive produced a non-delimiter scope {:?} for offset {pos}",
                span
            );
            return None;
        }
        Some(BracketScope {
            span,
            open_len: 1,
            close_len: 1,
        })
    }

    /// Find the adjacent scope at the cursor's level, skipping over it.
    ///
    /// Token positions come from the delimiter table, but their pairing comes
    /// from the host: a bracket group is crossed by jumping from one end to
    /// the other, and a token the host cannot jump from is passed over.
    /// Separator-aware queries produce the same argument-level spans as the
    /// literal scan.
    pub fn sibling(
        &mut self,
        pos: Offset,
        direction: Direction,
        separators: bool,
    ) -> Option<BracketScope> {
        match direction {
            Direction::After => self.sibling_after(pos, separators),
            Direction::Before => self.sibling_before(pos, separators),
        }
    }

    fn sibling_after(&mut self, pos: Offset, separators: bool) -> Option<BracketScope> {
        let end = self.index.char_count();
        let mut sep_start: Option<(Offset, usize)> = None;
        let mut o = pos;
        while o < end {
            let Some(m) =
                self.table
                    .match_at(self.text, &self.index, o, Direction::After, SIBLING_ROLES)
            else {
                o += 1;
                continue;
            };
            match m.role {
                DelimiterRole::Opening => {
                    let Some(close) = self.jump_cached(o) else {
                        o += m.len;
                        continue;
                    };
                    if close <= o {
                        log::warn!("bracket-jump primitive went backward from opening at {o}");
                        return None;
                    }
                    if sep_start.is_none() {
                        return Some(BracketScope {
                            span: Span::new(o, close + 1),
                            open_len: 1,
                            close_len: 1,
                        });
                    }
                    o = close + 1;
                }
                DelimiterRole::Closing => {
                    if self.jump_cached(o).is_none() {
                        o += m.len;
                        continue;
                    }
                    // A paired closing at this level exits the current scope.
                    return sep_start.map(|(s, slen)| BracketScope {
                        span: Span::new(s, o),
                        open_len: slen,
                        close_len: 0,
                    });
                }
                DelimiterRole::Separator if separators => {
                    if let Some((s, slen)) = sep_start {
                        return Some(BracketScope {
                            span: Span::new(s, o),
                            open_len: slen,
                            close_len: 0,
                        });
                    }
                    sep_start = Some((o, m.len));
                    o += m.len;
                }
                DelimiterRole::Separator | DelimiterRole::PseudoSeparator => o += m.len,
            }
        }
        sep_start.map(|(s, slen)| BracketScope {
            span: Span::new(s, end),
            open_len: slen,
            close_len: 0,
        })
    }

    fn sibling_before(&mut self, pos: Offset, separators: bool) -> Option<BracketScope> {
        let mut sep_end: Option<(Offset, usize)> = None;
        let mut o = pos;
        while o > 0 {
            let Some(m) =
                self.table
                    .match_at(self.text, &self.index, o, Direction::Before, SIBLING_ROLES)
            else {
                o -= 1;
                continue;
            };
            let token_start = o - m.len;
            match m.role {
                DelimiterRole::Closing => {
                    let Some(open) = self.jump_cached(token_start) else {
                        o = token_start;
                        continue;
                    };
                    if open >= token_start {
                        log::warn!(
                            "bracket-jump primitive went forward from closing at {token_start}"
                        );
                        return None;
                    }
                    if sep_end.is_none() {
                        return Some(BracketScope {
                            span: Span::new(open, o),
                            open_len: 1,
                            close_len: 1,
                        });
                    }
                    o = open;
                }
                DelimiterRole::Opening => {
                    if self.jump_cached(token_start).is_none() {
                        o = token_start;
                        continue;
                    }
                    // A paired opening at this level exits the current scope.
                    return sep_end.map(|(e, elen)| BracketScope {
                        span: Span::new(o, e),
                        open_len: 0,
                        close_len: elen,
                    });
                }
                DelimiterRole::Separator if separators => {
                    if let Some((e, elen)) = sep_end {
                        return Some(BracketScope {
                            span: Span::new(o, e),
                            open_len: 0,
                            close_len: elen,
                        });
                    }
                    sep_end = Some((o, m.len));
                    o = token_start;
                }
                DelimiterRole::Separator | DelimiterRole::PseudoSeparator => o = token_start,
            }
        }
        sep_end.map(|(e, elen)| BracketScope {
            span: Span::new(0, e),
            open_len: 0,
            close_len: elen,
        })
    }

    /// The bracket scope whose delimiter token sits exactly at `endpoint`,
    /// paired through the host primitive.
    pub fn delimited_scope_at(
        &mut self,
        endpoint: Offset,
        direction: Direction,
    ) -> Option<BracketScope> {
        let role = if direction.is_before() {
            DelimiterRole::Opening
        } else {
            DelimiterRole::Closing
        };
        let m = self
            .table
            .match_at(self.text, &self.index, endpoint, direction.opposite(), &[role])?;
        match direction {
            Direction::Before => {
                let close = self.jump_cached(endpoint)?;
                (close > endpoint).then(|| BracketScope {
                    span: Span::new(endpoint, close + 1),
                    open_len: m.len,
                    close_len: 1,
                })
            }
            Direction::After => {
                let open = self.jump_cached(endpoint - m.len)?;
                (open + m.len < endpoint).then(|| BracketScope {
                    span: Span::new(open, endpoint),
                    open_len: 1,
                    close_len: m.len,
                })
            }
        }
    }
}
