//! Candidate combination policy.
//!
//! The bracket resolver and the block provider (indentation or symbols,
//! depending on configuration) answer each query independently; these pure
//! functions merge their candidates into one navigation decision. The rules
//! are asymmetric and encode observed editor behavior rather than a symmetric
//! metric, so edge cases are pinned by regression tests.

use crate::span::{Direction, Offset, Span};

/// Which resolver produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOrigin {
    /// Delimiter-pair matching.
    Bracket,
    /// Indentation block matching.
    Indentation,
    /// Externally supplied symbol tree.
    Symbol,
}

/// One scope candidate: its span, provenance, and the endpoint the cursor
/// would move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeCandidate {
    /// The candidate scope span.
    pub span: Span,
    /// Which resolver produced it.
    pub origin: ScopeOrigin,
    /// The directional active endpoint.
    pub active: Offset,
}

impl ScopeCandidate {
    /// Build a candidate whose active endpoint follows the query direction.
    pub fn new(span: Span, origin: ScopeOrigin, direction: Direction) -> Self {
        Self {
            span,
            origin,
            active: span.active_end(direction),
        }
    }

    fn distance_to(&self, pos: Offset) -> usize {
        self.active.abs_diff(pos)
    }
}

/// Merge outer-scope candidates.
///
/// A lone candidate wins. With both present, the block candidate wins when the
/// bracket candidate strictly contains it (the block is the finer enclosure),
/// or when near mode is active and the block candidate's endpoint is nearer to
/// the cursor; otherwise the bracket candidate wins.
pub fn combine_outer(
    pos: Offset,
    near: bool,
    bracket: Option<ScopeCandidate>,
    block: Option<ScopeCandidate>,
) -> Option<ScopeCandidate> {
    match (bracket, block) {
        (None, None) => None,
        (Some(candidate), None) | (None, Some(candidate)) => Some(candidate),
        (Some(bracket), Some(block)) => {
            if bracket.span.contains_span_inside(block.span) {
                Some(block)
            } else if near && block.distance_to(pos) < bracket.distance_to(pos) {
                Some(block)
            } else {
                Some(bracket)
            }
        }
    }
}

/// Merge sibling-scope candidates.
///
/// With both present: if the spans intersect and the cursor sits strictly
/// inside the block candidate, the bracket candidate wins (finer granularity
/// inside the coarser block); among other intersecting pairs the nearer active
/// endpoint wins; among disjoint pairs the farther endpoint wins, since a
/// disjoint bracket sibling implies a deeper skip is warranted.
pub fn combine_sibling(
    pos: Offset,
    bracket: Option<ScopeCandidate>,
    block: Option<ScopeCandidate>,
) -> Option<ScopeCandidate> {
    match (bracket, block) {
        (None, None) => None,
        (Some(candidate), None) | (None, Some(candidate)) => Some(candidate),
        (Some(bracket), Some(block)) => {
            if bracket.span.intersects(block.span) {
                if block.span.contains_inside(pos) {
                    Some(bracket)
                } else if bracket.distance_to(pos) <= block.distance_to(pos) {
                    Some(bracket)
                } else {
                    Some(block)
                }
            } else if bracket.distance_to(pos) >= block.distance_to(pos) {
                Some(bracket)
            } else {
                Some(block)
            }
        }
    }
}
