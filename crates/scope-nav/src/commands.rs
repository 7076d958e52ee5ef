//! Navigation command entry point.
//!
//! A [`ScopeNavigator`] owns the validated configuration, the compiled
//! delimiter tables, and the per-document state cache. Each command resolves to
//! at most one [`NavigationTarget`]; the host applies the target offset as a
//! cursor move or a selection-extend and scrolls it into view. A command with
//! no answer returns `None` and the cursor stays put; no navigation failure is
//! an error.

use crate::blocks::IndentResolver;
use crate::brackets::{BracketResolver, BracketScope};
use crate::buffer::Buffer;
use crate::combine::{ScopeCandidate, ScopeOrigin, combine_outer, combine_sibling};
use crate::config::{BlockScopeMode, BracketScopeMode, CompiledTables, NavigationConfig};
use crate::delimiters::DelimiterMode;
use crate::indent::IndentModel;
use crate::jump::{BracketJumper, HostBracketResolver};
use crate::span::{Direction, Offset, Span};
use crate::state::NavigationStateCache;
use crate::symbols::{SymbolNode, SymbolProvider};

/// The navigation commands, mirroring the host key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Jump to the start of the enclosing scope.
    GoToUpScope,
    /// Jump to the end of the enclosing scope.
    GoToDownScope,
    /// Jump just inside the start of the enclosing scope (near mode).
    GoToBeginScope,
    /// Jump just inside the end of the enclosing scope (near mode).
    GoToEndScope,
    /// Jump past the previous sibling scope.
    GoPastPreviousScope,
    /// Jump past the next sibling scope.
    GoPastNextScope,
    /// Jump past the previous argument-level sibling (separator-aware).
    GoPastPreviousSeparator,
    /// Jump past the next argument-level sibling (separator-aware).
    GoPastNextSeparator,
}

impl NavigationCommand {
    fn direction(self) -> Direction {
        match self {
            Self::GoToUpScope
            | Self::GoToBeginScope
            | Self::GoPastPreviousScope
            | Self::GoPastPreviousSeparator => Direction::Before,
            Self::GoToDownScope
            | Self::GoToEndScope
            | Self::GoPastNextScope
            | Self::GoPastNextSeparator => Direction::After,
        }
    }

    fn is_outer(self) -> bool {
        matches!(
            self,
            Self::GoToUpScope | Self::GoToDownScope | Self::GoToBeginScope | Self::GoToEndScope
        )
    }

    fn near(self) -> bool {
        matches!(self, Self::GoToBeginScope | Self::GoToEndScope)
    }

    fn separators(self) -> bool {
        matches!(self, Self::GoPastPreviousSeparator | Self::GoPastNextSeparator)
    }
}

/// The resolved destination of a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTarget {
    /// The offset the cursor moves to.
    pub offset: Offset,
    /// The scope span the decision was based on.
    pub span: Span,
    /// Which resolver produced the winning candidate.
    pub origin: ScopeOrigin,
}

/// The scope navigation engine.
pub struct ScopeNavigator {
    config: NavigationConfig,
    tables: CompiledTables,
    cache: NavigationStateCache,
}

impl ScopeNavigator {
    /// Create a navigator from a configuration.
    pub fn new(config: NavigationConfig) -> Self {
        let tables = config.compile_tables();
        Self {
            config,
            tables,
            cache: NavigationStateCache::new(),
        }
    }

    /// Create a navigator with the built-in default configuration.
    pub fn with_defaults() -> Self {
        Self::new(NavigationConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Delimiter tables are rebuilt atomically; a block-scope-mode change
    /// invalidates every document's cached symbol tree. Nothing else is cached,
    /// so other changes take effect on the next query.
    pub fn set_config(&mut self, config: NavigationConfig) {
        if config.block_scope_mode != self.config.block_scope_mode {
            self.cache.mark_all_dirty();
        }
        self.tables = config.compile_tables();
        self.config = config;
    }

    /// Note a text edit in `doc`: the cached symbol tree is stale.
    pub fn document_edited(&mut self, doc: &str) {
        self.cache.mark_dirty(doc);
    }

    /// Drop all cached state for a closed document.
    pub fn document_closed(&mut self, doc: &str) {
        self.cache.remove(doc);
    }

    /// Execute a navigation command at `pos` in `doc`.
    ///
    /// `provider` supplies symbol trees when the block-scope mode is symbolic;
    /// `jumper` supplies the host bracket primitive when the bracket-scope mode
    /// is host-verified. Returns `None` when the query legitimately has no
    /// answer; the caller leaves the cursor unmoved.
    pub fn navigate(
        &mut self,
        doc: &str,
        buffer: &Buffer,
        pos: Offset,
        command: NavigationCommand,
        provider: &mut dyn SymbolProvider,
        mut jumper: Option<&mut dyn BracketJumper>,
    ) -> Option<NavigationTarget> {
        let direction = command.direction();
        let near = command.near();
        let table = match self.config.delimiter_mode() {
            DelimiterMode::Plain => &self.tables.plain,
            DelimiterMode::Markup => &self.tables.markup,
        };
        let text = buffer.text();
        let literal = BracketResolver::from_text(text.clone(), table);
        let mut host = match self.config.bracket_scope_mode {
            BracketScopeMode::HostVerified => jumper
                .as_deref_mut()
                .map(|j| HostBracketResolver::new(j, table, &text)),
            _ => None,
        };
        let model = IndentModel::new(self.config.tab_width);
        let indent = IndentResolver::new(buffer, model);

        let bracket_scope = |scope: BracketScope| {
            ScopeCandidate::new(scope.resolved_span(near), ScopeOrigin::Bracket, direction)
        };

        if command.is_outer() {
            let bracket = match self.config.bracket_scope_mode {
                BracketScopeMode::LiteralScan => literal.outer(pos).map(bracket_scope),
                BracketScopeMode::HostVerified => {
                    host.as_mut().and_then(|h| h.outer(pos).map(bracket_scope))
                }
                BracketScopeMode::Disabled => None,
            };
            let block = match self.config.block_scope_mode {
                BlockScopeMode::Indentation => indent.outer(pos).map(|scope| {
                    ScopeCandidate::new(
                        scope.resolved_span(near),
                        ScopeOrigin::Indentation,
                        direction,
                    )
                }),
                BlockScopeMode::Symbolic => {
                    let state = self.cache.state_mut(doc);
                    state.update_for_position(doc, pos, provider);
                    state
                        .innermost()
                        .map(|node| ScopeCandidate::new(node.span, ScopeOrigin::Symbol, direction))
                }
                BlockScopeMode::Disabled => None,
            };

            let mut chosen = combine_outer(pos, near, bracket, block)?;
            // Landing exactly on a delimiter that itself opens a nested bracket
            // scope: the narrower scope wins.
            let nested = match self.config.bracket_scope_mode {
                BracketScopeMode::LiteralScan => {
                    literal.delimited_scope_at(chosen.active, direction)
                }
                BracketScopeMode::HostVerified => host
                    .as_mut()
                    .and_then(|h| h.delimited_scope_at(chosen.active, direction)),
                BracketScopeMode::Disabled => None,
            };
            if let Some(nested) = nested {
                let candidate = bracket_scope(nested);
                if chosen.span.contains_span(candidate.span) && candidate.span != chosen.span {
                    chosen = candidate;
                }
            }
            return Some(NavigationTarget {
                offset: chosen.active,
                span: chosen.span,
                origin: chosen.origin,
            });
        }

        // Sibling query. Bracket and indentation candidates are independent of
        // the symbol ancestor level.
        let bracket = match self.config.bracket_scope_mode {
            BracketScopeMode::LiteralScan => literal
                .sibling(pos, direction, command.separators())
                .map(bracket_scope),
            BracketScopeMode::HostVerified => host.as_mut().and_then(|h| {
                h.sibling(pos, direction, command.separators())
                    .map(bracket_scope)
            }),
            BracketScopeMode::Disabled => None,
        };
        if command.separators() {
            // Argument-level jumps stay inside the current bracket pair.
            let chosen = bracket?;
            return Some(NavigationTarget {
                offset: chosen.active,
                span: chosen.span,
                origin: chosen.origin,
            });
        }

        let indent_block = match self.config.block_scope_mode {
            BlockScopeMode::Indentation => indent.sibling(pos, direction).map(|scope| {
                ScopeCandidate::new(scope.resolved_span(false), ScopeOrigin::Indentation, direction)
            }),
            _ => None,
        };

        if self.config.block_scope_mode == BlockScopeMode::Symbolic {
            let state = self.cache.state_mut(doc);
            state.update_for_position(doc, pos, provider);
            // Retry one ancestor level up until a candidate appears; an empty
            // stack ends the search.
            let mut depth = state.ancestor_depth();
            loop {
                let symbol =
                    symbol_sibling(state.siblings_at(depth), pos, direction).map(|span| {
                        ScopeCandidate::new(span, ScopeOrigin::Symbol, direction)
                    });
                if let Some(chosen) = combine_sibling(pos, bracket, symbol) {
                    return Some(NavigationTarget {
                        offset: chosen.active,
                        span: chosen.span,
                        origin: chosen.origin,
                    });
                }
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
        }

        let chosen = combine_sibling(pos, bracket, indent_block)?;
        Some(NavigationTarget {
            offset: chosen.active,
            span: chosen.span,
            origin: chosen.origin,
        })
    }
}

/// Pick the symbol sibling to jump past: among siblings entirely on the query
/// side of `pos`, the nearest one, except that a sibling containing the current
/// best replaces it (the outermost of nested matches wins).
fn symbol_sibling(siblings: &[SymbolNode], pos: Offset, direction: Direction) -> Option<Span> {
    let good = |span: Span| match direction {
        Direction::Before => span.end <= pos,
        Direction::After => span.start >= pos,
    };
    let nearer = |span: Span, best: Span| match direction {
        Direction::Before => span.end > best.end,
        Direction::After => span.start < best.start,
    };
    let mut candidate: Option<Span> = None;
    for sibling in siblings {
        if !good(sibling.span) {
            continue;
        }
        candidate = match candidate {
            None => Some(sibling.span),
            Some(best) if nearer(sibling.span, best) || sibling.span.contains_span(best) => {
                Some(sibling.span)
            }
            keep => keep,
        };
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{NoSymbols, SymbolKind};

    fn nav_indentation() -> ScopeNavigator {
        ScopeNavigator::new(NavigationConfig {
            block_scope_mode: BlockScopeMode::Indentation,
            ..NavigationConfig::default()
        })
    }

    fn target(
        nav: &mut ScopeNavigator,
        text: &str,
        pos: Offset,
        command: NavigationCommand,
    ) -> Option<NavigationTarget> {
        let buffer = Buffer::from_text(text);
        nav.navigate("test.txt", &buffer, pos, command, &mut NoSymbols, None)
    }

    #[test]
    fn up_and_down_scope_over_brackets() {
        let mut nav = nav_indentation();
        let up = target(&mut nav, "a(bc)d", 3, NavigationCommand::GoToUpScope).unwrap();
        assert_eq!(up.offset, 1);
        assert_eq!(up.origin, ScopeOrigin::Bracket);
        let down = target(&mut nav, "a(bc)d", 3, NavigationCommand::GoToDownScope).unwrap();
        assert_eq!(down.offset, 5);
    }

    #[test]
    fn begin_and_end_scope_land_inside() {
        let mut nav = nav_indentation();
        let begin = target(&mut nav, "a(bc)d", 3, NavigationCommand::GoToBeginScope).unwrap();
        assert_eq!(begin.offset, 2);
        let end = target(&mut nav, "a(bc)d", 3, NavigationCommand::GoToEndScope).unwrap();
        assert_eq!(end.offset, 4);
    }

    #[test]
    fn no_scope_is_a_clean_none() {
        let mut nav = nav_indentation();
        assert!(target(&mut nav, "plain text", 4, NavigationCommand::GoToUpScope).is_none());
        assert!(target(&mut nav, "plain", 2, NavigationCommand::GoPastNextScope).is_none());
    }

    #[test]
    fn separator_commands_use_brackets_only() {
        let mut nav = nav_indentation();
        let t = target(
            &mut nav,
            "f(a, b(c), d)",
            9,
            NavigationCommand::GoPastNextSeparator,
        )
        .unwrap();
        assert_eq!(t.offset, 12);
        assert_eq!(t.span, Span::new(9, 12));
    }

    #[test]
    fn sibling_retries_up_the_symbol_stack() {
        struct TwoFns;
        impl SymbolProvider for TwoFns {
            fn document_symbols(&mut self, _doc: &str) -> Vec<SymbolNode> {
                let f = |name: &str, lo: usize, hi: usize| SymbolNode {
                    name: name.into(),
                    kind: SymbolKind::Function,
                    span: Span::new(lo, hi),
                    selection_span: Span::new(lo, lo + 1),
                    children: Vec::new(),
                };
                vec![
                    SymbolNode {
                        children: vec![f("inner", 5, 15)],
                        ..f("first", 0, 20)
                    },
                    f("second", 25, 40),
                ]
            }
        }
        let mut nav = ScopeNavigator::with_defaults();
        let buffer = Buffer::from_text(&" ".repeat(50));
        // Cursor inside "first" but past "inner": no sibling among "first"'s
        // children on the after side, so the search retries at the root level
        // and lands past "second".
        let t = nav
            .navigate(
                "doc.rs",
                &buffer,
                18,
                NavigationCommand::GoPastNextScope,
                &mut TwoFns,
                None,
            )
            .unwrap();
        assert_eq!(t.offset, 40);
        assert_eq!(t.origin, ScopeOrigin::Symbol);
    }

    #[test]
    fn block_mode_change_invalidates_symbol_cache() {
        let mut nav = ScopeNavigator::with_defaults();
        let buffer = Buffer::from_text("()");
        nav.navigate(
            "doc.rs",
            &buffer,
            1,
            NavigationCommand::GoToUpScope,
            &mut NoSymbols,
            None,
        );
        let mut config = nav.config().clone();
        config.block_scope_mode = BlockScopeMode::Indentation;
        nav.set_config(config);
        // A later flip back re-enters symbolic mode with a dirty cache; this is
        // observable only through refetch counts, covered in integration tests.
        assert_eq!(nav.config().block_scope_mode, BlockScopeMode::Indentation);
    }

    #[test]
    fn symbol_sibling_selection() {
        let node = |lo: usize, hi: usize| SymbolNode {
            name: format!("s{lo}"),
            kind: SymbolKind::Variable,
            span: Span::new(lo, hi),
            selection_span: Span::new(lo, lo + 1),
            children: Vec::new(),
        };
        let siblings = vec![node(30, 40), node(12, 20), node(10, 25)];
        // After: nearest start not before pos; the containing span wins over a
        // contained nearer one.
        assert_eq!(symbol_sibling(&siblings, 5, Direction::After), Some(Span::new(10, 25)));
        assert_eq!(symbol_sibling(&siblings, 28, Direction::After), Some(Span::new(30, 40)));
        assert_eq!(symbol_sibling(&siblings, 28, Direction::Before), Some(Span::new(10, 25)));
        assert_eq!(symbol_sibling(&siblings, 5, Direction::Before), None);
    }
}
