//! Per-document navigation state.
//!
//! Each open document keeps a lazily refreshed symbol tree and a stack of
//! ancestor symbols containing the last queried position. Small cursor
//! movements reuse most of the stack (locality bias): entries are popped only
//! while they stop containing the new position, then the stack grows back down
//! into the tree. The cache is an explicit object owned by the navigator and
//! keyed by document identity; resolvers never touch it.

use crate::span::{Offset, Span};
use crate::symbols::{SymbolNode, SymbolProvider};
use std::collections::HashMap;

/// Navigation state for one document.
#[derive(Debug, Default)]
pub struct NavigationState {
    /// Set on any text edit; the symbol tree is refetched on the next query.
    dirty: bool,
    root_symbols: Vec<SymbolNode>,
    /// Child-index path from the roots to the innermost symbol containing the
    /// last position (root-to-current order).
    ancestor_path: Vec<usize>,
    last_position: Offset,
}

fn node_for_path<'a>(roots: &'a [SymbolNode], path: &[usize]) -> Option<&'a SymbolNode> {
    let mut node = roots.get(*path.first()?)?;
    for &index in &path[1..] {
        node = node.children.get(index)?;
    }
    Some(node)
}

impl NavigationState {
    fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Whether the symbol tree needs refetching.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Depth of the ancestor stack.
    pub fn ancestor_depth(&self) -> usize {
        self.ancestor_path.len()
    }

    /// The innermost symbol containing the last queried position.
    pub fn innermost(&self) -> Option<&SymbolNode> {
        node_for_path(&self.root_symbols, &self.ancestor_path)
    }

    /// The ancestor at `depth` on the stack (0 = outermost).
    pub fn ancestor_at(&self, depth: usize) -> Option<&SymbolNode> {
        if depth >= self.ancestor_path.len() {
            return None;
        }
        node_for_path(&self.root_symbols, &self.ancestor_path[..=depth])
    }

    /// Sibling candidates at `depth`: the children of the ancestor above that
    /// depth, or the root symbols at depth 0.
    pub fn siblings_at(&self, depth: usize) -> &[SymbolNode] {
        if depth == 0 {
            return &self.root_symbols;
        }
        match node_for_path(&self.root_symbols, &self.ancestor_path[..depth]) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Synchronize the ancestor stack with `pos`, refetching the tree first if
    /// the state is dirty.
    pub fn update_for_position(
        &mut self,
        doc: &str,
        pos: Offset,
        provider: &mut dyn SymbolProvider,
    ) {
        if self.dirty {
            self.root_symbols = provider.document_symbols(doc);
            self.ancestor_path.clear();
            self.dirty = false;
        } else if pos == self.last_position {
            return;
        }

        let mut path = std::mem::take(&mut self.ancestor_path);

        // Locality bias: unwind only as far as needed.
        while !path.is_empty() {
            match node_for_path(&self.root_symbols, &path) {
                Some(node) if node.span.contains_inside(pos) => break,
                _ => {
                    path.pop();
                }
            }
        }

        // Descend into the widest strictly-containing child at each level.
        loop {
            let (children, parent_span): (&[SymbolNode], Option<Span>) =
                match node_for_path(&self.root_symbols, &path) {
                    Some(node) => (&node.children, Some(node.span)),
                    None => (&self.root_symbols, None),
                };
            let mut best: Option<usize> = None;
            for (i, child) in children.iter().enumerate() {
                if !child.span.contains_inside(pos) {
                    continue;
                }
                if let Some(parent) = parent_span {
                    if !parent.contains_span(child.span) {
                        log::warn!(
                            "symbol provider inconsistency in {doc}: child symbol {:?} \
                             escapes its parent span {:?}",
                            child.span,
                            parent
                        );
                        continue;
                    }
                }
                best = match best {
                    None => Some(i),
                    Some(b) if child.span.contains_span(children[b].span) => Some(i),
                    keep => keep,
                };
            }
            match best {
                Some(i) => path.push(i),
                None => break,
            }
        }

        self.ancestor_path = path;
        self.last_position = pos;
    }
}

/// Navigation state for all open documents, keyed by document identity.
#[derive(Debug, Default)]
pub struct NavigationStateCache {
    states: HashMap<String, NavigationState>,
}

impl NavigationStateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state for `doc`, created dirty on first access.
    pub fn state_mut(&mut self, doc: &str) -> &mut NavigationState {
        self.states
            .entry(doc.to_string())
            .or_insert_with(NavigationState::new)
    }

    /// Mark one document's symbol tree as invalidated by an edit.
    pub fn mark_dirty(&mut self, doc: &str) {
        if let Some(state) = self.states.get_mut(doc) {
            state.dirty = true;
        }
    }

    /// Mark every document dirty (configuration change).
    pub fn mark_all_dirty(&mut self) {
        for state in self.states.values_mut() {
            state.dirty = true;
        }
    }

    /// Drop the state for a closed document.
    pub fn remove(&mut self, doc: &str) {
        self.states.remove(doc);
    }

    /// Number of tracked documents.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no documents are tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolKind;

    struct FixedSymbols(Vec<SymbolNode>);

    impl SymbolProvider for FixedSymbols {
        fn document_symbols(&mut self, _doc: &str) -> Vec<SymbolNode> {
            self.0.clone()
        }
    }

    fn node(name: &str, span: Span, children: Vec<SymbolNode>) -> SymbolNode {
        SymbolNode {
            name: name.into(),
            kind: SymbolKind::Function,
            span,
            selection_span: Span::new(span.start, span.start + 1),
            children,
        }
    }

    fn tree() -> Vec<SymbolNode> {
        vec![
            node(
                "outer",
                Span::new(0, 100),
                vec![
                    node("a", Span::new(10, 40), vec![node("a1", Span::new(20, 30), vec![])]),
                    node("b", Span::new(50, 90), vec![]),
                ],
            ),
            node("top2", Span::new(110, 150), vec![]),
        ]
    }

    #[test]
    fn descends_to_innermost_symbol() {
        let mut provider = FixedSymbols(tree());
        let mut state = NavigationState::new();
        state.update_for_position("doc", 25, &mut provider);
        assert_eq!(state.ancestor_depth(), 3);
        assert_eq!(state.innermost().unwrap().name, "a1");
        assert_eq!(state.ancestor_at(0).unwrap().name, "outer");
    }

    #[test]
    fn locality_bias_pops_then_descends() {
        let mut provider = FixedSymbols(tree());
        let mut state = NavigationState::new();
        state.update_for_position("doc", 25, &mut provider);
        // Move into the sibling "b": pops "a1"/"a", keeps "outer", descends to "b".
        state.update_for_position("doc", 60, &mut provider);
        assert_eq!(state.ancestor_depth(), 2);
        assert_eq!(state.innermost().unwrap().name, "b");
    }

    #[test]
    fn boundary_positions_are_outside_symbols() {
        let mut provider = FixedSymbols(tree());
        let mut state = NavigationState::new();
        // 40 is the end boundary of "a": only "outer" contains it strictly.
        state.update_for_position("doc", 40, &mut provider);
        assert_eq!(state.ancestor_depth(), 1);
        assert_eq!(state.innermost().unwrap().name, "outer");
    }

    #[test]
    fn dirty_state_refetches() {
        let mut provider = FixedSymbols(tree());
        let mut cache = NavigationStateCache::new();
        let state = cache.state_mut("doc");
        assert!(state.is_dirty());
        state.update_for_position("doc", 25, &mut provider);
        assert!(!cache.state_mut("doc").is_dirty());
        cache.mark_dirty("doc");
        assert!(cache.state_mut("doc").is_dirty());
    }

    #[test]
    fn widest_containing_child_wins() {
        // Two overlapping children both contain the position; the one that
        // contains the other is chosen.
        let roots = vec![node(
            "outer",
            Span::new(0, 100),
            vec![
                node("narrow", Span::new(20, 40), vec![]),
                node("wide", Span::new(10, 60), vec![]),
            ],
        )];
        let mut provider = FixedSymbols(roots);
        let mut state = NavigationState::new();
        state.update_for_position("doc", 30, &mut provider);
        assert_eq!(state.innermost().unwrap().name, "wide");
    }

    #[test]
    fn inconsistent_child_is_skipped() {
        let roots = vec![node(
            "outer",
            Span::new(0, 50),
            // Escapes the parent span: ignored rather than trusted.
            vec![node("bad", Span::new(10, 80), vec![])],
        )];
        let mut provider = FixedSymbols(roots);
        let mut state = NavigationState::new();
        state.update_for_position("doc", 20, &mut provider);
        assert_eq!(state.innermost().unwrap().name, "outer");
        assert_eq!(state.ancestor_depth(), 1);
    }

    #[test]
    fn siblings_at_depths() {
        let mut provider = FixedSymbols(tree());
        let mut state = NavigationState::new();
        state.update_for_position("doc", 25, &mut provider);
        assert_eq!(state.siblings_at(0).len(), 2);
        assert_eq!(state.siblings_at(1).len(), 2);
        assert_eq!(state.siblings_at(2).len(), 1);
    }

    #[test]
    fn cache_lifecycle() {
        let mut cache = NavigationStateCache::new();
        cache.state_mut("a.rs");
        cache.state_mut("b.rs");
        assert_eq!(cache.len(), 2);
        cache.mark_all_dirty();
        cache.remove("a.rs");
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }
}
