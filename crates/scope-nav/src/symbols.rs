//! Language-symbol data model.
//!
//! Symbol trees are supplied by an external provider (typically a language
//! server) and are strictly advisory: navigation works without them, and a
//! malformed tree degrades that provider's candidate rather than the query.

use crate::span::Span;

/// A coarse symbol kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    /// A module/namespace-like container.
    Module,
    /// A class, struct, enum, or interface.
    Type,
    /// A function, method, or constructor.
    Function,
    /// A variable, constant, field, or property.
    Variable,
    /// Anything else, carrying the provider's raw kind value.
    Other(u32),
}

impl SymbolKind {
    /// Convert an LSP `SymbolKind` numeric value into a [`SymbolKind`].
    pub fn from_lsp_kind(kind: u32) -> Self {
        match kind {
            2..=4 => Self::Module,
            5 | 10 | 11 | 23 => Self::Type,
            6 | 9 | 12 => Self::Function,
            7 | 8 | 13 | 14 => Self::Variable,
            other => Self::Other(other),
        }
    }
}

/// A single node of a document symbol tree (hierarchical).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolNode {
    /// Symbol name (e.g. function name).
    pub name: String,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// Full symbol span, from the first to the last character of the
    /// definition (character offsets, half-open).
    pub span: Span,
    /// Selection span: the identifier itself.
    pub selection_span: Span,
    /// Child symbols.
    pub children: Vec<SymbolNode>,
}

impl SymbolNode {
    /// Collect this node and all descendants in pre-order.
    pub fn flatten_preorder<'a>(&'a self, out: &mut Vec<&'a SymbolNode>) {
        out.push(self);
        for child in &self.children {
            child.flatten_preorder(out);
        }
    }
}

/// A source of document symbol trees.
///
/// `document_symbols` is called lazily, only when the cached tree for a
/// document has been invalidated by an edit. An empty result is valid and
/// simply removes the symbol candidate from navigation decisions.
pub trait SymbolProvider {
    /// Fetch the current symbol tree for `doc`.
    fn document_symbols(&mut self, doc: &str) -> Vec<SymbolNode>;
}

/// A provider that never returns symbols.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSymbols;

impl SymbolProvider for NoSymbols {
    fn document_symbols(&mut self, _doc: &str) -> Vec<SymbolNode> {
        Vec::new()
    }
}
