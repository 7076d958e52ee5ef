//! `textDocument/documentSymbol` payload parsing.
//!
//! Converts raw symbol payloads into [`SymbolNode`] trees for the navigation
//! kernel. Both response shapes are supported:
//! - `DocumentSymbol[]` (hierarchical)
//! - `SymbolInformation[]` (flat; nodes come back childless)
//!
//! Items that do not parse are skipped rather than failing the whole payload.

use crate::lsp_coords::{LspPosition, LspRange, lsp_range_to_span};
use scope_nav::{Buffer, SymbolKind, SymbolNode, SymbolProvider};
use serde_json::Value;
use std::collections::HashMap;

fn parse_lsp_position(value: &Value) -> Option<LspPosition> {
    Some(LspPosition {
        line: value.get("line")?.as_u64()? as u32,
        character: value.get("character")?.as_u64()? as u32,
    })
}

fn parse_lsp_range(value: &Value) -> Option<LspRange> {
    Some(LspRange {
        start: parse_lsp_position(value.get("start")?)?,
        end: parse_lsp_position(value.get("end")?)?,
    })
}

fn parse_document_symbol(buffer: &Buffer, value: &Value) -> Option<SymbolNode> {
    let name = value.get("name")?.as_str()?.to_string();
    let kind = value.get("kind")?.as_u64()? as u32;
    let range = parse_lsp_range(value.get("range")?)?;
    let selection_range = parse_lsp_range(value.get("selectionRange")?)?;

    let children = value
        .get("children")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|child| parse_document_symbol(buffer, child))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Some(SymbolNode {
        name,
        kind: SymbolKind::from_lsp_kind(kind),
        span: lsp_range_to_span(buffer, range),
        selection_span: lsp_range_to_span(buffer, selection_range),
        children,
    })
}

fn parse_symbol_information(buffer: &Buffer, value: &Value) -> Option<SymbolNode> {
    let name = value.get("name")?.as_str()?.to_string();
    let kind = value.get("kind")?.as_u64()? as u32;
    let range = parse_lsp_range(value.get("location")?.get("range")?)?;
    let span = lsp_range_to_span(buffer, range);

    Some(SymbolNode {
        name,
        kind: SymbolKind::from_lsp_kind(kind),
        span,
        selection_span: span,
        children: Vec::new(),
    })
}

/// Convert an LSP `textDocument/documentSymbol` result payload into symbol
/// nodes, resolving UTF-16 positions against `buffer`.
pub fn document_symbols_from_value(buffer: &Buffer, result: &Value) -> Vec<SymbolNode> {
    let Some(arr) = result.as_array() else {
        return Vec::new();
    };
    let mut symbols = Vec::new();
    for item in arr {
        if let Some(sym) = parse_document_symbol(buffer, item) {
            symbols.push(sym);
        } else if let Some(sym) = parse_symbol_information(buffer, item) {
            symbols.push(sym);
        }
    }
    symbols
}

/// A [`SymbolProvider`] over stored `documentSymbol` payloads.
///
/// The host feeds each `textDocument/documentSymbol` response in as it arrives;
/// the navigator pulls the parsed trees lazily through the provider trait.
#[derive(Debug, Default)]
pub struct LspSymbolProvider {
    trees: HashMap<String, Vec<SymbolNode>>,
}

impl LspSymbolProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the parsed symbol tree from a `documentSymbol` response for `doc`.
    pub fn update_document(&mut self, doc: &str, buffer: &Buffer, payload: &Value) {
        let symbols = document_symbols_from_value(buffer, payload);
        self.trees.insert(doc.to_string(), symbols);
    }

    /// Drop the stored tree for a closed document.
    pub fn clear_document(&mut self, doc: &str) {
        self.trees.remove(doc);
    }
}

impl SymbolProvider for LspSymbolProvider {
    fn document_symbols(&mut self, doc: &str) -> Vec<SymbolNode> {
        self.trees.get(doc).cloned().unwrap_or_default()
    }
}
