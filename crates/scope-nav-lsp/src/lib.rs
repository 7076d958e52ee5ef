#![warn(missing_docs)]
//! `scope-nav-lsp` - LSP integration for `scope-nav`.
//!
//! This crate contains the LSP-specific utilities the navigation kernel stays
//! agnostic of: UTF-16 coordinate conversion and `textDocument/documentSymbol`
//! payload parsing, plus a [`SymbolProvider`](scope_nav::SymbolProvider)
//! implementation over stored symbol payloads. It intentionally avoids pulling
//! in `lsp-types`; the subset of the protocol needed here is parsed directly
//! from `serde_json::Value`.

pub mod lsp_coords;
pub mod lsp_symbols;

pub use lsp_coords::{
    LspCoordinateConverter, LspPosition, LspRange, lsp_position_to_offset, lsp_range_to_span,
    offset_to_lsp_position,
};
pub use lsp_symbols::{LspSymbolProvider, document_symbols_from_value};
