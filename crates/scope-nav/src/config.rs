//! Navigation configuration surface.
//!
//! The host loads and stores settings; this module only defines the typed
//! shape, the built-in defaults, and validation. Malformed delimiter sets fall
//! back to the defaults field-wise rather than failing the load: the worst
//! case for a bad configuration is default navigation behavior, never an
//! unusable editor.

use crate::delimiters::{DelimiterMode, DelimiterSetConfig, DelimiterTable};
use serde::{Deserialize, Serialize};

/// Which provider supplies block-scope candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockScopeMode {
    /// The externally supplied symbol tree.
    #[default]
    Symbolic,
    /// The indentation resolver.
    Indentation,
    /// No block-scope candidates.
    Disabled,
}

/// Which backend supplies bracket-scope candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketScopeMode {
    /// The self-contained literal scan over the delimiter table.
    #[default]
    LiteralScan,
    /// The host's verified bracket-jump primitive.
    HostVerified,
    /// No bracket-scope candidates.
    Disabled,
}

/// The full navigation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Block-scope provider selection.
    pub block_scope_mode: BlockScopeMode,
    /// Bracket-scope backend selection.
    pub bracket_scope_mode: BracketScopeMode,
    /// Delimiter sets for plain buffers.
    pub plain: DelimiterSetConfig,
    /// Delimiter sets for markup buffers.
    pub markup: DelimiterSetConfig,
    /// Tab width used by the indentation model.
    pub tab_width: usize,
    /// When set, the markup delimiter table is active.
    pub markup_mode: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            block_scope_mode: BlockScopeMode::default(),
            bracket_scope_mode: BracketScopeMode::default(),
            plain: DelimiterSetConfig::defaults(DelimiterMode::Plain),
            markup: DelimiterSetConfig::defaults(DelimiterMode::Markup),
            tab_width: 4,
            markup_mode: false,
        }
    }
}

/// Compiled delimiter tables for both modes, built from one configuration.
#[derive(Debug, Clone)]
pub struct CompiledTables {
    /// Table for plain buffers.
    pub plain: DelimiterTable,
    /// Table for markup buffers.
    pub markup: DelimiterTable,
}

impl NavigationConfig {
    /// Compile both delimiter tables, falling back to the built-in set for any
    /// mode whose configuration is malformed.
    pub fn compile_tables(&self) -> CompiledTables {
        let plain = DelimiterTable::from_config(&self.plain).unwrap_or_else(|err| {
            log::warn!("invalid plain delimiter configuration ({err}); using defaults");
            DelimiterTable::defaults(DelimiterMode::Plain)
        });
        let markup = DelimiterTable::from_config(&self.markup).unwrap_or_else(|err| {
            log::warn!("invalid markup delimiter configuration ({err}); using defaults");
            DelimiterTable::defaults(DelimiterMode::Markup)
        });
        CompiledTables { plain, markup }
    }

    /// The active delimiter mode.
    pub fn delimiter_mode(&self) -> DelimiterMode {
        if self.markup_mode {
            DelimiterMode::Markup
        } else {
            DelimiterMode::Plain
        }
    }
}
