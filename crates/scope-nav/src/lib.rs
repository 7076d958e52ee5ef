#![warn(missing_docs)]
//! Scope Nav - Headless Structural Scope Navigation Kernel
//!
//! # Overview
//!
//! `scope-nav` resolves structural scopes around a cursor in a plain text
//! buffer and answers navigation commands over them. It is headless: the host
//! editor supplies text snapshots, optional symbol trees, and optionally its
//! own bracket-matching primitive; the kernel returns target offsets and never
//! touches cursors, selections, or viewports itself.
//!
//! # Core Features
//!
//! - **Bracket scopes**: streaming nesting scan over a configurable
//!   multi-character delimiter table, lenient about unmatched brackets
//! - **Indentation scopes**: visual-depth blocks with fence-post boundaries,
//!   tab-stop and wide-character aware
//! - **Symbol scopes**: externally supplied document symbol trees with a
//!   locality-biased ancestor cache per document
//! - **Candidate combination**: deterministic asymmetric rules merging bracket
//!   and block answers into one navigation decision
//! - **Eight commands**: enclosing-scope jumps (far and near flavors) and
//!   sibling jumps (group-level and argument-level)
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ScopeNavigator (commands, config, cache)   │  ← Public API
//! ├──────────────┬───────────────┬──────────────┤
//! │  brackets /  │  blocks       │  state +     │
//! │  jump        │  (indent)     │  symbols     │  ← Resolvers
//! ├──────────────┴───────────────┴──────────────┤
//! │  combine (candidate merge policy)           │  ← Decision
//! ├─────────────────────────────────────────────┤
//! │  delimiters (token tables) · indent (depth) │  ← Models
//! ├─────────────────────────────────────────────┤
//! │  buffer (Rope index) · span (offsets)       │  ← Text Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use scope_nav::{Buffer, NavigationCommand, NoSymbols, ScopeNavigator};
//!
//! let mut nav = ScopeNavigator::with_defaults();
//! let buffer = Buffer::from_text("fn main() { println!(\"hi\"); }");
//!
//! // From inside the braces, jump to the start of the enclosing scope.
//! let target = nav
//!     .navigate(
//!         "main.rs",
//!         &buffer,
//!         15,
//!         NavigationCommand::GoToUpScope,
//!         &mut NoSymbols,
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(target.offset, 10);
//! ```

pub mod blocks;
pub mod brackets;
pub mod buffer;
pub mod combine;
pub mod commands;
pub mod config;
pub mod delimiters;
pub mod indent;
pub mod jump;
pub mod span;
pub mod state;
pub mod symbols;
pub mod text;

pub use blocks::{IndentResolver, IndentScope};
pub use brackets::{BracketResolver, BracketScope};
pub use buffer::Buffer;
pub use combine::{ScopeCandidate, ScopeOrigin, combine_outer, combine_sibling};
pub use commands::{NavigationCommand, NavigationTarget, ScopeNavigator};
pub use config::{BlockScopeMode, BracketScopeMode, CompiledTables, NavigationConfig};
pub use delimiters::{
    DelimiterConfigError, DelimiterMatch, DelimiterMode, DelimiterRole, DelimiterSetConfig,
    DelimiterTable,
};
pub use indent::IndentModel;
pub use jump::{BracketJumper, HostBracketResolver};
pub use span::{Direction, Offset, Position, Span};
pub use state::{NavigationState, NavigationStateCache};
pub use symbols::{NoSymbols, SymbolKind, SymbolNode, SymbolProvider};
pub use text::CharIndex;
