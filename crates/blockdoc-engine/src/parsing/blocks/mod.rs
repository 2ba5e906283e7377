//! # Block Parsing
//!
//! Two-phase Markdown block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` from local facts (fence, rule, heading, quote, table row,
//!    list marker, image, blank)
//! 2. **Block Construction** (`builder`): `BlockBuilder` looks ahead from the
//!    opening line to consume the whole construct and emits canonical nodes
//!
//! ## Modules
//!
//! - **`kinds`**: block-specific types owning their delimiters
//! - **`classify`**: `MarkdownLineClassifier`
//! - **`builder`**: `BlockBuilder`
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - Nesting of quotes and lists is bounded by the builder's depth limit
//! - Unrecognised syntax degrades to paragraph text; there is no parse error

pub mod builder;
pub mod classify;
pub mod kinds;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
