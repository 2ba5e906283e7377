//! # Inline Span Tokenizer
//!
//! Cursor-based inline scanning with explicit raw zones.
//!
//! Scanning produces a flat `InlineToken` stream which is then lowered into
//! `text` nodes carrying zero or one mark. No regex state survives a call.
//!
//! ## Modules
//!
//! - **`types`**: `InlineToken`
//! - **`kinds`**: constructs owning their delimiters (CodeSpan, Link, Emphasis)
//! - **`cursor`**: `Cursor` for byte-level scanning
//! - **`parser`**: `tokenize()` and `parse_inline()` with `try_*` helpers
//!
//! ## Precedence
//!
//! Per position: code span, link, bold, italic, strikethrough. Code spans are
//! raw zones: `` `**x**` `` is code, not bold.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{parse_inline, tokenize};
pub use types::InlineToken;
