//! # Inline Kinds
//!
//! Inline constructs that own their syntax delimiters. The scanner calls these
//! constants; it never hardcodes `**` or `` ` ``.
//!
//! - **`CodeSpan`**: `` ` `` raw zone, suppresses other parsing
//! - **`Link`**: `[text](href)`
//! - **`Emphasis`**: `**bold**`, `*italic*`, `~~strike~~`

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use link::Link;
