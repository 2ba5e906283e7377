//! # Block Kinds
//!
//! Block-specific types that own their syntax delimiters. Detection rules for
//! each construct live next to its delimiter constants, not in the builder.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod image;
pub mod list_item;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceOpen};
pub use heading::Heading;
pub use image::ImageLine;
pub use list_item::{ListItem, ListKind, ListMarker, dedent, indent_width};
pub use paragraph::Paragraph;
pub use table::TableRow;
pub use thematic_break::ThematicBreak;
