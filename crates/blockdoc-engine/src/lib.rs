pub mod editing;
pub mod engine;
pub mod model;
pub mod normalize;
pub mod options;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use editing::{BlockSummary, EditAction, EditOperation, EditOutcome, EditRequest, Target, apply_edits};
pub use engine::ContentEngine;
pub use model::{Document, IdGenerator, Mark, Node, NodeKind, SequentialIds, UuidIds};
pub use normalize::{normalize, normalize_with};
pub use options::EngineOptions;
pub use parsing::{parse_document, parse_markdown};
pub use render::{to_html, to_markdown};
