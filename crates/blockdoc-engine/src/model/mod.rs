//! # Canonical Block Tree
//!
//! The typed node schema shared by every other module.
//!
//! - **`kind`**: `NodeKind`, the closed vocabulary of `type` strings
//! - **`mark`**: `Mark`, style annotations on text nodes
//! - **`node`**: `Node` and the `Document` root
//! - **`ids`**: `IdGenerator` and its production/test implementations

pub mod ids;
pub mod kind;
pub mod mark;
pub mod node;

pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use kind::NodeKind;
pub use mark::{LinkAttrs, Mark};
pub use node::{Attrs, BLOCK_ID, Document, Node};
