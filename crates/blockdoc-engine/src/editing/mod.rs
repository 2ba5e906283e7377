/*!
 * # Structural Editor
 *
 * Applies targeted edits to the top level of a document without the caller
 * resending the whole tree.
 *
 * ## Pipeline
 *
 * For every [`EditOperation`], in order, against the progressively updated
 * block list:
 *
 * 1. **Target resolution**: numeric targets are clamped top-level indices,
 *    string targets match block previews case-insensitively
 *    ([`resolve`])
 * 2. **Content conversion**: the payload goes through the normalizer, so it
 *    accepts simplified blocks, raw nodes or Markdown
 * 3. **Splice**: insert, replace or remove the resolved range
 *
 * An operation that cannot be applied is skipped with a warning; the batch
 * always runs to the end.
 *
 * ## Outcome
 *
 * [`EditOutcome`] carries the new document, the count of applied operations,
 * warnings, and [`BlockSummary`] lists of the structure before and after so
 * callers can verify what changed.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blockdoc_engine::editing::{EditAction, EditOperation, apply_edits};
 * use blockdoc_engine::model::SequentialIds;
 * use blockdoc_engine::{EngineOptions, normalize};
 *
 * let mut ids = SequentialIds::default();
 * let doc = normalize(&serde_json::json!("# Notes\n\nFirst"), &mut ids);
 * let ops = vec![EditOperation::new(EditAction::Append)
 *     .with_content(serde_json::json!([{"type": "paragraph", "text": "Second"}]))];
 *
 * let outcome = apply_edits(&doc, &ops, &EngineOptions::default(), &mut ids);
 * assert_eq!(outcome.operations_applied, 1);
 * assert_eq!(outcome.document.len(), 3);
 * ```
 */

pub mod apply;
pub mod ops;
pub mod resolve;
pub mod structure;

pub use apply::{EditOutcome, SkipReason, apply_edits};
pub use ops::{EditAction, EditOperation, EditRequest, RequestError, Target};
pub use resolve::{Bound, TargetResolver};
pub use structure::{BlockSummary, preview, summarize};
