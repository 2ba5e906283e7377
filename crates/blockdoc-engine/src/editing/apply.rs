use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Document, IdGenerator, Node};
use crate::normalize::{assign_block_ids, normalize_blocks};
use crate::options::EngineOptions;

use super::ops::{EditAction, EditOperation, Target};
use super::resolve::{Bound, TargetResolver};
use super::structure::{BlockSummary, preview, summarize};

/// Result of applying a batch of operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub document: Document,
    pub operations_applied: usize,
    pub structure_before: Vec<BlockSummary>,
    pub structure_after: Vec<BlockSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Why an operation was skipped. Rendered into the outcome's warnings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("target {0} not found")]
    TargetNotFound(Target),
    #[error("end target {0} not found")]
    EndTargetNotFound(Target),
    #[error("a target is required")]
    MissingTarget,
    #[error("content is required")]
    MissingContent,
    #[error("content produced no blocks")]
    EmptyContent,
    #[error("document has no blocks to target")]
    EmptyDocument,
}

/// Applies `operations` in order to a copy of `doc`.
///
/// New blocks get IDs from `ids`; blocks that are not touched keep theirs.
/// Skipped operations leave the document as it was and add a warning.
pub fn apply_edits(
    doc: &Document,
    operations: &[EditOperation],
    options: &EngineOptions,
    ids: &mut impl IdGenerator,
) -> EditOutcome {
    let structure_before = summarize(doc, options.preview_chars);
    let mut blocks = doc.content.clone();
    let mut applied = 0;
    let mut warnings = vec![];

    for (n, op) in operations.iter().enumerate() {
        match apply_one(&mut blocks, op, options, ids) {
            Ok(()) => applied += 1,
            Err(reason) => {
                let warning = format!("operation {} ({}): {reason}", n + 1, op.action);
                log::warn!("skipping {warning}");
                warnings.push(warning);
            }
        }
    }

    let document = Document::new(blocks);
    log::debug!(
        "applied {applied}/{} operations, {} blocks",
        operations.len(),
        document.len()
    );
    EditOutcome {
        structure_after: summarize(&document, options.preview_chars),
        document,
        operations_applied: applied,
        structure_before,
        warnings,
    }
}

fn apply_one(
    blocks: &mut Vec<Node>,
    op: &EditOperation,
    options: &EngineOptions,
    ids: &mut impl IdGenerator,
) -> Result<(), SkipReason> {
    let resolver = TargetResolver::new(blocks.iter().map(|b| preview(b, options.preview_chars)));

    match op.action {
        EditAction::Append => {
            let content = convert_content(op.content.as_ref(), options, ids)?;
            blocks.extend(content);
        }
        EditAction::InsertBefore => {
            let at = match &op.target {
                None => 0,
                Some(target) => resolver
                    .resolve(target, 0, Bound::Insertion)
                    .ok_or_else(|| SkipReason::TargetNotFound(target.clone()))?,
            };
            let content = convert_content(op.content.as_ref(), options, ids)?;
            blocks.splice(at..at, content);
        }
        EditAction::InsertAfter => {
            let at = match &op.target {
                None => blocks.len(),
                Some(target) => resolver.range(target, op.end_target.as_ref())?.end() + 1,
            };
            let content = convert_content(op.content.as_ref(), options, ids)?;
            blocks.splice(at..at, content);
        }
        EditAction::Replace => {
            let target = op.target.as_ref().ok_or(SkipReason::MissingTarget)?;
            let range = resolver.range(target, op.end_target.as_ref())?;
            let content = convert_content(op.content.as_ref(), options, ids)?;
            blocks.splice(range, content);
        }
        EditAction::Remove => {
            let target = op.target.as_ref().ok_or(SkipReason::MissingTarget)?;
            let range = resolver.range(target, op.end_target.as_ref())?;
            blocks.drain(range);
            if blocks.is_empty() {
                blocks.push(Node::empty_paragraph());
                assign_block_ids(blocks, ids);
            }
        }
    }
    Ok(())
}

fn convert_content(
    content: Option<&Value>,
    options: &EngineOptions,
    ids: &mut impl IdGenerator,
) -> Result<Vec<Node>, SkipReason> {
    let content = content
        .filter(|c| !c.is_null())
        .ok_or(SkipReason::MissingContent)?;
    let blocks = normalize_blocks(content, options, ids);
    if blocks.is_empty() {
        return Err(SkipReason::EmptyContent);
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeKind, SequentialIds};
    use crate::normalize::normalize;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn three_blocks(ids: &mut SequentialIds) -> Document {
        normalize(&json!("# Intro\n\nBody text\n\n## Outro"), ids)
    }

    fn run(doc: &Document, ops: Vec<EditOperation>, ids: &mut SequentialIds) -> EditOutcome {
        apply_edits(doc, &ops, &EngineOptions::default(), ids)
    }

    fn previews(doc: &Document) -> Vec<String> {
        doc.content.iter().map(|n| preview(n, 120)).collect()
    }

    #[test]
    fn append_simplified_heading() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let op = EditOperation::new(EditAction::Append)
            .with_content(json!([{"type": "heading", "level": 2, "text": "Done"}]));
        let outcome = run(&doc, vec![op], &mut ids);

        assert_eq!(outcome.operations_applied, 1);
        assert_eq!(outcome.document.len(), 4);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.document.content[3].level(), 2);
        assert_eq!(outcome.structure_before.len(), 3);
        assert_eq!(outcome.structure_after.len(), 4);
    }

    #[test]
    fn unresolved_target_warns_and_leaves_document() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let op = EditOperation::new(EditAction::Replace)
            .with_target("Nonexistent")
            .with_content(json!("x"));
        let outcome = run(&doc, vec![op], &mut ids);

        assert_eq!(outcome.operations_applied, 0);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("\"Nonexistent\""));
        assert_eq!(outcome.document, doc);
    }

    #[test]
    fn removing_everything_leaves_one_paragraph() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let op = EditOperation::new(EditAction::Remove)
            .with_target(0)
            .with_end_target(99);
        let outcome = run(&doc, vec![op], &mut ids);

        assert_eq!(outcome.operations_applied, 1);
        assert_eq!(outcome.document.len(), 1);
        assert_eq!(outcome.document.content[0].kind, NodeKind::Paragraph);
        assert!(outcome.document.content[0].block_id().is_some());
    }

    #[test]
    fn insert_before_and_after_text_targets() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let outcome = run(
            &doc,
            vec![
                EditOperation::new(EditAction::InsertBefore)
                    .with_target("intro")
                    .with_content(json!("Preface")),
                EditOperation::new(EditAction::InsertAfter)
                    .with_target("body")
                    .with_content(json!([{"type": "divider"}])),
            ],
            &mut ids,
        );
        assert_eq!(outcome.operations_applied, 2);
        assert_eq!(
            previews(&outcome.document),
            vec!["Preface", "Intro", "Body text", "[Divider]", "Outro"]
        );
    }

    #[test]
    fn replace_range_keeps_untouched_ids() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let outro_id = doc.content[2].block_id().map(str::to_string);
        let op = EditOperation::new(EditAction::Replace)
            .with_target(0)
            .with_end_target("body")
            .with_content(json!("New start"));
        let outcome = run(&doc, vec![op], &mut ids);

        assert_eq!(previews(&outcome.document), vec!["New start", "Outro"]);
        assert_eq!(
            outcome.document.content[1].block_id().map(str::to_string),
            outro_id
        );
        assert_ne!(outcome.document.content[0].block_id(), doc.content[0].block_id());
    }

    #[test]
    fn operations_see_earlier_results() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let outcome = run(
            &doc,
            vec![
                EditOperation::new(EditAction::Append).with_content(json!("Appendix")),
                EditOperation::new(EditAction::Remove).with_target("appendix"),
            ],
            &mut ids,
        );
        assert_eq!(outcome.operations_applied, 2);
        assert_eq!(outcome.document.len(), 3);
    }

    #[test]
    fn missing_pieces_are_skipped_not_fatal() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let outcome = run(
            &doc,
            vec![
                EditOperation::new(EditAction::Replace).with_content(json!("x")),
                EditOperation::new(EditAction::Append),
                EditOperation::new(EditAction::Append).with_content(json!([])),
                EditOperation::new(EditAction::InsertAfter).with_content(json!("tail")),
            ],
            &mut ids,
        );
        assert_eq!(outcome.operations_applied, 1);
        assert_eq!(
            outcome.warnings,
            vec![
                "operation 1 (replace): a target is required",
                "operation 2 (append): content is required",
                "operation 3 (append): content produced no blocks",
            ]
        );
        assert_eq!(previews(&outcome.document).last().map(String::as_str), Some("tail"));
    }

    #[test]
    fn insert_before_without_target_goes_first() {
        let mut ids = SequentialIds::default();
        let doc = three_blocks(&mut ids);
        let op = EditOperation::new(EditAction::InsertBefore).with_content(json!("Top"));
        let outcome = run(&doc, vec![op], &mut ids);
        assert_eq!(previews(&outcome.document)[0], "Top");
    }

    #[test]
    fn outcome_serializes_without_empty_warnings() {
        let mut ids = SequentialIds::default();
        let doc = Document::new(vec![Node::empty_paragraph()]);
        let outcome = run(&doc, vec![], &mut ids);
        let value = serde_json::to_value(&outcome).unwrap();
        assert!(value.get("warnings").is_none());
        assert_eq!(value["operations_applied"], 0);
    }
}
