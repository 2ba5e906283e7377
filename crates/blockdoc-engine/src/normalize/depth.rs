//! Keeps finished trees inside the nesting limit the renderers enforce.
//!
//! Converters check the limit as they descend, but list items, table rows
//! and accordion items add tree levels below the point where it was
//! checked. This pass measures the finished tree and flattens any block that
//! still reaches past the limit into a paragraph of its text.

use crate::model::{Node, NodeKind};

use super::literal_paragraph;

/// Tree levels below `node` that the renderers descend into. Inline content
/// of textblocks does not count.
pub fn height(node: &Node) -> usize {
    if node.kind.is_textblock() || node.kind.is_leaf() {
        return 0;
    }
    node.content
        .iter()
        .map(|child| height(child) + 1)
        .max()
        .unwrap_or(0)
}

/// Containers whose children may be any block, so a child can be replaced
/// by a paragraph without breaking the parent's shape.
fn holds_blocks(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Blockquote
            | NodeKind::ListItem
            | NodeKind::TaskItem
            | NodeKind::Column
            | NodeKind::AccordionContent
            | NodeKind::TableCell
            | NodeKind::TableHeader
    )
}

/// Flattens blocks so that no node of `blocks` sits deeper than
/// `max_depth` once they are placed at the top of a document.
pub fn settle_depth(blocks: &mut [Node], max_depth: usize) {
    settle_blocks(blocks, 0, max_depth);
}

fn settle_blocks(blocks: &mut [Node], depth: usize, max_depth: usize) {
    for block in blocks {
        if depth + height(block) <= max_depth {
            continue;
        }
        settle_node(block, depth, max_depth);
        if depth + height(block) > max_depth {
            log::debug!("{} at depth {depth} passes the nesting limit, flattening", block.kind);
            *block = literal_paragraph(&block.plain_text());
        }
    }
}

fn settle_node(node: &mut Node, depth: usize, max_depth: usize) {
    if holds_blocks(node.kind) {
        settle_blocks(&mut node.content, depth + 1, max_depth);
    } else {
        for child in &mut node.content {
            settle_node(child, depth + 1, max_depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn para(text: &str) -> Node {
        Node::paragraph(vec![Node::text(text)])
    }

    fn quotes(levels: usize, inner: Node) -> Node {
        (0..levels).fold(inner, |node, _| {
            Node::with_content(NodeKind::Blockquote, vec![node])
        })
    }

    #[test]
    fn height_ignores_inline_content() {
        assert_eq!(height(&para("x")), 0);
        assert_eq!(height(&quotes(3, para("x"))), 3);
    }

    #[test]
    fn trees_within_the_limit_are_untouched() {
        let mut blocks = vec![quotes(4, para("x"))];
        let before = blocks.clone();
        settle_depth(&mut blocks, 4);
        assert_eq!(blocks, before);
    }

    #[test]
    fn deepest_fitting_slot_is_flattened() {
        let mut blocks = vec![quotes(6, para("x"))];
        settle_depth(&mut blocks, 4);
        assert_eq!(height(&blocks[0]), 4);
        assert_eq!(blocks[0].plain_text(), "x");
    }

    #[test]
    fn fixed_wrappers_flatten_the_enclosing_block() {
        let item = Node::with_content(
            NodeKind::AccordionItem,
            vec![
                Node::with_content(NodeKind::AccordionTitle, vec![Node::text("T")]),
                Node::with_content(NodeKind::AccordionContent, vec![para("body")]),
            ],
        );
        let group = Node::with_content(NodeKind::AccordionGroup, vec![item]);
        let mut blocks = vec![Node::with_content(NodeKind::Blockquote, vec![group])];

        settle_depth(&mut blocks, 3);

        assert_eq!(blocks[0].kind, NodeKind::Blockquote);
        assert_eq!(blocks[0].content, vec![para("T body")]);
    }
}
