//! Structural repair: containers that must not be empty get a placeholder,
//! and children of constrained containers are wrapped into the expected kind.

use crate::model::{Node, NodeKind};

/// The child kind a container requires, for containers that constrain it.
pub fn expected_child(parent: NodeKind) -> Option<NodeKind> {
    match parent {
        NodeKind::BulletList | NodeKind::OrderedList => Some(NodeKind::ListItem),
        NodeKind::TaskList => Some(NodeKind::TaskItem),
        NodeKind::Table => Some(NodeKind::TableRow),
        NodeKind::TableRow => Some(NodeKind::TableCell),
        NodeKind::Columns => Some(NodeKind::Column),
        NodeKind::AccordionGroup => Some(NodeKind::AccordionItem),
        _ => None,
    }
}

fn accepts(parent: NodeKind, child: NodeKind) -> bool {
    match expected_child(parent) {
        Some(NodeKind::TableCell) => matches!(child, NodeKind::TableCell | NodeKind::TableHeader),
        Some(expected) => child == expected,
        None => true,
    }
}

/// Wraps `child` until it is a valid child of `parent`. Text nodes are
/// first lifted into a paragraph.
pub fn fit_child(parent: NodeKind, child: Node) -> Node {
    let child = if child.kind == NodeKind::Text {
        Node::paragraph(vec![child])
    } else {
        child
    };
    match expected_child(parent) {
        Some(expected) if !accepts(parent, child.kind) => wrap(expected, child),
        _ => child,
    }
}

fn wrap(kind: NodeKind, child: Node) -> Node {
    match kind {
        NodeKind::AccordionItem => Node::with_content(
            NodeKind::AccordionItem,
            vec![
                Node::new(NodeKind::AccordionTitle),
                Node::with_content(NodeKind::AccordionContent, vec![child]),
            ],
        ),
        NodeKind::TaskItem => {
            Node::with_content(NodeKind::TaskItem, vec![child]).with_attr("checked", false)
        }
        _ => Node::with_content(kind, vec![fit_child(kind, child)]),
    }
}

/// Minimal valid content for an empty container of `kind`. Always ends in an
/// empty paragraph.
pub fn placeholder_content(kind: NodeKind) -> Vec<Node> {
    match (kind, expected_child(kind)) {
        (NodeKind::AccordionItem, _) => vec![
            Node::new(NodeKind::AccordionTitle),
            Node::with_content(NodeKind::AccordionContent, vec![Node::empty_paragraph()]),
        ],
        (_, Some(child)) => vec![wrap(child, Node::empty_paragraph())],
        (_, None) => vec![Node::empty_paragraph()],
    }
}

/// Fills an empty container with its placeholder content.
pub fn ensure_content(node: &mut Node) {
    if node.kind.requires_children() && node.content.is_empty() {
        log::debug!("empty {} gets placeholder content", node.kind);
        node.content = placeholder_content(node.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds_along_first_child(node: &Node) -> Vec<NodeKind> {
        let mut out = vec![node.kind];
        let mut cur = node;
        while let Some(first) = cur.content.first() {
            out.push(first.kind);
            cur = first;
        }
        out
    }

    #[rstest]
    #[case(NodeKind::BulletList, vec![NodeKind::BulletList, NodeKind::ListItem, NodeKind::Paragraph])]
    #[case(NodeKind::TaskList, vec![NodeKind::TaskList, NodeKind::TaskItem, NodeKind::Paragraph])]
    #[case(NodeKind::Table, vec![NodeKind::Table, NodeKind::TableRow, NodeKind::TableCell, NodeKind::Paragraph])]
    #[case(NodeKind::Blockquote, vec![NodeKind::Blockquote, NodeKind::Paragraph])]
    #[case(NodeKind::AccordionGroup, vec![NodeKind::AccordionGroup, NodeKind::AccordionItem, NodeKind::AccordionTitle])]
    fn empty_containers_get_kind_appropriate_placeholders(
        #[case] kind: NodeKind,
        #[case] path: Vec<NodeKind>,
    ) {
        let mut node = Node::new(kind);
        ensure_content(&mut node);
        assert_eq!(kinds_along_first_child(&node), path);
    }

    #[test]
    fn textblocks_stay_empty() {
        let mut node = Node::new(NodeKind::Heading);
        ensure_content(&mut node);
        assert!(node.content.is_empty());
    }

    #[test]
    fn stray_paragraph_in_list_is_wrapped() {
        let fitted = fit_child(NodeKind::BulletList, Node::paragraph(vec![Node::text("x")]));
        assert_eq!(fitted.kind, NodeKind::ListItem);
        assert_eq!(fitted.plain_text(), "x");
    }

    #[test]
    fn header_cells_are_accepted_in_rows() {
        let header = Node::with_content(NodeKind::TableHeader, vec![Node::empty_paragraph()]);
        assert_eq!(fit_child(NodeKind::TableRow, header.clone()), header);
    }
}
