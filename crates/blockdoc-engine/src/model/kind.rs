use serde::{Deserialize, Serialize};

/// The closed vocabulary of node types in the canonical tree.
///
/// The serialized tag of each variant is the wire `type` string. `doc` is not a
/// kind: the root is modelled separately as [`crate::model::Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading")]
    Heading,
    #[serde(rename = "bulletList")]
    BulletList,
    #[serde(rename = "orderedList")]
    OrderedList,
    #[serde(rename = "listItem")]
    ListItem,
    #[serde(rename = "taskList")]
    TaskList,
    #[serde(rename = "taskItem")]
    TaskItem,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "tableRow")]
    TableRow,
    #[serde(rename = "tableHeader")]
    TableHeader,
    #[serde(rename = "tableCell")]
    TableCell,
    #[serde(rename = "blockquote")]
    Blockquote,
    #[serde(rename = "codeBlock")]
    CodeBlock,
    #[serde(rename = "horizontalRule")]
    HorizontalRule,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "columns")]
    Columns,
    #[serde(rename = "column")]
    Column,
    #[serde(rename = "accordionGroup")]
    AccordionGroup,
    #[serde(rename = "accordionItem")]
    AccordionItem,
    #[serde(rename = "accordionTitle")]
    AccordionTitle,
    #[serde(rename = "accordionContent")]
    AccordionContent,
    #[serde(rename = "database-table")]
    DatabaseTable,
    #[serde(rename = "spreadsheet")]
    Spreadsheet,
    #[serde(rename = "mindmap")]
    Mindmap,
    #[serde(rename = "task-mention")]
    TaskMention,
    #[serde(rename = "task-section")]
    TaskSection,
    #[serde(rename = "text")]
    Text,
}

impl NodeKind {
    pub const ALL: [NodeKind; 27] = [
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::BulletList,
        NodeKind::OrderedList,
        NodeKind::ListItem,
        NodeKind::TaskList,
        NodeKind::TaskItem,
        NodeKind::Table,
        NodeKind::TableRow,
        NodeKind::TableHeader,
        NodeKind::TableCell,
        NodeKind::Blockquote,
        NodeKind::CodeBlock,
        NodeKind::HorizontalRule,
        NodeKind::Image,
        NodeKind::Columns,
        NodeKind::Column,
        NodeKind::AccordionGroup,
        NodeKind::AccordionItem,
        NodeKind::AccordionTitle,
        NodeKind::AccordionContent,
        NodeKind::DatabaseTable,
        NodeKind::Spreadsheet,
        NodeKind::Mindmap,
        NodeKind::TaskMention,
        NodeKind::TaskSection,
        NodeKind::Text,
    ];

    /// The wire `type` string for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::TaskList => "taskList",
            NodeKind::TaskItem => "taskItem",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableHeader => "tableHeader",
            NodeKind::TableCell => "tableCell",
            NodeKind::Blockquote => "blockquote",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::HorizontalRule => "horizontalRule",
            NodeKind::Image => "image",
            NodeKind::Columns => "columns",
            NodeKind::Column => "column",
            NodeKind::AccordionGroup => "accordionGroup",
            NodeKind::AccordionItem => "accordionItem",
            NodeKind::AccordionTitle => "accordionTitle",
            NodeKind::AccordionContent => "accordionContent",
            NodeKind::DatabaseTable => "database-table",
            NodeKind::Spreadsheet => "spreadsheet",
            NodeKind::Mindmap => "mindmap",
            NodeKind::TaskMention => "task-mention",
            NodeKind::TaskSection => "task-section",
            NodeKind::Text => "text",
        }
    }

    /// Looks up a kind by its wire `type` string.
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Kinds whose payload lives outside the document.
    pub fn is_opaque(self) -> bool {
        matches!(
            self,
            NodeKind::DatabaseTable | NodeKind::Spreadsheet | NodeKind::Mindmap
        )
    }

    /// Cross-reference kinds pointing at tasks held elsewhere.
    pub fn is_reference(self) -> bool {
        matches!(self, NodeKind::TaskMention | NodeKind::TaskSection)
    }

    /// Every kind except inline text receives a `blockId`.
    pub fn is_identity_eligible(self) -> bool {
        !matches!(self, NodeKind::Text)
    }

    /// Kinds whose children are inline `text` nodes.
    pub fn is_textblock(self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::CodeBlock
                | NodeKind::AccordionTitle
        )
    }

    /// Kinds that never carry children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::HorizontalRule
                | NodeKind::Image
                | NodeKind::DatabaseTable
                | NodeKind::Spreadsheet
                | NodeKind::Mindmap
                | NodeKind::TaskMention
                | NodeKind::TaskSection
                | NodeKind::Text
        )
    }

    /// Container kinds that must hold at least one child to be renderable.
    pub fn requires_children(self) -> bool {
        !self.is_leaf() && !self.is_textblock()
    }

    /// The `attrs` key holding the external identifier of opaque and
    /// reference blocks.
    pub fn reference_attr(self) -> Option<&'static str> {
        match self {
            NodeKind::DatabaseTable => Some("tableId"),
            NodeKind::Spreadsheet => Some("spreadsheetId"),
            NodeKind::Mindmap => Some("mindmapId"),
            NodeKind::TaskMention => Some("taskId"),
            NodeKind::TaskSection => Some("sectionId"),
            _ => None,
        }
    }

    /// Human label used in placeholders for blocks the engine cannot inline.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::DatabaseTable => "Database table",
            NodeKind::Spreadsheet => "Spreadsheet",
            NodeKind::Mindmap => "Mind map",
            NodeKind::TaskMention => "Task",
            NodeKind::TaskSection => "Task section",
            NodeKind::Image => "Image",
            NodeKind::HorizontalRule => "Divider",
            other => other.tag(),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
