use std::fmt::Write;

use crate::model::{Document, Mark, Node, NodeKind};
use crate::parsing::blocks::kinds::{CodeFence, ListItem, TableRow, ThematicBreak};

use super::error::RenderError;

/// Separator between sibling blocks.
const BLOCK_GAP: &str = "\n\n";

/// Renders canonical trees to Markdown.
///
/// Output is lossy for opaque and reference blocks, which become
/// `> [Label: id]` placeholder lines, and for columns, which are flattened
/// with `---` dividers.
pub struct MarkdownRenderer {
    max_depth: usize,
}

impl MarkdownRenderer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn render(&self, doc: &Document) -> Result<String, RenderError> {
        self.blocks(&doc.content, 0)
    }

    /// Renders a run of sibling blocks separated by blank lines. Blocks that
    /// render to nothing (empty paragraphs) are skipped.
    pub fn blocks(&self, nodes: &[Node], depth: usize) -> Result<String, RenderError> {
        let mut parts = Vec::with_capacity(nodes.len());
        for node in nodes {
            let rendered = self.block(node, depth)?;
            if !rendered.is_empty() {
                parts.push(rendered);
            }
        }
        Ok(parts.join(BLOCK_GAP))
    }

    pub fn block(&self, node: &Node, depth: usize) -> Result<String, RenderError> {
        if depth > self.max_depth {
            return Err(RenderError::TooDeep {
                limit: self.max_depth,
            });
        }

        let out = match node.kind {
            NodeKind::Paragraph => inline(&node.content)?,
            NodeKind::Heading => {
                let text = inline(&node.content)?;
                format!("{} {}", "#".repeat(node.level() as usize), text)
                    .trim_end()
                    .to_string()
            }
            NodeKind::CodeBlock => {
                let code = node.plain_text();
                let fence = CodeFence::fence_for(&code);
                let lang = node.language().unwrap_or("");
                if code.is_empty() {
                    format!("{fence}{lang}\n{fence}")
                } else {
                    format!("{fence}{lang}\n{code}\n{fence}")
                }
            }
            NodeKind::HorizontalRule => ThematicBreak::CANONICAL.to_string(),
            NodeKind::Image => image(node),
            NodeKind::BulletList | NodeKind::OrderedList | NodeKind::TaskList => {
                self.list(node, 0, depth)?
            }
            NodeKind::Table => self.table(node, depth)?,
            NodeKind::Blockquote => {
                let inner = self.blocks(&node.content, depth + 1)?;
                quote_lines(&inner)
            }
            NodeKind::Columns => {
                let mut columns = Vec::with_capacity(node.content.len());
                for column in &node.content {
                    let rendered = self.block(column, depth + 1)?;
                    if !rendered.is_empty() {
                        columns.push(rendered);
                    }
                }
                columns.join(&format!("{BLOCK_GAP}{}{BLOCK_GAP}", ThematicBreak::CANONICAL))
            }
            NodeKind::AccordionTitle => {
                let title = inline(&node.content)?;
                if title.is_empty() {
                    title
                } else {
                    format!("**{title}**")
                }
            }
            NodeKind::AccordionItem => {
                let body = self.blocks(&node.content, depth + 1)?;
                match node.attr_str("icon").filter(|i| !i.is_empty()) {
                    Some(icon) => format!("{icon} {body}").trim_end().to_string(),
                    None => body,
                }
            }
            NodeKind::ListItem | NodeKind::TaskItem => {
                // Outside a list: render as a one-item list of the matching kind.
                let list_kind = if node.kind == NodeKind::TaskItem {
                    NodeKind::TaskList
                } else {
                    NodeKind::BulletList
                };
                let wrapper = Node::with_content(list_kind, vec![node.clone()]);
                self.list(&wrapper, 0, depth)?
            }
            NodeKind::AccordionGroup
            | NodeKind::AccordionContent
            | NodeKind::Column
            | NodeKind::TableRow
            | NodeKind::TableHeader
            | NodeKind::TableCell => self.blocks(&node.content, depth + 1)?,
            NodeKind::DatabaseTable
            | NodeKind::Spreadsheet
            | NodeKind::Mindmap
            | NodeKind::TaskMention
            | NodeKind::TaskSection => format!("> {}", placeholder_label(node)),
            NodeKind::Text => inline(std::slice::from_ref(node))?,
        };
        Ok(out)
    }

    /// Renders a list at an indentation level. The first paragraph of an item
    /// shares the marker line; everything else is indented one level deeper.
    fn list(&self, list: &Node, indent: usize, depth: usize) -> Result<String, RenderError> {
        if depth > self.max_depth {
            return Err(RenderError::TooDeep {
                limit: self.max_depth,
            });
        }

        let pad = ListItem::NEST_INDENT.repeat(indent);
        let child_pad = ListItem::NEST_INDENT.repeat(indent + 1);
        let mut lines: Vec<String> = vec![];

        for (i, item) in list.content.iter().enumerate() {
            let marker = match list.kind {
                NodeKind::OrderedList => format!("{}. ", list.start().saturating_add(i as u64)),
                NodeKind::TaskList => {
                    let check = if item.checked() {
                        ListItem::TASK_DONE
                    } else {
                        ListItem::TASK_OPEN
                    };
                    format!("{}{}", ListItem::BULLET, check)
                }
                _ => ListItem::BULLET.to_string(),
            };

            let mut children = item.content.iter().peekable();
            let lead = match children.peek() {
                Some(first) if first.kind == NodeKind::Paragraph => {
                    let text = inline(&first.content)?;
                    children.next();
                    text
                }
                _ => String::new(),
            };

            let mut lead_lines = lead.lines();
            let first_line = format!("{pad}{marker}{}", lead_lines.next().unwrap_or(""));
            lines.push(first_line.trim_end().to_string());
            for cont in lead_lines {
                lines.push(format!("{child_pad}{cont}"));
            }

            for child in children {
                match child.kind {
                    NodeKind::BulletList | NodeKind::OrderedList | NodeKind::TaskList => {
                        lines.push(self.list(child, indent + 1, depth + 1)?);
                    }
                    _ => {
                        let rendered = self.block(child, depth + 1)?;
                        for l in rendered.lines() {
                            if l.is_empty() {
                                lines.push(String::new());
                            } else {
                                lines.push(format!("{child_pad}{l}"));
                            }
                        }
                    }
                }
            }
        }

        Ok(lines.join("\n"))
    }

    /// Pads every cell to its column's widest rendered cell (min 3). The first
    /// row is always emitted as the header.
    fn table(&self, table: &Node, depth: usize) -> Result<String, RenderError> {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.content.len());
        for row in &table.content {
            let mut cells = Vec::with_capacity(row.content.len());
            for cell in &row.content {
                let text = self.blocks(&cell.content, depth + 2)?;
                cells.push(TableRow::escape_cell(&text));
            }
            rows.push(cells);
        }
        let Some((header, body)) = rows.split_first() else {
            return Ok(String::new());
        };

        let cols = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let mut widths = vec![TableRow::MIN_WIDTH; cols];
        for row in &rows {
            for (c, cell) in row.iter().enumerate() {
                widths[c] = widths[c].max(cell.chars().count());
            }
        }

        let format_row = |cells: &[String]| -> Result<String, RenderError> {
            let mut line = String::from("|");
            for (c, width) in widths.iter().enumerate() {
                let cell = cells.get(c).map_or("", String::as_str);
                write!(line, " {cell:<width$} |")?;
            }
            Ok(line)
        };

        let mut lines = vec![format_row(header)?];
        let mut separator = String::from("|");
        for width in &widths {
            write!(separator, " {} |", "-".repeat(*width))?;
        }
        lines.push(separator);
        for row in body {
            lines.push(format_row(row)?);
        }
        Ok(lines.join("\n"))
    }
}

/// Renders inline `text` nodes, applying each node's marks.
pub fn inline(nodes: &[Node]) -> Result<String, RenderError> {
    let mut out = String::new();
    for node in nodes {
        match node.kind {
            NodeKind::Text => out.push_str(&marked(node)),
            NodeKind::TaskMention | NodeKind::TaskSection => {
                write!(out, "{}", placeholder_label(node))?;
            }
            _ => out.push_str(&node.plain_text()),
        }
    }
    Ok(out)
}

fn marked(node: &Node) -> String {
    let text = node.text.as_deref().unwrap_or("");
    if text.is_empty() {
        return String::new();
    }
    let mut s = if node.has_mark(&Mark::Code) {
        format!("`{text}`")
    } else {
        text.to_string()
    };
    if node.has_mark(&Mark::Bold) {
        s = format!("**{s}**");
    }
    if node.has_mark(&Mark::Italic) {
        s = format!("*{s}*");
    }
    if node.has_mark(&Mark::Strike) {
        s = format!("~~{s}~~");
    }
    if let Some(href) = node.marks.iter().find_map(Mark::href) {
        s = format!("[{s}]({href})");
    }
    s
}

fn image(node: &Node) -> String {
    let src = node.attr_str("src").unwrap_or("");
    let alt = node.attr_str("alt").unwrap_or("");
    match node.attr_str("title").filter(|t| !t.is_empty()) {
        Some(title) => format!("![{alt}]({src} \"{title}\")"),
        None => format!("![{alt}]({src})"),
    }
}

/// `[Label: id]`, or `[Label]` when the external identifier is missing.
pub fn placeholder_label(node: &Node) -> String {
    match node.reference_id() {
        Some(id) => format!("[{}: {}]", node.kind.label(), id),
        None => format!("[{}]", node.kind.label()),
    }
}

fn quote_lines(inner: &str) -> String {
    if inner.is_empty() {
        return ">".to_string();
    }
    inner
        .lines()
        .map(|l| if l.is_empty() { ">".to_string() } else { format!("> {l}") })
        .collect::<Vec<_>>()
        .join("\n")
}
