use std::fmt::Write;
use std::sync::OnceLock;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use regex::Regex;

use crate::model::{Document, Mark, Node, NodeKind};

use super::error::RenderError;

/// Link schemes kept in exported HTML. Hrefs without a scheme are relative
/// and always kept.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Renders canonical trees to an HTML fragment, one element per line at the
/// top level.
pub struct HtmlRenderer {
    max_depth: usize,
}

impl HtmlRenderer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn render(&self, doc: &Document) -> Result<String, RenderError> {
        let mut parts = Vec::with_capacity(doc.content.len());
        for node in &doc.content {
            parts.push(self.block(node, 0)?);
        }
        Ok(parts.join("\n"))
    }

    fn children(&self, node: &Node, depth: usize) -> Result<String, RenderError> {
        let mut out = String::new();
        for child in &node.content {
            out.push_str(&self.block(child, depth + 1)?);
        }
        Ok(out)
    }

    fn block(&self, node: &Node, depth: usize) -> Result<String, RenderError> {
        if depth > self.max_depth {
            return Err(RenderError::TooDeep {
                limit: self.max_depth,
            });
        }

        let mut out = String::new();
        match node.kind {
            NodeKind::Paragraph => write!(out, "<p>{}</p>", inline(&node.content)?)?,
            NodeKind::Heading => {
                let level = node.level();
                write!(out, "<h{level}>{}</h{level}>", inline(&node.content)?)?;
            }
            NodeKind::CodeBlock => {
                let code = node.plain_text();
                match node.language() {
                    Some(lang) => write!(
                        out,
                        "<pre><code class=\"language-{}\">{}</code></pre>",
                        attr(lang),
                        text(&code)
                    )?,
                    None => write!(out, "<pre><code>{}</code></pre>", text(&code))?,
                }
            }
            NodeKind::HorizontalRule => out.push_str("<hr>"),
            NodeKind::Image => {
                write!(out, "<img src=\"{}\"", attr(node.attr_str("src").unwrap_or("")))?;
                write!(out, " alt=\"{}\"", attr(node.attr_str("alt").unwrap_or("")))?;
                if let Some(title) = node.attr_str("title") {
                    write!(out, " title=\"{}\"", attr(title))?;
                }
                out.push('>');
            }
            NodeKind::BulletList => write!(out, "<ul>{}</ul>", self.children(node, depth)?)?,
            NodeKind::OrderedList => match node.start() {
                1 => write!(out, "<ol>{}</ol>", self.children(node, depth)?)?,
                start => write!(
                    out,
                    "<ol start=\"{start}\">{}</ol>",
                    self.children(node, depth)?
                )?,
            },
            NodeKind::TaskList => write!(
                out,
                "<ul data-type=\"taskList\">{}</ul>",
                self.children(node, depth)?
            )?,
            NodeKind::ListItem => write!(out, "<li>{}</li>", self.children(node, depth)?)?,
            NodeKind::TaskItem => write!(
                out,
                "<li data-type=\"taskItem\" data-checked=\"{}\">{}</li>",
                node.checked(),
                self.children(node, depth)?
            )?,
            NodeKind::Table => self.table(node, depth, &mut out)?,
            NodeKind::TableRow => write!(out, "<tr>{}</tr>", self.children(node, depth)?)?,
            NodeKind::TableHeader => write!(out, "<th>{}</th>", self.cell(node, depth)?)?,
            NodeKind::TableCell => write!(out, "<td>{}</td>", self.cell(node, depth)?)?,
            NodeKind::Blockquote => write!(
                out,
                "<blockquote>{}</blockquote>",
                self.children(node, depth)?
            )?,
            NodeKind::Columns => write!(
                out,
                "<div class=\"columns\">{}</div>",
                self.children(node, depth)?
            )?,
            NodeKind::Column => {
                out.push_str("<div class=\"column\"");
                let mut style = vec![];
                if let Some(width) = node.attr("width").filter(|w| !w.is_null()) {
                    let width = width.as_str().map_or_else(|| width.to_string(), String::from);
                    style.push(format!("width: {width}"));
                }
                if let Some(bg) = node.attr_str("backgroundColor") {
                    style.push(format!("background-color: {bg}"));
                }
                if !style.is_empty() {
                    write!(out, " style=\"{}\"", attr(&style.join("; ")))?;
                }
                write!(out, ">{}</div>", self.children(node, depth)?)?;
            }
            NodeKind::AccordionGroup => write!(
                out,
                "<div data-type=\"accordionGroup\">{}</div>",
                self.children(node, depth)?
            )?,
            NodeKind::AccordionItem => {
                out.push_str("<details");
                if let Some(icon) = node.attr_str("icon") {
                    write!(out, " data-icon=\"{}\"", attr(icon))?;
                }
                write!(out, ">{}</details>", self.children(node, depth)?)?;
            }
            NodeKind::AccordionTitle => {
                write!(out, "<summary>{}</summary>", inline(&node.content)?)?
            }
            NodeKind::AccordionContent => write!(out, "<div>{}</div>", self.children(node, depth)?)?,
            NodeKind::DatabaseTable
            | NodeKind::Spreadsheet
            | NodeKind::Mindmap
            | NodeKind::TaskMention
            | NodeKind::TaskSection => placeholder(node, &mut out)?,
            NodeKind::Text => out.push_str(&inline(std::slice::from_ref(node))?),
        }
        Ok(out)
    }

    /// Cells holding a single paragraph render its inline content directly.
    fn cell(&self, cell: &Node, depth: usize) -> Result<String, RenderError> {
        match cell.content.as_slice() {
            [only] if only.kind == NodeKind::Paragraph => inline(&only.content),
            _ => self.children(cell, depth),
        }
    }

    fn table(&self, table: &Node, depth: usize, out: &mut String) -> Result<(), RenderError> {
        out.push_str("<table>");
        let header_rows = table
            .content
            .iter()
            .take_while(|row| {
                !row.content.is_empty()
                    && row.content.iter().all(|c| c.kind == NodeKind::TableHeader)
            })
            .count();
        let (head, body) = table.content.split_at(header_rows);
        if !head.is_empty() {
            out.push_str("<thead>");
            for row in head {
                out.push_str(&self.block(row, depth + 1)?);
            }
            out.push_str("</thead>");
        }
        if !body.is_empty() {
            out.push_str("<tbody>");
            for row in body {
                out.push_str(&self.block(row, depth + 1)?);
            }
            out.push_str("</tbody>");
        }
        out.push_str("</table>");
        Ok(())
    }
}

fn placeholder(node: &Node, out: &mut String) -> Result<(), RenderError> {
    write!(out, "<div data-type=\"{}\"", node.kind.tag())?;
    if let Some(id) = node.reference_id() {
        write!(out, " data-id=\"{}\"", attr(&id))?;
    }
    write!(out, ">{}</div>", text(&super::markdown::placeholder_label(node)))?;
    Ok(())
}

fn inline(nodes: &[Node]) -> Result<String, RenderError> {
    let mut out = String::new();
    for node in nodes {
        if node.kind != NodeKind::Text {
            out.push_str(&text(&node.plain_text()));
            continue;
        }
        let mut s = text(node.text.as_deref().unwrap_or("")).into_owned();
        if node.has_mark(&Mark::Code) {
            s = format!("<code>{s}</code>");
        }
        if node.has_mark(&Mark::Bold) {
            s = format!("<strong>{s}</strong>");
        }
        if node.has_mark(&Mark::Italic) {
            s = format!("<em>{s}</em>");
        }
        if node.has_mark(&Mark::Strike) {
            s = format!("<s>{s}</s>");
        }
        match node.marks.iter().find_map(Mark::href) {
            Some(href) if safe_href(href) => {
                s = format!("<a href=\"{}\">{s}</a>", attr(href));
            }
            Some(href) => log::debug!("dropping link with unsafe href {href:?}"),
            None => {}
        }
        out.push_str(&s);
    }
    Ok(out)
}

/// Browsers ignore whitespace and control characters inside a scheme, so
/// they are removed before it is read.
fn safe_href(href: &str) -> bool {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    let scheme = SCHEME.get_or_init(|| {
        Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*):").expect("Invalid scheme regex")
    });
    let compact: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    match scheme.captures(&compact) {
        Some(caps) => SAFE_SCHEMES.iter().any(|s| caps[1].eq_ignore_ascii_case(s)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(content: Vec<Node>) -> String {
        HtmlRenderer::new(32).render(&Document::new(content)).unwrap()
    }

    #[test]
    fn escapes_text_and_attributes() {
        let para = Node::paragraph(vec![Node::marked_text("<a & b>", Mark::link("/q?x=\"1\""))]);
        assert_eq!(
            render(vec![para]),
            "<p><a href=\"/q?x=&quot;1&quot;\">&lt;a &amp; b&gt;</a></p>"
        );
    }

    #[test]
    fn script_links_lose_their_anchor() {
        let para = Node::paragraph(vec![
            Node::marked_text("bad", Mark::link("JavaScript:alert(1)")),
            Node::marked_text("worse", Mark::link(" java\tscript:alert(2)")),
            Node::marked_text("ok", Mark::link("https://example.com")),
            Node::marked_text("rel", Mark::link("/docs/a:b")),
        ]);
        assert_eq!(
            render(vec![para]),
            "<p>badworse<a href=\"https://example.com\">ok</a><a href=\"/docs/a:b\">rel</a></p>"
        );
    }

    #[test]
    fn task_items_carry_checked_state() {
        let list = Node::with_content(
            NodeKind::TaskList,
            vec![
                Node::with_content(
                    NodeKind::TaskItem,
                    vec![Node::paragraph(vec![Node::text("ship")])],
                )
                .with_attr("checked", true),
            ],
        );
        assert_eq!(
            render(vec![list]),
            "<ul data-type=\"taskList\"><li data-type=\"taskItem\" data-checked=\"true\"><p>ship</p></li></ul>"
        );
    }

    #[test]
    fn header_rows_go_in_thead() {
        let cell = |kind, t: &str| {
            Node::with_content(kind, vec![Node::paragraph(vec![Node::text(t)])])
        };
        let table = Node::with_content(
            NodeKind::Table,
            vec![
                Node::with_content(NodeKind::TableRow, vec![cell(NodeKind::TableHeader, "H")]),
                Node::with_content(NodeKind::TableRow, vec![cell(NodeKind::TableCell, "v")]),
            ],
        );
        assert_eq!(
            render(vec![table]),
            "<table><thead><tr><th>H</th></tr></thead><tbody><tr><td>v</td></tr></tbody></table>"
        );
    }

    #[test]
    fn opaque_blocks_render_placeholder_divs() {
        let board = Node::new(NodeKind::Mindmap).with_attr("mindmapId", "m-1");
        assert_eq!(
            render(vec![board]),
            "<div data-type=\"mindmap\" data-id=\"m-1\">[Mind map: m-1]</div>"
        );
    }

    #[test]
    fn code_block_language_class() {
        let code = Node::code_block(Some("rust"), "a < b");
        assert_eq!(
            render(vec![code]),
            "<pre><code class=\"language-rust\">a &lt; b</code></pre>"
        );
    }
}
