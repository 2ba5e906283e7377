use crate::model::{Node, NodeKind};
use crate::parsing::inline::parse_inline;

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    kinds::{
        BlockQuote, CodeFence, FenceOpen, ImageLine, ListItem, ListKind, ListMarker, Paragraph,
        TableRow, dedent, indent_width,
    },
};

/// Line look-ahead block parser.
///
/// Each `consume_*` method takes the index of the line that opened its
/// construct, pushes the finished node(s) and returns the next unconsumed
/// line index.
pub struct BlockBuilder {
    max_depth: usize,
}

impl BlockBuilder {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Parses Markdown text into top-level block nodes.
    pub fn parse(&self, text: &str) -> Vec<Node> {
        let lines: Vec<&str> = text.lines().collect();
        self.parse_lines(&lines, 0)
    }

    fn parse_lines(&self, lines: &[&str], depth: usize) -> Vec<Node> {
        let mut out = vec![];
        let mut i = 0;

        while i < lines.len() {
            i = match MarkdownLineClassifier::classify(lines[i]) {
                LineClass::Blank => i + 1,
                LineClass::FenceOpen(open) => self.consume_fence(lines, i, open, &mut out),
                LineClass::ThematicBreak => {
                    out.push(Node::new(NodeKind::HorizontalRule));
                    i + 1
                }
                LineClass::Heading { level, text } => {
                    out.push(Node::heading(level, parse_inline(text.trim())));
                    i + 1
                }
                LineClass::Quote => self.consume_quote(lines, i, depth, &mut out),
                LineClass::TableRow => self.consume_table(lines, i, &mut out),
                LineClass::ListItem(marker) => self.consume_list(lines, i, marker, depth, &mut out),
                LineClass::Image(ImageLine { alt, src, title }) => {
                    out.push(Node::image(src, Some(alt), title));
                    i + 1
                }
                LineClass::Text => self.consume_paragraph(lines, i, &mut out),
            };
        }

        out
    }

    fn consume_fence(
        &self,
        lines: &[&str],
        start: usize,
        open: FenceOpen<'_>,
        out: &mut Vec<Node>,
    ) -> usize {
        let body_start = start + 1;
        // Unterminated fence: runs to EOF.
        let close = (body_start..lines.len())
            .find(|&j| CodeFence::closes(&open, lines[j]))
            .unwrap_or(lines.len());
        let code = lines[body_start..close].join("\n");
        out.push(Node::code_block(open.language(), &code));
        (close + 1).min(lines.len())
    }

    fn consume_quote(&self, lines: &[&str], start: usize, depth: usize, out: &mut Vec<Node>) -> usize {
        let mut inner = vec![];
        let mut j = start;
        while j < lines.len() {
            match BlockQuote::strip_one(lines[j]) {
                Some(rest) => inner.push(rest),
                None => break,
            }
            j += 1;
        }

        let children = self.nested_blocks(&inner, depth);
        out.push(Node::with_content(NodeKind::Blockquote, children));
        j
    }

    fn consume_table(&self, lines: &[&str], start: usize, out: &mut Vec<Node>) -> usize {
        let end = (start..lines.len())
            .find(|&j| !TableRow::is_row(lines[j]))
            .unwrap_or(lines.len());
        let rows = &lines[start..end];
        let has_header = rows.len() >= 2 && TableRow::is_separator(rows[1]);

        let parsed: Vec<(NodeKind, Vec<String>)> = rows
            .iter()
            .enumerate()
            .filter(|(idx, _)| !(has_header && *idx == 1))
            .map(|(idx, line)| {
                let cell_kind = if has_header && idx == 0 {
                    NodeKind::TableHeader
                } else {
                    NodeKind::TableCell
                };
                (cell_kind, TableRow::split_cells(line))
            })
            .collect();

        let width = parsed.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
        let table_rows = parsed
            .into_iter()
            .map(|(cell_kind, mut cells)| {
                cells.resize(width, String::new());
                let cells = cells
                    .iter()
                    .map(|text| Node::with_content(cell_kind, vec![Node::paragraph(parse_inline(text))]))
                    .collect();
                Node::with_content(NodeKind::TableRow, cells)
            })
            .collect();

        out.push(Node::with_content(NodeKind::Table, table_rows));
        end
    }

    fn consume_list(
        &self,
        lines: &[&str],
        start: usize,
        first: ListMarker<'_>,
        depth: usize,
        out: &mut Vec<Node>,
    ) -> usize {
        let base = first.indent;
        let nested_at = base + ListItem::CONTINUATION_INDENT;
        let mut items: Vec<Node> = vec![];
        let mut j = start;

        while j < lines.len() {
            let line = lines[j];
            match MarkdownLineClassifier::classify(line) {
                LineClass::ListItem(m) if m.kind == first.kind && m.indent < nested_at => {
                    items.push(list_item(&m));
                    j += 1;
                }
                LineClass::Blank => {
                    // Blank lines inside a list are skipped when the list continues.
                    let Some(next) = (j..lines.len()).find(|&k| !lines[k].trim().is_empty()) else {
                        break;
                    };
                    let continues = match MarkdownLineClassifier::classify(lines[next]) {
                        LineClass::ListItem(m) if m.kind == first.kind && m.indent < nested_at => true,
                        _ => !items.is_empty() && indent_width(lines[next]) >= nested_at,
                    };
                    if !continues {
                        break;
                    }
                    j = next;
                }
                _ if !items.is_empty() && indent_width(line) >= nested_at => {
                    let end = continuation_end(lines, j, nested_at);
                    let block = &lines[j..end];
                    let strip = block
                        .iter()
                        .filter(|l| !l.trim().is_empty())
                        .map(|l| indent_width(l))
                        .min()
                        .unwrap_or(nested_at);
                    let dedented: Vec<&str> = block.iter().map(|l| dedent(l, strip)).collect();
                    let children = self.nested_blocks(&dedented, depth);
                    if let Some(last) = items.last_mut() {
                        last.content.extend(children);
                    }
                    j = end;
                }
                _ => break,
            }
        }

        let list_kind = match first.kind {
            ListKind::Bullet => NodeKind::BulletList,
            ListKind::Ordered => NodeKind::OrderedList,
            ListKind::Task => NodeKind::TaskList,
        };
        let mut list = Node::with_content(list_kind, items);
        if let Some(n) = first.number.filter(|&n| n != 1) {
            list = list.with_attr("start", n);
        }
        out.push(list);
        j
    }

    fn consume_paragraph(&self, lines: &[&str], start: usize, out: &mut Vec<Node>) -> usize {
        let end = (start + 1..lines.len())
            .find(|&j| {
                let class = MarkdownLineClassifier::classify(lines[j]);
                class == LineClass::Blank || class.opens_block()
            })
            .unwrap_or(lines.len());
        let text = lines[start..end]
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join(Paragraph::LINE_JOIN);
        out.push(Node::paragraph(parse_inline(&text)));
        end
    }

    /// Parses the body of a container one level deeper, or keeps it verbatim
    /// as a paragraph once the nesting limit is reached.
    fn nested_blocks(&self, lines: &[&str], depth: usize) -> Vec<Node> {
        let children = if depth + 1 >= self.max_depth {
            log::debug!("nesting limit {} reached, keeping text verbatim", self.max_depth);
            let text = lines
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(Paragraph::LINE_JOIN);
            if text.is_empty() {
                vec![]
            } else {
                vec![Node::paragraph(vec![Node::text(text)])]
            }
        } else {
            self.parse_lines(lines, depth + 1)
        };

        if children.is_empty() {
            vec![Node::empty_paragraph()]
        } else {
            children
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_MAX_DEPTH)
    }
}

fn list_item(marker: &ListMarker<'_>) -> Node {
    let paragraph = Node::paragraph(parse_inline(marker.text.trim()));
    match marker.kind {
        ListKind::Task => Node::with_content(NodeKind::TaskItem, vec![paragraph])
            .with_attr("checked", marker.checked),
        ListKind::Bullet | ListKind::Ordered => {
            Node::with_content(NodeKind::ListItem, vec![paragraph])
        }
    }
}

/// End (exclusive) of a run of lines indented at least `min_indent`, allowing
/// interior blank lines that are followed by more indented lines.
fn continuation_end(lines: &[&str], start: usize, min_indent: usize) -> usize {
    let mut end = start;
    let mut k = start;
    while k < lines.len() {
        if lines[k].trim().is_empty() {
            k += 1;
            continue;
        }
        if indent_width(lines[k]) < min_indent {
            break;
        }
        k += 1;
        end = k;
    }
    end
}
