use super::kinds::{
    BlockQuote, CodeFence, FenceOpen, Heading, ImageLine, ListItem, ListMarker, TableRow,
    ThematicBreak,
};

/// Classification of a single line from local facts only.
///
/// This is phase 1 of block parsing: each line is classified without
/// reference to surrounding context. The builder decides how far a construct
/// extends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    FenceOpen(FenceOpen<'a>),
    ThematicBreak,
    Heading { level: u8, text: &'a str },
    Quote,
    TableRow,
    ListItem(ListMarker<'a>),
    Image(ImageLine<'a>),
    /// Anything else: paragraph text.
    Text,
}

impl LineClass<'_> {
    /// Whether this line opens a construct other than a paragraph.
    pub fn opens_block(&self) -> bool {
        !matches!(self, LineClass::Blank | LineClass::Text)
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Tests each construct in precedence order: fence, thematic break,
    /// heading, blockquote, table, list item (task, bullet, ordered), image.
    ///
    /// Thematic breaks are tested before list items so `* * *` is a rule.
    pub fn classify(line: &str) -> LineClass<'_> {
        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        if let Some(open) = CodeFence::open(line) {
            return LineClass::FenceOpen(open);
        }
        if ThematicBreak::matches(line) {
            return LineClass::ThematicBreak;
        }
        if let Some((level, text)) = Heading::parse(line) {
            return LineClass::Heading { level, text };
        }
        if BlockQuote::is_quoted(line) {
            return LineClass::Quote;
        }
        if TableRow::is_row(line) {
            return LineClass::TableRow;
        }
        if let Some(marker) = ListItem::parse(line) {
            return LineClass::ListItem(marker);
        }
        if let Some(image) = ImageLine::parse(line) {
            return LineClass::Image(image);
        }
        LineClass::Text
    }
}
