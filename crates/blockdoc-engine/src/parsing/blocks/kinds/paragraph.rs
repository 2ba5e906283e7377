/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters: they are the fallback when no other block
/// opener matches. Their lines are joined with this separator before inline
/// parsing.
pub struct Paragraph;

impl Paragraph {
    pub const LINE_JOIN: &'static str = "\n";
}
