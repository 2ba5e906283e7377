/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Whether the line opens or continues a blockquote.
    pub fn is_quoted(line: &str) -> bool {
        Self::strip_one(line).is_some()
    }

    /// Strips a single level of quoting: up to three spaces, `>`, and one
    /// optional following space. Deeper levels are left for the recursive
    /// parse of the dequoted text.
    pub fn strip_one(line: &str) -> Option<&str> {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > 3 {
            return None;
        }
        let rest = trimmed.strip_prefix(Self::PREFIX)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }
}
