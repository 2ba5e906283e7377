/// Delimiter-pair emphasis styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Italic,
    Strike,
}

impl Emphasis {
    /// Precedence order used by the scanner after code spans and links.
    pub const ORDER: [Emphasis; 3] = [Emphasis::Bold, Emphasis::Italic, Emphasis::Strike];

    pub fn delimiter(self) -> &'static str {
        match self {
            Emphasis::Bold => "**",
            Emphasis::Italic => "*",
            Emphasis::Strike => "~~",
        }
    }

    /// Inner text may not be empty or padded with whitespace, so `2 * 3 * 4`
    /// stays literal.
    pub fn accepts_inner(inner: &str) -> bool {
        !inner.is_empty()
            && !inner.starts_with(char::is_whitespace)
            && !inner.ends_with(char::is_whitespace)
    }
}
