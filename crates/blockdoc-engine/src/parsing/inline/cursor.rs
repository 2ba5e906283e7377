/// A cursor for byte-by-byte inline scanning.
///
/// All delimiters the scanner looks for are ASCII, so every position the
/// cursor stops at while matching is a char boundary of `s`.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte just before the cursor, if any.
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|j| self.s.as_bytes().get(j).copied())
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// Byte index of the next occurrence of `pat` at or after `from`.
    pub fn find_from(&self, from: usize, pat: &str) -> Option<usize> {
        self.s.get(from..)?.find(pat).map(|j| from + j)
    }

    /// Advances by one char, keeping the cursor on a char boundary.
    pub fn bump_char(&mut self) {
        let step = self.s[self.i..].chars().next().map_or(1, char::len_utf8);
        self.i += step;
    }

    /// Moves the cursor to an absolute byte index.
    pub fn jump_to(&mut self, i: usize) {
        self.i = i;
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }
}
