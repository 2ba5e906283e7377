#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// An opening fence line: its character, run length and info string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    pub kind: FenceKind,
    pub len: usize,
    pub info: &'a str,
}

impl FenceOpen<'_> {
    /// First word of the info string, if any.
    pub fn language(&self) -> Option<&str> {
        self.info.split_whitespace().next()
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_LEN: usize = 3;

    /// Recognises an opening fence (up to three spaces of indent).
    pub fn open(line: &str) -> Option<FenceOpen<'_>> {
        let t = strip_indent(line)?;
        let (kind, ch) = if t.starts_with(Self::BACKTICK) {
            (FenceKind::Backticks, Self::BACKTICK)
        } else if t.starts_with(Self::TILDE) {
            (FenceKind::Tildes, Self::TILDE)
        } else {
            return None;
        };
        let len = t.chars().take_while(|&c| c == ch).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = t[len..].trim();
        if kind == FenceKind::Backticks && info.contains(Self::BACKTICK) {
            return None;
        }
        Some(FenceOpen { kind, len, info })
    }

    /// A closing fence uses the opener's character, is at least as long, and
    /// carries nothing else.
    pub fn closes(open: &FenceOpen<'_>, line: &str) -> bool {
        let Some(t) = strip_indent(line) else {
            return false;
        };
        let ch = match open.kind {
            FenceKind::Backticks => Self::BACKTICK,
            FenceKind::Tildes => Self::TILDE,
        };
        let len = t.chars().take_while(|&c| c == ch).count();
        len >= open.len && t[len..].trim().is_empty()
    }

    /// Shortest backtick fence that cannot be closed by a run inside `code`.
    pub fn fence_for(code: &str) -> String {
        let longest = code
            .lines()
            .map(|l| l.trim_start().chars().take_while(|&c| c == Self::BACKTICK).count())
            .max()
            .unwrap_or(0);
        Self::BACKTICK
            .to_string()
            .repeat(longest.max(Self::MIN_LEN - 1) + 1)
    }
}

fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    (indent <= 3).then(|| &line[indent..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence_with_language() {
        let open = CodeFence::open("```rust").unwrap();
        assert_eq!(open.kind, FenceKind::Backticks);
        assert_eq!(open.len, 3);
        assert_eq!(open.language(), Some("rust"));
    }

    #[test]
    fn detect_tilde_fence() {
        let open = CodeFence::open("~~~~").unwrap();
        assert_eq!(open.kind, FenceKind::Tildes);
        assert_eq!(open.len, 4);
        assert_eq!(open.language(), None);
    }

    #[test]
    fn no_fence() {
        assert!(CodeFence::open("hello").is_none());
        assert!(CodeFence::open("``not enough").is_none());
        assert!(CodeFence::open("    ```").is_none());
    }

    #[test]
    fn closes_matching_fence() {
        let open = CodeFence::open("```").unwrap();
        assert!(CodeFence::closes(&open, "```"));
        assert!(CodeFence::closes(&open, "`````"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let open = CodeFence::open("````").unwrap();
        assert!(!CodeFence::closes(&open, "```"));
        assert!(!CodeFence::closes(&open, "~~~~"));
        assert!(!CodeFence::closes(&open, "```` trailing"));
    }

    #[test]
    fn fence_for_outgrows_inner_runs() {
        assert_eq!(CodeFence::fence_for("let x = 1;"), "```");
        assert_eq!(CodeFence::fence_for("```\ninner\n```"), "````");
    }
}
