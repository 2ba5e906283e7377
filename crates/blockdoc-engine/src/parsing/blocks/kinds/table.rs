use std::sync::OnceLock;

use regex::Regex;

/// GFM pipe table row syntax.
pub struct TableRow;

impl TableRow {
    pub const PIPE: char = '|';
    pub const ESCAPED_PIPE: &'static str = "\\|";
    pub const MIN_WIDTH: usize = 3;

    /// A table line starts and ends with `|` once trimmed.
    pub fn is_row(line: &str) -> bool {
        let t = line.trim();
        t.len() >= 2 && t.starts_with(Self::PIPE) && t.ends_with(Self::PIPE)
    }

    /// Whether the row is a `| --- | :-: |` header separator.
    pub fn is_separator(line: &str) -> bool {
        static SEPARATOR_CELL: OnceLock<Regex> = OnceLock::new();
        let re = SEPARATOR_CELL
            .get_or_init(|| Regex::new(r"^:?-+:?$").expect("Invalid separator regex"));
        if !Self::is_row(line) {
            return false;
        }
        let cells = Self::split_cells(line);
        !cells.is_empty() && cells.iter().all(|c| re.is_match(c.trim()))
    }

    /// Splits a row into trimmed cell texts, unescaping `\|`.
    pub fn split_cells(line: &str) -> Vec<String> {
        let t = line.trim();
        let inner = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let inner = match inner.strip_suffix(Self::PIPE) {
            Some(s) if !s.ends_with('\\') => s,
            _ => inner,
        };

        let mut cells = vec![];
        let mut cell = String::new();
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&Self::PIPE) => {
                    cell.push(Self::PIPE);
                    chars.next();
                }
                Self::PIPE => cells.push(std::mem::take(&mut cell).trim().to_string()),
                _ => cell.push(c),
            }
        }
        cells.push(cell.trim().to_string());
        cells
    }

    /// Escapes a cell for output: pipes become `\|`, newlines become spaces.
    pub fn escape_cell(text: &str) -> String {
        text.replace(['\r', '\n'], " ")
            .replace(Self::PIPE, Self::ESCAPED_PIPE)
    }
}
