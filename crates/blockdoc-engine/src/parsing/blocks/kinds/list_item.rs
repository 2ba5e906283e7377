use std::sync::OnceLock;

use regex::Regex;

/// What a list item line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
    Task,
}

/// A recognised list item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker<'a> {
    pub kind: ListKind,
    /// Leading whitespace width (tabs count as four).
    pub indent: usize,
    /// Number of an ordered item.
    pub number: Option<u64>,
    /// State of a task item.
    pub checked: bool,
    /// Text after the marker.
    pub text: &'a str,
}

pub struct ListItem;

impl ListItem {
    pub const BULLET: &'static str = "- ";
    pub const TASK_DONE: &'static str = "[x] ";
    pub const TASK_OPEN: &'static str = "[ ] ";
    /// Indentation added per nesting level when serializing.
    pub const NEST_INDENT: &'static str = "  ";
    /// Lines indented at least this far continue the previous item.
    pub const CONTINUATION_INDENT: usize = 2;

    /// Recognises task, bullet and ordered item lines, in that order.
    pub fn parse(line: &str) -> Option<ListMarker<'_>> {
        static TASK: OnceLock<Regex> = OnceLock::new();
        static BULLET: OnceLock<Regex> = OnceLock::new();
        static ORDERED: OnceLock<Regex> = OnceLock::new();

        let task = TASK.get_or_init(|| {
            Regex::new(r"^([ \t]*)[-*+][ \t]+\[([ xX])\](?:[ \t]+(.*))?$")
                .expect("Invalid task item regex")
        });
        let bullet = BULLET.get_or_init(|| {
            Regex::new(r"^([ \t]*)[-*+](?:[ \t]+(.*))?$").expect("Invalid bullet item regex")
        });
        let ordered = ORDERED.get_or_init(|| {
            Regex::new(r"^([ \t]*)(\d{1,9})[.)](?:[ \t]+(.*))?$")
                .expect("Invalid ordered item regex")
        });

        if let Some(caps) = task.captures(line) {
            return Some(ListMarker {
                kind: ListKind::Task,
                indent: indent_width(caps.get(1).map_or("", |m| m.as_str())),
                number: None,
                checked: caps.get(2).is_some_and(|m| m.as_str() != " "),
                text: caps.get(3).map_or("", |m| m.as_str()),
            });
        }
        if let Some(caps) = bullet.captures(line) {
            return Some(ListMarker {
                kind: ListKind::Bullet,
                indent: indent_width(caps.get(1).map_or("", |m| m.as_str())),
                number: None,
                checked: false,
                text: caps.get(2).map_or("", |m| m.as_str()),
            });
        }
        if let Some(caps) = ordered.captures(line) {
            return Some(ListMarker {
                kind: ListKind::Ordered,
                indent: indent_width(caps.get(1).map_or("", |m| m.as_str())),
                number: caps.get(2).and_then(|m| m.as_str().parse().ok()),
                checked: false,
                text: caps.get(3).map_or("", |m| m.as_str()),
            });
        }
        None
    }
}

/// Width of leading whitespace, tabs counting as four columns.
pub fn indent_width(s: &str) -> usize {
    s.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Removes up to `width` columns of leading whitespace.
pub fn dedent(line: &str, width: usize) -> &str {
    let mut cols = 0;
    for (i, c) in line.char_indices() {
        if cols >= width {
            return &line[i..];
        }
        match c {
            ' ' => cols += 1,
            '\t' => cols += 4,
            _ => return &line[i..],
        }
    }
    ""
}
