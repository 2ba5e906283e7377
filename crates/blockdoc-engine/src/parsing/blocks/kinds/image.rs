use std::sync::OnceLock;

use regex::Regex;

/// A standalone image line: `![alt](src "title")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLine<'a> {
    pub alt: &'a str,
    pub src: &'a str,
    pub title: Option<&'a str>,
}

impl<'a> ImageLine<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        static IMAGE: OnceLock<Regex> = OnceLock::new();
        let re = IMAGE.get_or_init(|| {
            Regex::new(r#"^\s*!\[([^\]]*)\]\(\s*([^\s)]+)(?:\s+"([^"]*)")?\s*\)\s*$"#)
                .expect("Invalid image regex")
        });
        let caps = re.captures(line)?;
        Some(ImageLine {
            alt: caps.get(1).map_or("", |m| m.as_str()),
            src: caps.get(2)?.as_str(),
            title: caps.get(3).map(|m| m.as_str()),
        })
    }
}
