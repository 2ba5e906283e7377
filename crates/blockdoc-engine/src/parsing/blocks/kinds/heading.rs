use std::sync::OnceLock;

use regex::Regex;

/// ATX heading (`#` through `######`).
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    /// Returns the level and text of an ATX heading line. A closing run of
    /// `#` separated by whitespace is dropped.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        static HEADING: OnceLock<Regex> = OnceLock::new();
        let re = HEADING.get_or_init(|| {
            Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$")
                .expect("Invalid heading regex")
        });
        let caps = re.captures(line)?;
        let level = caps.get(1)?.as_str().len() as u8;
        let text = caps.get(2).map_or("", |m| m.as_str());
        Some((level, text))
    }
}
