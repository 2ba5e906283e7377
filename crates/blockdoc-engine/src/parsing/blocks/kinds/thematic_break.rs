/// Thematic break (`---`, `***`, `___`, spaces allowed between).
pub struct ThematicBreak;

impl ThematicBreak {
    pub const CHARS: [char; 3] = ['-', '*', '_'];
    pub const MIN_RUN: usize = 3;
    pub const CANONICAL: &'static str = "---";

    pub fn matches(line: &str) -> bool {
        let t = line.trim();
        if line.len() - line.trim_start().len() > 3 {
            return false;
        }
        let Some(first) = t.chars().next() else {
            return false;
        };
        if !Self::CHARS.contains(&first) {
            return false;
        }
        let mut count = 0;
        for c in t.chars() {
            if c == first {
                count += 1;
            } else if c != ' ' && c != '\t' {
                return false;
            }
        }
        count >= Self::MIN_RUN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("---", true)]
    #[case("***", true)]
    #[case("___", true)]
    #[case("* * *", true)]
    #[case("-----", true)]
    #[case("--", false)]
    #[case("-*-", false)]
    #[case("- item", false)]
    #[case("", false)]
    fn detection(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(ThematicBreak::matches(line), expected);
    }
}
