use crate::model::{Mark, Node};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Link},
    types::InlineToken,
};

/// Scans a text run into [`InlineToken`]s.
///
/// At every position the constructs are tried in precedence order: code span,
/// link, bold, italic, strikethrough. Unclosed constructs fall through as
/// plain text, so this never fails.
pub fn tokenize(s: &str) -> Vec<InlineToken<'_>> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text<'a>(out: &mut Vec<InlineToken<'a>>, cur: &Cursor<'a>, start: usize, end: usize) {
        if end > start {
            out.push(InlineToken::Text(cur.slice(start, end)));
        }
    }

    while !cur.eof() {
        let start = cur.pos();
        let matched = try_code_span(&mut cur)
            .or_else(|| try_link(&mut cur))
            .or_else(|| Emphasis::ORDER.into_iter().find_map(|e| try_emphasis(&mut cur, e)));

        match matched {
            Some(token) => {
                flush_text(&mut out, &cur, text_start, start);
                out.push(token);
                text_start = cur.pos();
            }
            None => cur.bump_char(),
        }
    }

    flush_text(&mut out, &cur, text_start, cur.pos());
    out
}

/// Tokenizes a text run and lowers it into `text` nodes carrying at most one mark.
///
/// Empty input yields no nodes.
pub fn parse_inline(s: &str) -> Vec<Node> {
    tokenize(s).into_iter().map(lower).collect()
}

fn lower(token: InlineToken<'_>) -> Node {
    match token {
        InlineToken::Text(t) => Node::text(t),
        InlineToken::Code(t) => Node::marked_text(t, Mark::Code),
        InlineToken::Link { text, href } => Node::marked_text(text, Mark::link(href)),
        InlineToken::Bold(t) => Node::marked_text(t, Mark::Bold),
        InlineToken::Italic(t) => Node::marked_text(t, Mark::Italic),
        InlineToken::Strike(t) => Node::marked_text(t, Mark::Strike),
    }
}

/// On failure every `try_*` leaves the cursor where it was.
fn try_code_span<'a>(cur: &mut Cursor<'a>) -> Option<InlineToken<'a>> {
    if !cur.starts_with(CodeSpan::TICK.as_bytes()) {
        return None;
    }
    let inner_start = cur.pos() + CodeSpan::TICK.len();
    let close = cur.find_from(inner_start, CodeSpan::TICK)?;
    if close == inner_start {
        return None;
    }
    let inner = cur.slice(inner_start, close);
    cur.jump_to(close + CodeSpan::TICK.len());
    Some(InlineToken::Code(inner))
}

fn try_link<'a>(cur: &mut Cursor<'a>) -> Option<InlineToken<'a>> {
    if cur.peek() != Some(Link::OPEN) || cur.prev() == Some(Link::IMAGE_BANG) {
        return None;
    }
    let text_start = cur.pos() + 1;
    let text_end = cur.find_from(text_start, Link::TEXT_CLOSE)?;
    let text = cur.slice(text_start, text_end);
    if text.is_empty() || text.contains(']') {
        return None;
    }
    let href_start = text_end + Link::TEXT_CLOSE.len();
    let href_end = cur.find_from(href_start, Link::HREF_CLOSE)?;
    let href = cur.slice(href_start, href_end).trim();
    if href.is_empty() {
        return None;
    }
    cur.jump_to(href_end + Link::HREF_CLOSE.len());
    Some(InlineToken::Link { text, href })
}

fn try_emphasis<'a>(cur: &mut Cursor<'a>, style: Emphasis) -> Option<InlineToken<'a>> {
    let delim = style.delimiter();
    if !cur.starts_with(delim.as_bytes()) {
        return None;
    }
    let inner_start = cur.pos() + delim.len();
    let close = cur.find_from(inner_start, delim)?;
    let inner = cur.slice(inner_start, close);
    if !Emphasis::accepts_inner(inner) {
        return None;
    }
    cur.jump_to(close + delim.len());
    Some(match style {
        Emphasis::Bold => InlineToken::Bold(inner),
        Emphasis::Italic => InlineToken::Italic(inner),
        Emphasis::Strike => InlineToken::Strike(inner),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn plain_text_is_a_single_span() {
        assert_eq!(tokenize("hello world"), vec![InlineToken::Text("hello world")]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(parse_inline("").is_empty());
    }

    #[rstest]
    #[case("`code`", InlineToken::Code("code"))]
    #[case("**bold**", InlineToken::Bold("bold"))]
    #[case("*it*", InlineToken::Italic("it"))]
    #[case("~~gone~~", InlineToken::Strike("gone"))]
    #[case("[site](https://x.test)", InlineToken::Link { text: "site", href: "https://x.test" })]
    fn single_constructs(#[case] input: &str, #[case] expected: InlineToken<'static>) {
        assert_eq!(tokenize(input), vec![expected]);
    }

    #[test]
    fn text_between_constructs_is_preserved() {
        assert_eq!(
            tokenize("Some **bold** text."),
            vec![
                InlineToken::Text("Some "),
                InlineToken::Bold("bold"),
                InlineToken::Text(" text."),
            ]
        );
    }

    #[test]
    fn code_span_suppresses_other_syntax() {
        assert_eq!(tokenize("`**not bold**`"), vec![InlineToken::Code("**not bold**")]);
    }

    #[test]
    fn bold_takes_precedence_over_italic() {
        assert_eq!(
            tokenize("**a** and *b*"),
            vec![
                InlineToken::Bold("a"),
                InlineToken::Text(" and "),
                InlineToken::Italic("b"),
            ]
        );
    }

    #[rstest]
    #[case("`unclosed")]
    #[case("**unclosed")]
    #[case("[text](no close")]
    #[case("2 * 3 * 4")]
    #[case("~~ padded ~~")]
    fn unclosed_or_invalid_constructs_become_text(#[case] input: &str) {
        assert_eq!(tokenize(input), vec![InlineToken::Text(input)]);
    }

    #[test]
    fn image_syntax_is_not_a_link() {
        assert_eq!(tokenize("![alt](a.png)"), vec![InlineToken::Text("![alt](a.png)")]);
    }

    #[test]
    fn multibyte_text_around_marks() {
        assert_eq!(
            tokenize("café **crème** brûlée"),
            vec![
                InlineToken::Text("café "),
                InlineToken::Bold("crème"),
                InlineToken::Text(" brûlée"),
            ]
        );
    }

    #[test]
    fn lowering_attaches_one_mark_per_span() {
        let nodes = parse_inline("a [b](/c)");
        assert_eq!(nodes, vec![Node::text("a "), Node::marked_text("b", Mark::link("/c"))]);
    }
}
