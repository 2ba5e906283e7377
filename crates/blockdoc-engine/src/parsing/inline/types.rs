/// A token produced by the inline scanner.
///
/// Tokens borrow from the scanned text; lowering into owned `text` nodes
/// happens in a separate step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineToken<'a> {
    /// Plain text that isn't part of any special construct.
    Text(&'a str),
    /// Inner text of a `` `code` `` span.
    Code(&'a str),
    /// `[text](href)`.
    Link { text: &'a str, href: &'a str },
    /// Inner text of `**bold**`.
    Bold(&'a str),
    /// Inner text of `*italic*`.
    Italic(&'a str),
    /// Inner text of `~~strike~~`.
    Strike(&'a str),
}
