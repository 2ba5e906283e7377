/// Fixed text emitted in place of a document that could not be rendered.
pub const CONVERSION_ERROR: &str = "[conversion error]";

/// Failures inside the recursive renderers.
///
/// These never escape the public `to_*` functions: they are logged and turned
/// into [`CONVERSION_ERROR`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("document nests deeper than {limit} levels")]
    TooDeep { limit: usize },
    #[error("formatting failed: {0}")]
    Fmt(#[from] std::fmt::Error),
}
