/// Default bound on container nesting (blockquotes, lists, columns, accordions).
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default number of characters kept in a block preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 120;

/// Tunables shared by the parser, normalizer, serializers and editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum container nesting the engine will descend into.
    pub max_depth: usize,
    /// Length of block previews used for text targeting and summaries.
    pub preview_chars: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl EngineOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }
}
