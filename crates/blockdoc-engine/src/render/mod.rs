//! # Serializers
//!
//! Canonical tree to Markdown and HTML.
//!
//! Both renderers are exhaustive over [`NodeKind`](crate::model::NodeKind) and
//! bounded by the nesting limit. The `to_*` functions never fail: internal
//! errors are logged and replaced with [`CONVERSION_ERROR`].

pub mod error;
pub mod html;
pub mod markdown;

pub use error::{CONVERSION_ERROR, RenderError};
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;

use crate::model::Document;
use crate::options::EngineOptions;

pub fn to_markdown(doc: &Document) -> String {
    to_markdown_with(doc, &EngineOptions::default())
}

pub fn to_markdown_with(doc: &Document, options: &EngineOptions) -> String {
    MarkdownRenderer::new(options.max_depth)
        .render(doc)
        .unwrap_or_else(|err| {
            log::warn!("Markdown conversion failed: {err}");
            CONVERSION_ERROR.to_string()
        })
}

pub fn to_html(doc: &Document) -> String {
    to_html_with(doc, &EngineOptions::default())
}

pub fn to_html_with(doc: &Document, options: &EngineOptions) -> String {
    HtmlRenderer::new(options.max_depth)
        .render(doc)
        .unwrap_or_else(|err| {
            log::warn!("HTML conversion failed: {err}");
            CONVERSION_ERROR.to_string()
        })
}
