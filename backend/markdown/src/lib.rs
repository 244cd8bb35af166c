//! Markdown-ish reply rendering
//!
//! Parses model replies into a small IR and renders it for web and terminal clients.

pub mod escape;
pub mod ir;
pub mod renderer;

pub use escape::escape_html;
pub use ir::{Inline, IrParser, MarkdownNode};
pub use renderer::Renderer;

/// Parse and render straight to HTML.
pub fn render_html(markdown: &str) -> String {
    Renderer::to_html(&IrParser::parse(markdown))
}
