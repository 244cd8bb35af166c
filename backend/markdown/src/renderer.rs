//! Renderers for the Markdown IR
//!
//! HTML for the browser client, plain text and ANSI for the terminal client.

use crate::escape::escape_html;
use crate::ir::{Inline, MarkdownNode};

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_CYAN: &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

pub struct Renderer;

impl Renderer {
    /// Renders AST to HTML. All text is escaped; only the renderer emits tags.
    pub fn to_html(nodes: &[MarkdownNode]) -> String {
        let mut output = String::new();
        for node in nodes {
            match node {
                MarkdownNode::Break => output.push_str("<p></p>"),
                MarkdownNode::Paragraph(spans) => {
                    output.push_str("<p>");
                    Self::inline_html(spans, &mut output);
                    output.push_str("</p>");
                }
                MarkdownNode::List(items) => {
                    output.push_str("<ul>");
                    for item in items {
                        output.push_str("<li>");
                        Self::inline_html(item, &mut output);
                        output.push_str("</li>");
                    }
                    output.push_str("</ul>");
                }
            }
        }
        output
    }

    /// Renders AST to plain text, stripping all formatting.
    pub fn to_plain_text(nodes: &[MarkdownNode]) -> String {
        Self::to_lines(nodes, |spans| {
            spans.iter().map(|span| span_text(span).to_string()).collect()
        })
    }

    /// Renders AST with ANSI styles for terminals.
    pub fn to_ansi(nodes: &[MarkdownNode]) -> String {
        Self::to_lines(nodes, |spans| {
            spans
                .iter()
                .map(|span| match span {
                    Inline::Text(text) => text.clone(),
                    Inline::Strong(text) => format!("{ANSI_BOLD}{text}{ANSI_RESET}"),
                    Inline::Code(text) => format!("{ANSI_CYAN}{text}{ANSI_RESET}"),
                })
                .collect()
        })
    }

    fn to_lines(nodes: &[MarkdownNode], inline: impl Fn(&[Inline]) -> String) -> String {
        let mut lines = Vec::new();
        for node in nodes {
            match node {
                MarkdownNode::Break => lines.push(String::new()),
                MarkdownNode::Paragraph(spans) => lines.push(inline(spans)),
                MarkdownNode::List(items) => {
                    lines.extend(items.iter().map(|item| format!("• {}", inline(item))));
                }
            }
        }
        lines.join("\n")
    }

    fn inline_html(spans: &[Inline], output: &mut String) {
        for span in spans {
            match span {
                Inline::Text(text) => output.push_str(&escape_html(text)),
                Inline::Strong(text) => {
                    output.push_str("<strong>");
                    output.push_str(&escape_html(text));
                    output.push_str("</strong>");
                }
                Inline::Code(text) => {
                    output.push_str("<code>");
                    output.push_str(&escape_html(text));
                    output.push_str("</code>");
                }
            }
        }
    }
}

fn span_text(span: &Inline) -> &str {
    match span {
        Inline::Text(text) | Inline::Strong(text) | Inline::Code(text) => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::IrParser;

    #[test]
    fn test_html_output() {
        let nodes = IrParser::parse("Plan\n- **Stop** shipping\n- call `QA`\n\nEnd");
        assert_eq!(
            Renderer::to_html(&nodes),
            "<p>Plan</p><ul><li><strong>Stop</strong> shipping</li><li>call <code>QA</code></li></ul><p></p><p>End</p>"
        );
    }

    #[test]
    fn test_html_is_escaped() {
        let nodes = IrParser::parse("<script>alert('x')</script> & **<b>**");
        assert_eq!(
            Renderer::to_html(&nodes),
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; <strong>&lt;b&gt;</strong></p>"
        );
    }

    #[test]
    fn test_plain_text_output() {
        let nodes = IrParser::parse("**Steps**\n* isolate lot\n\ndone");
        assert_eq!(Renderer::to_plain_text(&nodes), "Steps\n• isolate lot\n\ndone");
    }

    #[test]
    fn test_ansi_output_styles_spans() {
        let nodes = IrParser::parse("**bold** `code`");
        let ansi = Renderer::to_ansi(&nodes);
        assert!(ansi.contains("\x1b[1mbold\x1b[0m"));
        assert!(ansi.contains("\x1b[36mcode\x1b[0m"));
    }
}
