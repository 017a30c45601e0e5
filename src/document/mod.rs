//! Markdown document parsing and rendering.
//!
//! This module handles:
//! - Parsing markdown with comrak
//! - Laying the result out as styled lines for the preview pane
//! - The [`Renderer`] boundary the app renders through

mod parser;
mod types;

pub use parser::{parse, parse_with_layout};
pub use types::{Document, InlineColor, InlineSpan, InlineStyle, LineType, RenderedLine};

/// Turns markdown source into a preview [`Document`].
///
/// The app only ever renders through this trait, so the markdown engine can
/// be swapped (or stubbed in tests) without touching the update loop.
pub trait Renderer: std::fmt::Debug {
    /// Render `source` laid out for `width` columns.
    ///
    /// Must not fail: malformed markdown degrades to plain text.
    fn render(&self, source: &str, width: u16) -> Document;
}

/// The default renderer: comrak with GitHub-flavored extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakRenderer;

impl Renderer for ComrakRenderer {
    fn render(&self, source: &str, width: u16) -> Document {
        parse_with_layout(source, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &Document) -> Vec<String> {
        (0..doc.line_count())
            .filter_map(|i| doc.line_at(i))
            .map(|l| l.content().to_string())
            .collect()
    }

    #[test]
    fn test_comrak_renderer_matches_parse_with_layout() {
        let src = "# Title\n\nSome **bold** text";
        assert_eq!(ComrakRenderer.render(src, 60), parse_with_layout(src, 60));
    }

    #[test]
    fn test_renderer_records_source_and_width() {
        let doc = ComrakRenderer.render("hello", 42);
        assert_eq!(doc.source(), "hello");
        assert_eq!(doc.width(), 42);
    }

    #[test]
    fn test_renderer_handles_empty_source() {
        let doc = ComrakRenderer.render("", 40);
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn test_renderer_never_fails_on_malformed_markdown() {
        let doc = ComrakRenderer.render("**unclosed\n\n[link](\n\n```\nno fence end", 40);
        assert!(texts(&doc).iter().any(|l| l.contains("unclosed")));
    }

    #[test]
    fn test_renderer_is_object_safe() {
        let renderer: Box<dyn Renderer> = Box::new(ComrakRenderer);
        let doc = renderer.render("- item", 40);
        assert!(texts(&doc).iter().any(|l| l.contains("item")));
    }
}
