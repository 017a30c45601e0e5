//! Syntax highlighting for fenced code blocks in the preview.
//!
//! Uses syntect with the bundled Sublime Text syntax definitions. Colors are
//! taken from a dark theme; the light palette darkens them at draw time (see
//! `ui::style`), so the rendered document does not depend on the theme toggle.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::document::{InlineColor, InlineSpan, InlineStyle};

/// Highlight `code` as `language`, one span list per source line.
///
/// Unknown or missing languages fall back to plain code spans.
pub fn highlight_code(language: Option<&str>, code: &str) -> Vec<Vec<InlineSpan>> {
    let syntax_set = syntax_set();
    let syntax = language
        .and_then(|lang| syntax_set.find_syntax_by_token(lang))
        .or_else(|| language.and_then(|lang| syntax_set.find_syntax_by_name(lang)));

    let Some(syntax) = syntax else {
        return code
            .lines()
            .map(|line| vec![InlineSpan::new(line.to_string(), code_style())])
            .collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme());
    let mut lines = Vec::new();
    for line in code.lines() {
        let ranges = highlighter
            .highlight_line(line, syntax_set)
            .unwrap_or_default();
        let spans = ranges
            .into_iter()
            .map(|(style, text)| {
                let mut inline_style = code_style();
                inline_style.fg = Some(InlineColor {
                    r: style.foreground.r,
                    g: style.foreground.g,
                    b: style.foreground.b,
                });
                InlineSpan::new(text.to_string(), inline_style)
            })
            .collect();
        lines.push(spans);
    }

    lines
}

fn code_style() -> InlineStyle {
    InlineStyle {
        code: true,
        ..InlineStyle::default()
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        tracing::debug!("loading syntect syntax definitions");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        for name in ["base16-ocean.dark", "base16-eighties.dark", "Solarized (dark)"] {
            if let Some(theme) = theme_set.themes.get(name) {
                return theme.clone();
            }
        }
        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}
