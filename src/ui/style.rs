//! Preview styling for rendered markdown elements.
//!
//! Every style is resolved against the active [`Theme`], on top of the root
//! palette's background.

use ratatui::style::{Color, Modifier, Style};

use super::Theme;
use crate::document::{InlineColor, InlineStyle, LineType};

/// Get the style for a given line type.
pub fn style_for_line_type(line_type: &LineType, theme: Theme) -> Style {
    let dark = theme.is_dark();
    let pick = |light: u8, dark_color: Color| {
        if dark {
            dark_color
        } else {
            Color::Indexed(light)
        }
    };
    match line_type {
        LineType::Heading(1) => Style::default()
            .fg(pick(24, Color::Cyan))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(pick(22, Color::Green))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(3) => Style::default()
            .fg(pick(58, Color::Yellow))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(pick(54, Color::Magenta))
            .add_modifier(Modifier::BOLD),

        LineType::CodeBlock => Style::default().fg(pick(238, Color::Indexed(245))),

        LineType::BlockQuote => Style::default()
            .fg(pick(24, Color::LightBlue))
            .add_modifier(Modifier::ITALIC),

        LineType::HorizontalRule | LineType::Table => Style::default().fg(pick(241, Color::Indexed(245))),

        // Stands out as a placeholder
        LineType::Image => Style::default()
            .fg(pick(90, Color::Magenta))
            .add_modifier(Modifier::ITALIC),

        LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => Style::default(),
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(base: Style, inline: InlineStyle, theme: Theme) -> Style {
    let mut style = base;
    let dark = theme.is_dark();

    if let Some(fg) = inline.fg {
        style = style.fg(fg_color_for_terminal(adjust_fg_for_background(fg, theme)));
    }
    if let Some(bg) = inline.bg {
        style = style.bg(Color::Rgb(bg.r, bg.g, bg.b));
    }

    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link {
        style = style.add_modifier(Modifier::UNDERLINED);
        if inline.fg.is_none() {
            style = style.fg(if dark { Color::LightBlue } else { Color::Blue });
        }
    }
    if inline.code && inline.fg.is_none() {
        style = style
            .fg(if dark { Color::LightRed } else { Color::Indexed(88) })
            .add_modifier(Modifier::BOLD);
    }

    style
}

/// Darken bright highlight colors so they stay readable on the light palette.
pub fn adjust_fg_for_background(color: InlineColor, theme: Theme) -> InlineColor {
    if theme.is_dark() {
        return color;
    }
    let luma = 0.0722f32.mul_add(
        f32::from(color.b),
        0.2126f32.mul_add(f32::from(color.r), 0.7152 * f32::from(color.g)),
    );
    if luma < 155.0 {
        return color;
    }
    let darken = |v: u8| {
        // 0.42 * 255 fits in u8
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let out = (f32::from(v) * 0.42).round() as u8;
        out
    };
    InlineColor {
        r: darken(color.r),
        g: darken(color.g),
        b: darken(color.b),
    }
}

fn fg_color_for_terminal(fg: InlineColor) -> Color {
    if supports_truecolor() {
        Color::Rgb(fg.r, fg.g, fg.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(fg.r, fg.g, fg.b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("MARKPAD_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let contains_any = |value: &str, needles: &[&str]| {
        let lower = value.to_ascii_lowercase();
        needles.iter().any(|n| lower.contains(n))
    };
    colorterm.is_some_and(|ct| contains_any(ct, &["truecolor", "24bit"]))
        || term.is_some_and(|t| contains_any(t, &["direct", "truecolor"]))
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}
