use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let palette = model.theme.palette();
    let cursor = model.buffer.cursor();

    let dirty_indicator = if model.is_dirty() { " [modified]" } else { "" };
    let cursor_info = if model.view_mode.shows_write() {
        format!(
            "  Ln {}, Col {}",
            cursor.line + 1,
            model.cursor_display_col() + 1
        )
    } else {
        String::new()
    };
    let scroll_info = if model.view_mode.shows_preview() {
        format!("  [{}%]", model.preview_viewport.scroll_percent())
    } else {
        String::new()
    };

    let status = format!(
        " {}{}{}  {} chars{}  F1:help  Ctrl+Q:quit",
        model.view_mode.label(),
        dirty_indicator,
        cursor_info,
        model.buffer.len_chars(),
        scroll_info
    );

    let status_bar = Paragraph::new(status)
        .style(Style::default().bg(palette.status_bg).fg(palette.status_fg));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
