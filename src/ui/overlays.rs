use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::editor::FormatCommand;

use super::theme::Palette;

/// Popup holding a blocking notice, centered on the screen.
pub fn notice_rect(area: Rect, message: &str) -> Rect {
    let text_width = u16::try_from(unicode_width::UnicodeWidthStr::width(message))
        .unwrap_or(u16::MAX);
    // border(1) + padding(2) on each side
    let popup_width = text_width.saturating_add(6).max(30);
    centered_popup_rect(popup_width, 6, area)
}

pub fn render_notice(message: &str, palette: &Palette, frame: &mut Frame, area: Rect) {
    let popup = notice_rect(area, message);
    let lines = vec![
        Line::styled(message.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled("Press any key to continue", Style::default().fg(palette.muted)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(2))
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.pane_background).fg(palette.foreground));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Formatting", section_style));
    for command in FormatCommand::ALL {
        lines.push(Line::raw(format!(
            "  Alt+{}               {}",
            command.shortcut(),
            command.title()
        )));
    }
    lines.push(Line::raw(""));

    lines.push(Line::styled("View", section_style));
    lines.push(Line::raw("  F2 / Alt+1          Write"));
    lines.push(Line::raw("  F3 / Alt+2          Preview"));
    lines.push(Line::raw("  F4 / Alt+3          Both"));
    lines.push(Line::raw("  Ctrl+T              Toggle dark mode"));
    lines.push(Line::raw("  PageUp/PageDown     Scroll preview"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editor", section_style));
    lines.push(Line::raw("  Arrows, Home/End    Navigate"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    lines.push(Line::raw("  Shift+movement      Select"));
    lines.push(Line::raw("  Ctrl+A              Select all"));
    lines.push(Line::raw("  Mouse click / drag  Place cursor / select"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Export", section_style));
    lines.push(Line::raw("  Ctrl+S              Download README.md"));
    lines.push(Line::raw("  Alt+C               Copy markdown"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw("  Ctrl+L              Redraw screen"));
    lines.push(Line::raw("  Ctrl+Q              Quit"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines.push(Line::raw(format!(
        "  Export dir: {}",
        model.export_dir.display()
    )));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = lines
        .into_iter()
        .take(usize::from(content_height))
        .collect();
    frame.render_widget(
        Paragraph::new(visible),
        Rect::new(inner.x, inner.y, inner.width, content_height),
    );

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("Any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
