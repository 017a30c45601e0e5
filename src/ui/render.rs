use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::document::RenderedLine;
use crate::editor::{FormatCommand, Selection};

use super::layout::{self, APP_TITLE, COPY_LABEL, Chrome, DOWNLOAD_LABEL, PREVIEW_LEFT_PADDING};
use super::theme::{Palette, Theme};
use super::{overlays, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let palette = model.theme.palette();
    let chrome = Chrome::compute(area, model.view_mode, model.theme);

    // Root container: every cell takes the theme's colors
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        area,
    );

    render_header(model, frame, &chrome, &palette);
    render_toolbar(frame, &chrome, &palette);
    if let Some(pane) = chrome.write_pane {
        render_editor(model, frame, pane, &palette);
    }
    if let Some(pane) = chrome.preview_pane {
        render_preview(model, frame, pane, &palette);
    }
    render_button(
        frame,
        chrome.download_button,
        DOWNLOAD_LABEL,
        Style::default()
            .bg(palette.download_bg)
            .fg(palette.accent_fg)
            .add_modifier(Modifier::BOLD),
    );
    render_button(
        frame,
        chrome.copy_button,
        COPY_LABEL,
        Style::default()
            .bg(palette.copy_bg)
            .fg(palette.accent_fg)
            .add_modifier(Modifier::BOLD),
    );
    status::render_toast_bar(model, frame, chrome.toast);
    status::render_status_bar(model, frame, chrome.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
    if let Some(notice) = model.notice.as_deref() {
        overlays::render_notice(notice, &palette, frame, area);
    }
}

fn render_header(model: &Model, frame: &mut Frame, chrome: &Chrome, palette: &Palette) {
    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(title), chrome.header);
    render_button(
        frame,
        chrome.theme_button,
        model.theme.toggle_label(),
        Style::default()
            .bg(palette.theme_button_bg)
            .fg(palette.theme_button_fg),
    );

    for (mode, rect) in &chrome.tabs {
        let style = if *mode == model.view_mode {
            Style::default()
                .bg(palette.accent_bg)
                .fg(palette.accent_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(palette.button_bg).fg(palette.button_fg)
        };
        render_button(frame, *rect, mode.label(), style);
    }
}

fn render_toolbar(frame: &mut Frame, chrome: &Chrome, palette: &Palette) {
    let base = Style::default().bg(palette.button_bg).fg(palette.button_fg);
    for (command, rect) in &chrome.toolbar {
        let style = match command {
            FormatCommand::Bold => base.add_modifier(Modifier::BOLD),
            FormatCommand::Italic => base.add_modifier(Modifier::ITALIC),
            _ => base,
        };
        render_button(frame, *rect, command.label(), style);
    }
}

fn render_button(frame: &mut Frame, rect: Rect, label: &str, style: Style) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(format!(" {label} ")).style(style), rect);
}

fn pane_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.pane_background))
}

fn render_editor(model: &Model, frame: &mut Frame, pane: Rect, palette: &Palette) {
    frame.render_widget(pane_block(" Write ", palette), pane);

    let buf = &model.buffer;
    let inner = layout::pane_inner(pane);
    let text_area = layout::editor_text_area(pane, buf.line_count());
    let gutter = usize::from(text_area.x - inner.x);
    let selection = buf.selection();
    let cursor = buf.cursor();

    let start = model.editor_viewport.offset();
    let end = (start + usize::from(text_area.height)).min(buf.line_count());

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let text = buf.line_at(line_idx).unwrap_or_default();
        let number = format!(
            "{:>width$} ",
            line_idx + 1,
            width = gutter.saturating_sub(1)
        );
        let mut spans = vec![Span::styled(number, Style::default().fg(palette.muted))];
        spans.extend(editor_line_spans(
            &text,
            &EditorLineView {
                line_start: buf.line_start_offset(line_idx),
                is_last_line: line_idx + 1 == buf.line_count(),
                cursor_col: (line_idx == cursor.line).then_some(cursor.col),
                selection,
                hscroll: model.editor_hscroll,
                width: usize::from(text_area.width),
            },
            palette,
        ));
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), inner);
}

/// Where one buffer line sits relative to the cursor, selection and scroll.
struct EditorLineView {
    /// Char offset of the line's first character
    line_start: usize,
    is_last_line: bool,
    /// Byte column of the cursor, when it is on this line
    cursor_col: Option<usize>,
    selection: Selection,
    hscroll: usize,
    width: usize,
}

/// Styled cells for one editor line, clipped to the visible columns.
///
/// Wide characters that straddle either edge are dropped rather than cut.
fn editor_line_spans(text: &str, view: &EditorLineView, palette: &Palette) -> Vec<Span<'static>> {
    let cursor_style = Style::default().bg(palette.cursor_bg).fg(palette.cursor_fg);
    let selected_style = Style::default().bg(palette.selection_bg);
    let right = view.hscroll + view.width;
    let selected = |offset: usize| offset >= view.selection.start && offset < view.selection.end;

    let mut cells: Vec<(char, Style)> = Vec::new();
    let mut col = 0;
    for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
        let ch_width = ch.width().unwrap_or(0);
        let start = col;
        col += ch_width;
        if start < view.hscroll {
            continue;
        }
        if col > right {
            break;
        }
        let style = if view.cursor_col == Some(byte_idx) {
            cursor_style
        } else if selected(view.line_start + char_idx) {
            selected_style
        } else {
            Style::default()
        };
        cells.push((ch, style));
    }

    // Cell after the last character: the cursor at end of line, or the
    // selected line break.
    let line_width = unicode_width::UnicodeWidthStr::width(text);
    if line_width >= view.hscroll && line_width < right {
        let eol = view.line_start + text.chars().count();
        if view.cursor_col.is_some_and(|c| c >= text.len()) {
            cells.push((' ', cursor_style));
        } else if !view.is_last_line && selected(eol) {
            cells.push((' ', selected_style));
        }
    }

    group_cells(cells)
}

/// Merge runs of equally styled cells into spans.
fn group_cells(cells: Vec<(char, Style)>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (ch, style) in cells {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    spans
}

fn render_preview(model: &Model, frame: &mut Frame, pane: Rect, palette: &Palette) {
    frame.render_widget(pane_block(" Preview ", palette), pane);

    let inner = layout::pane_inner(pane);
    let content_area = Rect {
        x: inner.x + PREVIEW_LEFT_PADDING.min(inner.width),
        width: inner.width.saturating_sub(PREVIEW_LEFT_PADDING),
        ..inner
    };
    let content: Vec<Line> = model
        .preview
        .visible_lines(model.preview_viewport.offset(), usize::from(inner.height))
        .into_iter()
        .map(|line| preview_line(line, model.theme))
        .collect();
    frame.render_widget(Paragraph::new(content), content_area);
}

fn preview_line(line: &RenderedLine, theme: Theme) -> Line<'static> {
    let line_style = style::style_for_line_type(line.line_type(), theme);
    match line.spans() {
        Some(spans) => Line::from(
            spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style::style_for_inline(line_style, span.style(), theme),
                    )
                })
                .collect::<Vec<_>>(),
        ),
        None => Line::styled(line.content().to_string(), line_style),
    }
}
