//! Screen layout: view modes, pane geometry and clickable chrome.
//!
//! Rows from the top: header with the theme button, mode tabs, formatting
//! toolbar, the pane body, export buttons, toast line and status bar.

use clap::ValueEnum;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::Theme;
use crate::editor::FormatCommand;

/// Columns between the preview pane border and its text.
pub const PREVIEW_LEFT_PADDING: u16 = 1;

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 3;
const BUTTON_GAP: u16 = 1;
const EXPORT_GAP: u16 = 3;

pub const APP_TITLE: &str = "Markdown Editor";
pub const DOWNLOAD_LABEL: &str = "Download README.md";
pub const COPY_LABEL: &str = "Copy Markdown";

/// Which panes are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    /// Editor only
    Write,
    /// Rendered preview only
    Preview,
    /// Editor and preview side by side
    #[default]
    Both,
}

impl ViewMode {
    /// Tab order.
    pub const ALL: [Self; 3] = [Self::Write, Self::Preview, Self::Both];

    pub const fn shows_write(self) -> bool {
        matches!(self, Self::Write | Self::Both)
    }

    pub const fn shows_preview(self) -> bool {
        matches!(self, Self::Preview | Self::Both)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Write => "WRITE",
            Self::Preview => "PREVIEW",
            Self::Both => "BOTH",
        }
    }

    /// Split the body into (write, preview) panes for this mode.
    pub fn split_panes(self, body: Rect) -> (Option<Rect>, Option<Rect>) {
        match self {
            Self::Write => (Some(body), None),
            Self::Preview => (None, Some(body)),
            Self::Both => {
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(body);
                (Some(chunks[0]), Some(chunks[1]))
            }
        }
    }
}

/// A clickable target on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    ThemeButton,
    Tab(ViewMode),
    Format(FormatCommand),
    Download,
    Copy,
    WritePane,
    PreviewPane,
}

/// Every region of the screen for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub header: Rect,
    pub theme_button: Rect,
    pub tabs: Vec<(ViewMode, Rect)>,
    pub toolbar: Vec<(FormatCommand, Rect)>,
    pub body: Rect,
    pub write_pane: Option<Rect>,
    pub preview_pane: Option<Rect>,
    pub export_row: Rect,
    pub download_button: Rect,
    pub copy_button: Rect,
    pub toast: Rect,
    pub status: Rect,
}

impl Chrome {
    pub fn compute(area: Rect, mode: ViewMode, theme: Theme) -> Self {
        let row = |offset: u16| Rect {
            y: area.y + offset.min(area.height.saturating_sub(1)),
            height: u16::from(area.height > offset),
            ..area
        };
        let from_bottom = |offset: u16| Rect {
            y: area.y + area.height.saturating_sub(offset),
            height: u16::from(area.height >= offset),
            ..area
        };

        let header = row(0);
        let theme_label = theme.toggle_label();
        let theme_width = button_width(theme_label).min(header.width);
        let theme_button = Rect {
            x: header.right().saturating_sub(theme_width),
            width: theme_width,
            ..header
        };

        let tab_row = row(1);
        let tab_labels: Vec<&str> = ViewMode::ALL.iter().map(|m| m.label()).collect();
        let tabs = ViewMode::ALL
            .into_iter()
            .zip(centered_buttons(tab_row, &tab_labels, BUTTON_GAP))
            .collect();

        let toolbar_row = row(2);
        let toolbar_labels: Vec<&str> = FormatCommand::ALL.iter().map(|c| c.label()).collect();
        let toolbar = FormatCommand::ALL
            .into_iter()
            .zip(left_buttons(toolbar_row, &toolbar_labels, BUTTON_GAP))
            .collect();

        let body = Rect {
            y: area.y + HEADER_ROWS.min(area.height),
            height: area.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS),
            ..area
        };
        let (write_pane, preview_pane) = mode.split_panes(body);

        let export_row = from_bottom(FOOTER_ROWS);
        let export = centered_buttons(export_row, &[DOWNLOAD_LABEL, COPY_LABEL], EXPORT_GAP);

        Self {
            header,
            theme_button,
            tabs,
            toolbar,
            body,
            write_pane,
            preview_pane,
            export_row,
            download_button: export[0],
            copy_button: export[1],
            toast: from_bottom(2),
            status: from_bottom(1),
        }
    }

    /// The clickable target under a screen cell, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let inside = |rect: Rect| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        };

        if inside(self.theme_button) {
            return Some(Hit::ThemeButton);
        }
        if let Some((mode, _)) = self.tabs.iter().find(|(_, r)| inside(*r)) {
            return Some(Hit::Tab(*mode));
        }
        if let Some((cmd, _)) = self.toolbar.iter().find(|(_, r)| inside(*r)) {
            return Some(Hit::Format(*cmd));
        }
        if inside(self.download_button) {
            return Some(Hit::Download);
        }
        if inside(self.copy_button) {
            return Some(Hit::Copy);
        }
        if self.write_pane.is_some_and(inside) {
            return Some(Hit::WritePane);
        }
        if self.preview_pane.is_some_and(inside) {
            return Some(Hit::PreviewPane);
        }
        None
    }
}

/// Text area inside a bordered pane.
pub const fn pane_inner(pane: Rect) -> Rect {
    Rect {
        x: pane.x.saturating_add(1),
        y: pane.y.saturating_add(1),
        width: pane.width.saturating_sub(2),
        height: pane.height.saturating_sub(2),
    }
}

/// Columns taken by the line-number gutter, including its trailing space.
pub fn gutter_width(line_count: usize) -> u16 {
    let digits = line_count.max(1).ilog10() as usize + 1;
    u16::try_from(digits + 1).unwrap_or(u16::MAX)
}

/// Text area of the editor pane: inside the border, right of the gutter.
pub fn editor_text_area(pane: Rect, line_count: usize) -> Rect {
    let inner = pane_inner(pane);
    let gutter = gutter_width(line_count).min(inner.width);
    Rect {
        x: inner.x + gutter,
        width: inner.width - gutter,
        ..inner
    }
}

/// Width the preview is laid out for, given the terminal size and mode.
pub fn preview_content_width(width: u16, height: u16, mode: ViewMode) -> u16 {
    let chrome = Chrome::compute(Rect::new(0, 0, width, height), mode, Theme::Light);
    chrome.preview_pane.map_or(1, |pane| {
        pane_inner(pane)
            .width
            .saturating_sub(PREVIEW_LEFT_PADDING)
            .max(1)
    })
}

/// Rows available for text inside the panes.
pub fn pane_content_height(width: u16, height: u16) -> u16 {
    let chrome = Chrome::compute(Rect::new(0, 0, width, height), ViewMode::Both, Theme::Light);
    pane_inner(chrome.body).height
}

/// A button is its label padded by one space on each side.
pub fn button_width(label: &str) -> u16 {
    u16::try_from(unicode_width::UnicodeWidthStr::width(label) + 2).unwrap_or(u16::MAX)
}

fn left_buttons(row: Rect, labels: &[&str], gap: u16) -> Vec<Rect> {
    place_buttons(row, row.x, labels, gap)
}

fn centered_buttons(row: Rect, labels: &[&str], gap: u16) -> Vec<Rect> {
    let total: u16 = labels
        .iter()
        .map(|l| button_width(l))
        .sum::<u16>()
        .saturating_add(gap.saturating_mul(u16::try_from(labels.len().saturating_sub(1)).unwrap_or(0)));
    let start = row.x + row.width.saturating_sub(total) / 2;
    place_buttons(row, start, labels, gap)
}

fn place_buttons(row: Rect, start: u16, labels: &[&str], gap: u16) -> Vec<Rect> {
    let mut x = start;
    labels
        .iter()
        .map(|label| {
            let width = button_width(label).min(row.right().saturating_sub(x));
            let rect = Rect {
                x,
                width,
                ..row
            };
            x = x.saturating_add(width).saturating_add(gap).min(row.right());
            rect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome(mode: ViewMode) -> Chrome {
        Chrome::compute(Rect::new(0, 0, 100, 30), mode, Theme::Light)
    }

    #[test]
    fn test_default_mode_is_both() {
        assert_eq!(ViewMode::default(), ViewMode::Both);
    }

    #[test]
    fn test_each_mode_shows_exactly_its_panes() {
        assert_eq!(
            ViewMode::ALL.map(|m| (m.shows_write(), m.shows_preview())),
            [(true, false), (false, true), (true, true)]
        );
        for mode in ViewMode::ALL {
            let c = chrome(mode);
            assert_eq!(c.write_pane.is_some(), mode.shows_write());
            assert_eq!(c.preview_pane.is_some(), mode.shows_preview());
        }
    }

    #[test]
    fn test_both_splits_body_in_half() {
        let c = chrome(ViewMode::Both);
        let (write, preview) = (c.write_pane.unwrap(), c.preview_pane.unwrap());
        assert_eq!(write.width, 50);
        assert_eq!(preview.width, 50);
        assert_eq!(preview.x, write.right());
    }

    #[test]
    fn test_single_pane_modes_fill_body() {
        let c = chrome(ViewMode::Preview);
        assert_eq!(c.preview_pane, Some(c.body));
    }

    #[test]
    fn test_rows_do_not_overlap() {
        let c = chrome(ViewMode::Both);
        assert_eq!(c.header.y, 0);
        assert_eq!(c.body.y, 3);
        assert_eq!(c.body.bottom(), c.export_row.y);
        assert_eq!(c.export_row.y + 1, c.toast.y);
        assert_eq!(c.toast.y + 1, c.status.y);
        assert_eq!(c.status.bottom(), 30);
    }

    #[test]
    fn test_theme_button_is_right_aligned_and_sized_by_label() {
        let light = chrome(ViewMode::Both);
        assert_eq!(light.theme_button.right(), 100);
        assert_eq!(light.theme_button.width, button_width("Dark Mode"));
        let dark = Chrome::compute(Rect::new(0, 0, 100, 30), ViewMode::Both, Theme::Dark);
        assert_eq!(dark.theme_button.width, button_width("Light Mode"));
    }

    #[test]
    fn test_hit_finds_every_button() {
        let c = chrome(ViewMode::Both);
        let t = c.theme_button;
        assert_eq!(c.hit(t.x, t.y), Some(Hit::ThemeButton));
        for (mode, rect) in &c.tabs {
            assert_eq!(c.hit(rect.x + 1, rect.y), Some(Hit::Tab(*mode)));
        }
        for (cmd, rect) in &c.toolbar {
            assert_eq!(c.hit(rect.right() - 1, rect.y), Some(Hit::Format(*cmd)));
        }
        let d = c.download_button;
        assert_eq!(c.hit(d.x, d.y), Some(Hit::Download));
        let p = c.copy_button;
        assert_eq!(c.hit(p.x, p.y), Some(Hit::Copy));
    }

    #[test]
    fn test_hit_panes_and_gaps() {
        let c = chrome(ViewMode::Both);
        assert_eq!(c.hit(10, 10), Some(Hit::WritePane));
        assert_eq!(c.hit(60, 10), Some(Hit::PreviewPane));
        let first = c.toolbar[0].1;
        assert_eq!(c.hit(first.right(), first.y), None, "gap between buttons");
    }

    #[test]
    fn test_preview_width_tracks_mode() {
        assert_eq!(preview_content_width(100, 30, ViewMode::Both), 47);
        assert_eq!(preview_content_width(100, 30, ViewMode::Preview), 97);
    }

    #[test]
    fn test_gutter_grows_with_line_count() {
        assert_eq!(gutter_width(0), 2);
        assert_eq!(gutter_width(9), 2);
        assert_eq!(gutter_width(10), 3);
        assert_eq!(gutter_width(1234), 5);
    }

    #[test]
    fn test_editor_text_area_sits_right_of_gutter() {
        let pane = Rect::new(0, 3, 50, 24);
        let text = editor_text_area(pane, 120);
        assert_eq!(text.x, 1 + 4);
        assert_eq!(text.y, 4);
        assert_eq!(text.width, 48 - 4);
        assert_eq!(text.height, 22);
    }

    #[test]
    fn test_editor_text_area_in_narrow_pane() {
        let text = editor_text_area(Rect::new(0, 0, 3, 5), 100);
        assert_eq!(text.width, 0);
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        let c = Chrome::compute(Rect::new(0, 0, 5, 2), ViewMode::Both, Theme::Light);
        assert_eq!(c.body.height, 0);
        assert!(c.theme_button.width <= 5);
    }
}
