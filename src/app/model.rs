use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::document::{ComrakRenderer, Document, Renderer};
use crate::editor::EditorBuffer;
use crate::ui::layout::{self, Chrome, ViewMode};
use crate::ui::theme::Theme;
use crate::ui::viewport::Viewport;

/// Buffer contents at startup.
pub const PLACEHOLDER: &str = "# Hello, Markdown!";

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The markdown source being edited
    pub buffer: EditorBuffer,
    /// Which panes are visible
    pub view_mode: ViewMode,
    /// Active root palette
    pub theme: Theme,
    /// Preview rendered from `buffer`
    pub preview: Document,
    renderer: Box<dyn Renderer>,
    /// Scroll position of the preview pane
    pub preview_viewport: Viewport,
    /// Scroll position of the editor pane (in buffer lines)
    pub editor_viewport: Viewport,
    /// Horizontal scroll of the editor in display columns
    pub editor_hscroll: usize,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// Where downloads are written
    pub export_dir: PathBuf,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Blocking notice; swallows the next key or click
    pub notice: Option<String>,
    toast: Option<Toast>,
    /// Set after first quit attempt with unexported changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Wipe the terminal before the next draw
    pub needs_clear: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("view_mode", &self.view_mode)
            .field("theme", &self.theme)
            .field("size", &self.size)
            .field("dirty", &self.buffer.is_dirty())
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model holding the placeholder document.
    pub fn new(terminal_size: (u16, u16)) -> Self {
        let mut model = Self::unrendered(terminal_size);
        model.sync_layout();
        model
    }

    fn unrendered(terminal_size: (u16, u16)) -> Self {
        Self {
            buffer: EditorBuffer::from_text(PLACEHOLDER),
            view_mode: ViewMode::default(),
            theme: Theme::default(),
            preview: Document::empty(),
            renderer: Box::new(ComrakRenderer),
            preview_viewport: Viewport::default(),
            editor_viewport: Viewport::default(),
            editor_hscroll: 0,
            size: terminal_size,
            export_dir: PathBuf::from("."),
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            notice: None,
            toast: None,
            quit_confirmed: false,
            needs_clear: false,
            should_quit: false,
        }
    }

    /// Replace the buffer contents, e.g. to seed tests and benches.
    ///
    /// The buffer starts clean and the cursor at the top.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.buffer = EditorBuffer::from_text(text);
        self.editor_viewport = Viewport::default();
        self.editor_hscroll = 0;
        self.sync_layout();
        self
    }

    /// Render the preview through a different markdown engine.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self.preview = Document::empty();
        self.sync_layout();
        self
    }

    /// Screen regions for the current size, mode and theme.
    pub fn chrome(&self) -> Chrome {
        Chrome::compute(
            Rect::new(0, 0, self.size.0, self.size.1),
            self.view_mode,
            self.theme,
        )
    }

    /// Where buffer text is drawn, when the write pane is visible.
    pub fn editor_text_area(&self) -> Option<Rect> {
        self.chrome()
            .write_pane
            .map(|pane| layout::editor_text_area(pane, self.buffer.line_count()))
    }

    /// Whether the buffer changed since startup or the last export.
    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Re-fit both viewports and re-render the preview if it went stale.
    ///
    /// The preview is stale when the buffer text or the preview pane's
    /// content width no longer match what it was rendered from.
    pub(super) fn sync_layout(&mut self) {
        let (width, height) = self.size;
        let content_width = layout::preview_content_width(width, height, self.view_mode);
        let text = self.buffer.text();
        if self.preview.width() != content_width || self.preview.source() != text {
            self.preview = self.renderer.render(&text, content_width);
        }

        let pane_height = layout::pane_content_height(width, height);
        self.preview_viewport.resize(pane_height);
        self.preview_viewport
            .set_total_lines(self.preview.line_count());
        self.editor_viewport.resize(pane_height);
        self.editor_viewport
            .set_total_lines(self.buffer.line_count());
    }

    /// Scroll the editor so the cursor is on screen, both ways.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor = self.buffer.cursor();
        self.editor_viewport
            .set_total_lines(self.buffer.line_count());
        self.editor_viewport.ensure_visible(cursor.line);

        let Some(area) = self.editor_text_area() else {
            return;
        };
        let text_width = usize::from(area.width);
        if text_width == 0 {
            return;
        }
        let col = self.cursor_display_col();
        if col < self.editor_hscroll {
            self.editor_hscroll = col;
        } else if col >= self.editor_hscroll + text_width {
            self.editor_hscroll = col + 1 - text_width;
        }
    }

    /// Display column of the cursor within its line.
    pub fn cursor_display_col(&self) -> usize {
        let cursor = self.buffer.cursor();
        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        unicode_width::UnicodeWidthStr::width(line.get(..cursor.col).unwrap_or(&line))
    }

    /// Buffer position (line, byte column) under a screen cell in the editor.
    ///
    /// Cells right of a line's end map to its end; rows below the last line
    /// map to the last line.
    pub fn editor_position_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.editor_text_area()?;
        if row < area.y || row >= area.bottom() || column >= area.right() {
            return None;
        }
        let line = self.editor_viewport.offset() + usize::from(row - area.y);
        let line = line.min(self.buffer.line_count().saturating_sub(1));
        let display = self.editor_hscroll + usize::from(column.saturating_sub(area.x));
        let text = self.buffer.line_at(line).unwrap_or_default();
        Some((line, byte_col_at_display(&text, display)))
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// Byte offset of the character drawn at display column `display`.
///
/// A click on the right half of a wide character lands before it.
fn byte_col_at_display(line: &str, display: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > display {
            return idx;
        }
        width += ch_width;
    }
    line.len()
}

// Implement Default for Model to allow std::mem::take; skips rendering
impl Default for Model {
    fn default() -> Self {
        Self::unrendered((80, 24))
    }
}
