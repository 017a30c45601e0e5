use crate::app::{Model, ToastLevel};
use crate::editor::{Direction, EditorBuffer, FormatCommand, is_line_break};
use crate::ui::layout::ViewMode;

/// A cursor motion inside the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One step in a direction (arrows)
    Cursor(Direction),
    /// Beginning of line (Home)
    LineStart,
    /// End of line (End)
    LineEnd,
    /// One word left (Ctrl+Left)
    WordLeft,
    /// One word right (Ctrl+Right)
    WordRight,
    /// Start of buffer (Ctrl+Home)
    BufferStart,
    /// End of buffer (Ctrl+End)
    BufferEnd,
    /// Absolute (line, byte column), e.g. from a mouse click
    To(usize, usize),
}

impl Motion {
    fn apply(self, buf: &mut EditorBuffer) {
        match self {
            Self::Cursor(dir) => buf.move_cursor(dir),
            Self::LineStart => buf.move_home(),
            Self::LineEnd => buf.move_end(),
            Self::WordLeft => buf.move_word_left(),
            Self::WordRight => buf.move_word_right(),
            Self::BufferStart => buf.move_to_start(),
            Self::BufferEnd => buf.move_to_end(),
            Self::To(line, col) => buf.move_to(line, col),
        }
    }
}

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert pasted text at the cursor
    EditorPaste(String),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move the cursor, dropping any selection
    EditorMove(Motion),
    /// Move the cursor, extending the selection (Shift+motion, mouse drag)
    EditorSelect(Motion),
    /// Select the whole buffer (Ctrl+A)
    EditorSelectAll,
    /// Drop the selection, keeping the cursor (Esc)
    EditorClearSelection,
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),

    // Formatting
    /// Wrap the selection with a toolbar command's tokens
    ApplyFormat(FormatCommand),

    // View
    /// Show the panes of a view mode
    SetViewMode(ViewMode),
    /// Flip between the light and dark palettes
    ToggleTheme,

    // Preview navigation
    /// Scroll preview up by n lines
    ScrollUp(usize),
    /// Scroll preview down by n lines
    ScrollDown(usize),
    /// Scroll preview up one page
    PageUp,
    /// Scroll preview down one page
    PageDown,
    /// Go to beginning of preview
    GoToTop,
    /// Go to end of preview
    GoToBottom,

    // Export (performed as side effects)
    /// Write the buffer as README.md into the export directory
    Download,
    /// Put the buffer on the system clipboard
    CopyMarkdown,
    /// Close the blocking notice
    DismissNotice,

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation on any action other than the confirmed one.
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }

    match msg {
        // Editor
        Message::EditorInsertChar(ch) => {
            model.buffer.insert_char(ch);
            after_edit(&mut model);
        }
        Message::EditorPaste(text) => {
            model.buffer.insert_str(&normalize_paste(&text));
            after_edit(&mut model);
        }
        Message::EditorDeleteBack => {
            model.buffer.delete_back();
            after_edit(&mut model);
        }
        Message::EditorDeleteForward => {
            model.buffer.delete_forward();
            after_edit(&mut model);
        }
        Message::EditorSplitLine => {
            model.buffer.split_line();
            after_edit(&mut model);
        }
        Message::EditorMove(motion) => {
            model.buffer.clear_selection();
            motion.apply(&mut model.buffer);
            model.ensure_cursor_visible();
        }
        Message::EditorSelect(motion) => {
            model.buffer.extend_selection(|buf| motion.apply(buf));
            model.ensure_cursor_visible();
        }
        Message::EditorSelectAll => {
            model.buffer.select_all();
            model.ensure_cursor_visible();
        }
        Message::EditorClearSelection => {
            model.buffer.clear_selection();
        }
        Message::EditorScrollUp(n) => {
            model.editor_viewport.scroll_up(n);
        }
        Message::EditorScrollDown(n) => {
            model.editor_viewport.scroll_down(n);
        }

        // Formatting
        Message::ApplyFormat(command) => {
            if model.view_mode.shows_write() {
                model.buffer.apply_wrap(command.wrap());
                after_edit(&mut model);
            } else {
                model.show_toast(
                    ToastLevel::Info,
                    format!(
                        "{} needs the editor: switch to WRITE or BOTH",
                        command.title()
                    ),
                );
            }
        }

        // View
        Message::SetViewMode(mode) => {
            model.view_mode = mode;
            model.sync_layout();
            model.ensure_cursor_visible();
        }
        Message::ToggleTheme => {
            model.theme = model.theme.toggled();
        }

        // Preview navigation
        Message::ScrollUp(n) => model.preview_viewport.scroll_up(n),
        Message::ScrollDown(n) => model.preview_viewport.scroll_down(n),
        Message::PageUp => model.preview_viewport.page_up(),
        Message::PageDown => model.preview_viewport.page_down(),
        Message::GoToTop => model.preview_viewport.go_to_top(),
        Message::GoToBottom => model.preview_viewport.go_to_bottom(),

        // Download/CopyMarkdown: handled in effects (side effect)
        Message::Download | Message::CopyMarkdown => {}
        Message::Redraw => {
            model.needs_clear = true;
        }
        Message::DismissNotice => {
            model.notice = None;
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.size = (width, height);
            model.sync_layout();
            model.ensure_cursor_visible();
        }

        // Application
        Message::Quit => {
            if model.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to download",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Re-render the preview and follow the cursor after the buffer changed.
fn after_edit(model: &mut Model) {
    model.sync_layout();
    model.ensure_cursor_visible();
}

/// Terminals deliver pasted line breaks as `\r\n` or bare `\r`, and web
/// text brings Unicode separators; all become `\n`. Tabs become four
/// spaces so every character has a display width.
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace(is_line_break, "\n")
        .replace('\t', "    ")
}
