use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Message, Model, Motion};
use crate::editor::{Direction, FormatCommand};
use crate::ui::layout::{Hit, ViewMode};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// Spaces inserted for Tab.
const TAB: &str = "    ";

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "queueing resize");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        if model.notice.is_some() {
            return Some(Message::DismissNotice);
        }
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if !model.view_mode.shows_write() || text.is_empty() {
            return None;
        }
        Some(Message::EditorPaste(text.to_string()))
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        // The notice and help overlay swallow the next click
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            if model.notice.is_some() {
                return Some(Message::DismissNotice);
            }
            if model.help_visible {
                return Some(Message::HideHelp);
            }
        }
        if model.notice.is_some() || model.help_visible {
            return None;
        }

        let chrome = model.chrome();
        let hit = chrome.hit(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match hit? {
                Hit::ThemeButton => Some(Message::ToggleTheme),
                Hit::Tab(mode) => Some(Message::SetViewMode(mode)),
                Hit::Format(command) => Some(Message::ApplyFormat(command)),
                Hit::Download => Some(Message::Download),
                Hit::Copy => Some(Message::CopyMarkdown),
                Hit::WritePane => model
                    .editor_position_at(mouse.column, mouse.row)
                    .map(|(line, col)| Message::EditorMove(Motion::To(line, col))),
                Hit::PreviewPane => None,
            },
            MouseEventKind::Drag(MouseButton::Left) => {
                let (line, col) = model.editor_position_at(mouse.column, mouse.row)?;
                Some(Message::EditorSelect(Motion::To(line, col)))
            }
            MouseEventKind::ScrollUp => match hit? {
                Hit::WritePane => Some(Message::EditorScrollUp(WHEEL_LINES)),
                Hit::PreviewPane => Some(Message::ScrollUp(WHEEL_LINES)),
                _ => None,
            },
            MouseEventKind::ScrollDown => match hit? {
                Hit::WritePane => Some(Message::EditorScrollDown(WHEEL_LINES)),
                Hit::PreviewPane => Some(Message::ScrollDown(WHEEL_LINES)),
                _ => None,
            },
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.notice.is_some() {
            return Some(Message::DismissNotice);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        // Global shortcuts
        match key.code {
            KeyCode::Char('q' | 'Q') if ctrl => return Some(Message::Quit),
            KeyCode::Char('t' | 'T') if ctrl => return Some(Message::ToggleTheme),
            KeyCode::Char('s' | 'S') if ctrl => return Some(Message::Download),
            KeyCode::Char('l' | 'L') if ctrl => return Some(Message::Redraw),
            KeyCode::Char('c' | 'C') if alt => return Some(Message::CopyMarkdown),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::F(2) => return Some(Message::SetViewMode(ViewMode::Write)),
            KeyCode::F(3) => return Some(Message::SetViewMode(ViewMode::Preview)),
            KeyCode::F(4) => return Some(Message::SetViewMode(ViewMode::Both)),
            KeyCode::Char('1') if alt => return Some(Message::SetViewMode(ViewMode::Write)),
            KeyCode::Char('2') if alt => return Some(Message::SetViewMode(ViewMode::Preview)),
            KeyCode::Char('3') if alt => return Some(Message::SetViewMode(ViewMode::Both)),
            KeyCode::Char(c) if alt && !ctrl => {
                return FormatCommand::from_shortcut(c).map(Message::ApplyFormat);
            }
            KeyCode::PageUp => return Some(Message::PageUp),
            KeyCode::PageDown => return Some(Message::PageDown),
            _ => {}
        }

        if !model.view_mode.shows_write() {
            return Self::handle_preview_key(key);
        }

        let motion = match key.code {
            KeyCode::Left if ctrl => Some(Motion::WordLeft),
            KeyCode::Right if ctrl => Some(Motion::WordRight),
            KeyCode::Home if ctrl => Some(Motion::BufferStart),
            KeyCode::End if ctrl => Some(Motion::BufferEnd),
            KeyCode::Left => Some(Motion::Cursor(Direction::Left)),
            KeyCode::Right => Some(Motion::Cursor(Direction::Right)),
            KeyCode::Up => Some(Motion::Cursor(Direction::Up)),
            KeyCode::Down => Some(Motion::Cursor(Direction::Down)),
            KeyCode::Home => Some(Motion::LineStart),
            KeyCode::End => Some(Motion::LineEnd),
            _ => None,
        };
        if let Some(motion) = motion {
            return Some(if shift {
                Message::EditorSelect(motion)
            } else {
                Message::EditorMove(motion)
            });
        }

        match key.code {
            KeyCode::Char('a' | 'A') if ctrl => Some(Message::EditorSelectAll),
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::EditorInsertChar(c)),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Tab => Some(Message::EditorPaste(TAB.to_string())),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Esc => Some(Message::EditorClearSelection),
            _ => None,
        }
    }

    /// Keys while only the preview is shown: arrows scroll it.
    fn handle_preview_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Home => Some(Message::GoToTop),
            KeyCode::End => Some(Message::GoToBottom),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
