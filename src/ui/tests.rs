use super::*;
use crate::app::{COPIED_NOTICE, Message, Model, Motion, update};
use crate::editor::Direction;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn draw(model: &Model) -> Terminal<TestBackend> {
    let (width, height) = model.size;
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, row)].symbol())
        .collect()
}

#[test]
fn test_render_shows_chrome_and_placeholder() {
    let model = Model::new((100, 30));
    let screen = screen_text(&draw(&model));

    assert!(screen.contains("Markdown Editor"));
    assert!(screen.contains("Dark Mode"));
    for label in ["WRITE", "PREVIEW", "BOTH"] {
        assert!(screen.contains(label), "missing tab {label}");
    }
    for label in ["B", "I", "Link", "Image", "Quote", "Mark"] {
        assert!(screen.contains(&format!(" {label} ")), "missing button {label}");
    }
    assert!(screen.contains("Download README.md"));
    assert!(screen.contains("Copy Markdown"));
    assert!(screen.contains("Write"));
    assert!(screen.contains("Preview"));
    assert_eq!(screen.matches("Hello, Markdown!").count(), 2, "editor and preview");
}

#[test]
fn test_write_mode_hides_preview_pane() {
    let model = update(Model::new((100, 30)), Message::SetViewMode(ViewMode::Write));
    let screen = screen_text(&draw(&model));
    assert!(screen.contains(" Write "));
    assert!(!screen.contains(" Preview "));
    assert_eq!(screen.matches("Hello, Markdown!").count(), 1);
}

#[test]
fn test_preview_mode_hides_editor_pane() {
    let model = update(Model::new((100, 30)), Message::SetViewMode(ViewMode::Preview));
    let screen = screen_text(&draw(&model));
    assert!(!screen.contains(" Write "));
    assert!(screen.contains(" Preview "));
}

#[test]
fn test_root_background_follows_theme() {
    let light = Model::new((100, 30));
    let dark = update(Model::new((100, 30)), Message::ToggleTheme);

    let light_term = draw(&light);
    let dark_term = draw(&dark);
    let light_cell = &light_term.backend().buffer()[(40, 0)];
    let dark_cell = &dark_term.backend().buffer()[(40, 0)];

    assert_eq!(light_cell.bg, Theme::Light.palette().background);
    assert_eq!(dark_cell.bg, Theme::Dark.palette().background);
    assert!(screen_text(&dark_term).contains("Light Mode"));
}

#[test]
fn test_preview_follows_typing() {
    let mut model = Model::new((100, 30)).with_text("");
    for ch in "- task".chars() {
        model = update(model, Message::EditorInsertChar(ch));
    }
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("• task"), "preview should render the bullet");
}

#[test]
fn test_bold_renders_in_preview_without_markers() {
    let model = Model::new((100, 30)).with_text("Hello **world**");
    let terminal = draw(&model);
    let chrome = model.chrome();
    let preview = chrome.preview_pane.unwrap();
    let row = row_text(&terminal, preview.y + 1);
    let preview_part: String = row
        .chars()
        .skip(usize::from(preview.x))
        .collect();
    assert!(preview_part.contains("Hello world"));
}

#[test]
fn test_notice_popup_is_drawn() {
    let mut model = Model::new((100, 30));
    model.notice = Some(COPIED_NOTICE.to_string());
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Markdown copied!"));
    assert!(screen.contains("Press any key"));
}

#[test]
fn test_help_overlay_lists_shortcuts() {
    let model = update(Model::new((100, 40)), Message::ToggleHelp);
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Formatting"));
    assert!(screen.contains("Alt+b"));
    assert!(screen.contains("Download README.md"));
}

#[test]
fn test_quit_warning_toast_is_drawn() {
    let model = update(Model::new((100, 30)), Message::EditorInsertChar('x'));
    let model = update(model, Message::Quit);
    let terminal = draw(&model);
    let toast_row = row_text(&terminal, model.chrome().toast.y);
    assert!(toast_row.starts_with("[warn]"));
}

#[test]
fn test_status_bar_shows_mode_and_modified() {
    let model = update(Model::new((100, 30)), Message::EditorInsertChar('x'));
    let terminal = draw(&model);
    let status = row_text(&terminal, 29);
    assert!(status.contains("BOTH"));
    assert!(status.contains("[modified]"));
    assert!(status.contains("Ln 1, Col 2"));
}

#[test]
fn test_multibyte_line_with_cursor_renders() {
    let mut model = Model::new((60, 20)).with_text("héllo 世界 ✓");
    for _ in 0..3 {
        model = update(model, Message::EditorMove(Motion::Cursor(Direction::Right)));
    }
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("héllo"));
}

#[test]
fn test_long_line_scrolls_horizontally() {
    let line = "x".repeat(200) + "END";
    let model = update(
        Model::new((60, 20)).with_text(&line),
        Message::EditorMove(Motion::LineEnd),
    );
    assert!(model.editor_hscroll > 0);
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("END"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    for (w, h) in [(1, 1), (10, 3), (20, 6)] {
        let model = Model::new((w, h));
        let _ = draw(&model);
    }
}
