use crate::app::{App, Message, Model, ToastLevel};
use crate::export;

/// Notice shown after a successful copy.
pub const COPIED_NOTICE: &str = "Markdown copied!";

impl App {
    pub(super) fn handle_message_side_effects(&self, model: &mut Model, msg: &Message) {
        match msg {
            Message::Download => Self::download(model),
            Message::CopyMarkdown => self.copy_markdown(model),
            _ => {}
        }
    }

    fn download(model: &mut Model) {
        let text = model.buffer.text();
        match export::download(&text, &model.export_dir) {
            Ok(path) => {
                model.buffer.mark_clean();
                model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
            }
            Err(err) => {
                tracing::warn!(%err, dir = %model.export_dir.display(), "download failed");
                model.show_toast(ToastLevel::Error, format!("Download failed: {err}"));
            }
        }
    }

    fn copy_markdown(&self, model: &mut Model) {
        let text = model.buffer.text();
        match (self.clipboard)(&text) {
            Ok(()) => {
                // OSC 52 delivery is unobservable; the buffer stays dirty.
                tracing::info!(chars = text.chars().count(), "copied markdown to clipboard");
                model.notice = Some(COPIED_NOTICE.to_string());
            }
            Err(err) => {
                tracing::warn!(%err, "clipboard copy failed");
                model.show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
            }
        }
    }
}
