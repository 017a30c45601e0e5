//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::COPIED_NOTICE;
pub use model::{Model, PLACEHOLDER, ToastLevel};
pub use update::{Message, Motion, update};

use std::path::PathBuf;

use crate::export::ExportError;
use crate::ui::layout::ViewMode;
use crate::ui::theme::Theme;

/// Writes text to the system clipboard.
pub type ClipboardFn = fn(&str) -> Result<(), ExportError>;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    theme: Theme,
    view_mode: ViewMode,
    export_dir: PathBuf,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
    clipboard: ClipboardFn,
}

impl App {
    /// Create a new application with default settings.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            export_dir: PathBuf::from("."),
            config_global_path: None,
            config_local_path: None,
            clipboard: crate::export::copy_to_clipboard,
        }
    }

    /// Set the startup theme.
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the startup view mode.
    pub const fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Set the directory downloads are written to.
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Replace the clipboard writer.
    pub const fn with_clipboard(mut self, clipboard: ClipboardFn) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// The model the event loop starts from, for a terminal of `size`.
    pub fn initial_model(&self, size: (u16, u16)) -> Model {
        let mut model = Model::new(size);
        model.theme = self.theme;
        model.view_mode = self.view_mode;
        model.export_dir.clone_from(&self.export_dir);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        update(model, Message::SetViewMode(self.view_mode))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
