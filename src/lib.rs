// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. export::ExportError)
    clippy::module_name_repetitions
)]

//! # Markpad
//!
//! A terminal markdown editor with live preview.
//!
//! Markpad pairs a text editor with a rendered preview:
//! - Formatting toolbar that wraps the selection in markdown
//! - Write, preview and side-by-side view modes
//! - Light and dark themes
//! - Export to `README.md` or the clipboard
//!
//! ## Architecture
//!
//! Markpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Text buffer, insertion and formatting commands
//! - [`document`]: Markdown rendering for the preview
//! - [`highlight`]: Syntax highlighting in preview code blocks
//! - [`export`]: Download and clipboard export
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved startup defaults
//! - [`logging`]: Opt-in file logging

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod export;
pub mod highlight;
pub mod logging;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{ComrakRenderer, Document, Renderer};
    pub use crate::editor::{EditorBuffer, FormatCommand, Selection};
    pub use crate::ui::viewport::Viewport;
    pub use crate::ui::{Theme, ViewMode};
}
