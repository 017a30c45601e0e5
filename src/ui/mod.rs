//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: View modes, pane geometry and button hit-testing
//! - [`theme`]: The light/dark root palette
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Preview styling per theme

pub mod layout;
pub mod style;
pub mod theme;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use layout::ViewMode;
pub use overlays::notice_rect;
pub use render::render;
pub use theme::Theme;

#[cfg(test)]
mod tests;
