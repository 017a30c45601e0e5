//! Text editing for the write pane.
//!
//! A rope-backed buffer with cursor and selection management, the pure
//! insertion function the formatting toolbar is built on, and the toolbar's
//! command table.

mod buffer;
mod commands;
mod insert;

pub use buffer::{Cursor, Direction, EditorBuffer, is_line_break};
pub use commands::{FormatCommand, Wrap};
pub use insert::{Selection, insert, wrap_selection};
