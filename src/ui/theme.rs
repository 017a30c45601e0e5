//! Light/dark theme flag and the root palette it selects.

use clap::ValueEnum;
use ratatui::style::Color;

/// The two-state UI theme. Starts light unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Label of the toggle button: the mode a click switches to.
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Dark Mode",
            Self::Dark => "Light Mode",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Colors applied to the root container and the chrome around it.
    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::Indexed(255),
                foreground: Color::Indexed(235),
                pane_background: Color::Indexed(231),
                border: Color::Indexed(250),
                muted: Color::Indexed(244),
                button_bg: Color::Indexed(252),
                button_fg: Color::Indexed(235),
                accent_bg: Color::Indexed(26),
                accent_fg: Color::Indexed(231),
                theme_button_bg: Color::Indexed(236),
                theme_button_fg: Color::Indexed(231),
                download_bg: Color::Indexed(26),
                copy_bg: Color::Indexed(28),
                selection_bg: Color::Indexed(153),
                cursor_bg: Color::Indexed(235),
                cursor_fg: Color::Indexed(231),
                status_bg: Color::Indexed(252),
                status_fg: Color::Indexed(235),
            },
            Self::Dark => Palette {
                background: Color::Indexed(234),
                foreground: Color::Indexed(253),
                pane_background: Color::Indexed(236),
                border: Color::Indexed(240),
                muted: Color::Indexed(243),
                button_bg: Color::Indexed(239),
                button_fg: Color::Indexed(253),
                accent_bg: Color::Indexed(26),
                accent_fg: Color::Indexed(231),
                theme_button_bg: Color::Indexed(227),
                theme_button_fg: Color::Indexed(16),
                download_bg: Color::Indexed(26),
                copy_bg: Color::Indexed(28),
                selection_bg: Color::Indexed(24),
                cursor_bg: Color::Indexed(253),
                cursor_fg: Color::Indexed(234),
                status_bg: Color::Indexed(236),
                status_fg: Color::Indexed(252),
            },
        }
    }
}

/// Resolved colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Root background behind every cell
    pub background: Color,
    /// Root foreground
    pub foreground: Color,
    /// Inside the write and preview panes
    pub pane_background: Color,
    pub border: Color,
    /// Line numbers, hints
    pub muted: Color,
    pub button_bg: Color,
    pub button_fg: Color,
    /// Active mode tab
    pub accent_bg: Color,
    pub accent_fg: Color,
    pub theme_button_bg: Color,
    pub theme_button_fg: Color,
    pub download_bg: Color,
    pub copy_bg: Color,
    pub selection_bg: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}
