//! The formatting toolbar's command table.

/// An insertion directive: text placed before and after the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap {
    pub before: &'static str,
    pub after: &'static str,
}

/// A formatting action bound to a toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    Bold,
    Italic,
    Link,
    Image,
    Quote,
    Highlight,
}

impl FormatCommand {
    /// Toolbar order.
    pub const ALL: [Self; 6] = [
        Self::Bold,
        Self::Italic,
        Self::Link,
        Self::Image,
        Self::Quote,
        Self::Highlight,
    ];

    pub const fn wrap(self) -> Wrap {
        match self {
            Self::Bold => Wrap {
                before: "**",
                after: "**",
            },
            Self::Italic => Wrap {
                before: "_",
                after: "_",
            },
            Self::Link => Wrap {
                before: "[Text](https://)",
                after: "",
            },
            Self::Image => Wrap {
                before: "![alt](image-url)",
                after: "",
            },
            Self::Quote => Wrap {
                before: "> ",
                after: "",
            },
            // Not CommonMark; previewed as literal text.
            Self::Highlight => Wrap {
                before: "==",
                after: "==",
            },
        }
    }

    /// Short label drawn on the toolbar button.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::Quote => "Quote",
            Self::Highlight => "Mark",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::Quote => "Quote",
            Self::Highlight => "Highlight",
        }
    }

    /// Key pressed together with Alt to fire the command.
    pub const fn shortcut(self) -> char {
        match self {
            Self::Bold => 'b',
            Self::Italic => 'i',
            Self::Link => 'k',
            Self::Image => 'g',
            Self::Quote => 'q',
            Self::Highlight => 'h',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|cmd| cmd.shortcut() == key)
    }
}
