//! Central theme configuration for the TUI.
//!
//! All colors and styles are defined here to keep the views consistent.

use ratatui::style::{Color, Modifier, Style};

use crate::client::QueryState;

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // General UI
    pub border: Color,
    pub border_focused: Color,
    pub selection_indicator: Color,
    pub cursor_blink: bool,

    // Text
    pub text: Color,
    pub text_muted: Color,
    pub text_highlight: Color,

    // Book fields
    pub id: Color,
    pub author: Color,

    // Query state
    pub state_loading: Color,
    pub state_success: Color,
    pub state_error: Color,

    // Schema view
    pub schema_root: Color,
    pub schema_field: Color,

    // Modal colors
    pub modal_border_create: Color,
    pub modal_cursor: Color,
    pub field_error: Color,

    // Footer/Mode colors
    pub mode_normal: (Color, Color), // (bg, fg)
    pub mode_schema: (Color, Color),
    pub mode_create: (Color, Color),

    // Message
    pub message: Color,

    // Help popup
    pub help_key: Color,
    pub help_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Monokai color scheme
        Self {
            border: Color::Rgb(117, 113, 94),
            border_focused: Color::Rgb(166, 226, 46),
            selection_indicator: Color::Rgb(166, 226, 46),
            cursor_blink: true,

            text: Color::Rgb(248, 248, 242),
            text_muted: Color::Rgb(117, 113, 94),
            text_highlight: Color::Rgb(248, 248, 242),

            id: Color::Rgb(166, 226, 46),
            author: Color::Rgb(230, 219, 116),

            state_loading: Color::Rgb(230, 219, 116), // Yellow
            state_success: Color::Rgb(166, 226, 46),  // Green
            state_error: Color::Rgb(249, 38, 114),    // Pink/red

            schema_root: Color::Rgb(174, 129, 255), // Purple
            schema_field: Color::Rgb(102, 217, 239),

            modal_border_create: Color::Rgb(102, 217, 239),
            modal_cursor: Color::Rgb(102, 217, 239),
            field_error: Color::Rgb(249, 38, 114),

            mode_normal: (Color::Rgb(102, 217, 239), Color::Rgb(39, 40, 34)),
            mode_schema: (Color::Rgb(174, 129, 255), Color::Rgb(248, 248, 242)),
            mode_create: (Color::Rgb(166, 226, 46), Color::Rgb(39, 40, 34)),

            message: Color::Rgb(166, 226, 46),

            help_key: Color::Rgb(102, 217, 239),
            help_border: Color::Rgb(230, 219, 116),
        }
    }
}

impl Theme {
    pub fn state_color<T>(&self, state: &QueryState<T>) -> Color {
        match state {
            QueryState::Idle => self.text_muted,
            QueryState::Loading { .. } => self.state_loading,
            QueryState::Success { .. } => self.state_success,
            QueryState::Error { .. } => self.state_error,
        }
    }

    /// Style for selected items
    pub fn selected_style(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Style for selection indicator (blinking cursor)
    pub fn selection_indicator_style(&self) -> Style {
        let style = Style::default().fg(self.selection_indicator);
        if self.cursor_blink {
            style.add_modifier(Modifier::SLOW_BLINK)
        } else {
            style
        }
    }

    /// Border style for blocks
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}

/// Global theme instance
static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
