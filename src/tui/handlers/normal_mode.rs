use crate::tui::app::{Action, App, ViewMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle Normal mode key events
pub fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Action {
    // Clear message after any key press
    app.message = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('?') => app.show_help = !app.show_help,
        KeyCode::Esc => app.show_help = false,
        KeyCode::Tab | KeyCode::BackTab => return app.switch_view(),
        KeyCode::Char('r') => return app.refetch(),
        KeyCode::Char('c') => app.open_create_modal(),
        KeyCode::Down | KeyCode::Char('j') => match app.view_mode {
            ViewMode::Books => app.next(),
            ViewMode::Schema => app.scroll_schema_down(),
        },
        KeyCode::Up | KeyCode::Char('k') => match app.view_mode {
            ViewMode::Books => app.previous(),
            ViewMode::Schema => app.scroll_schema_up(),
        },
        _ => {}
    }

    Action::None
}
