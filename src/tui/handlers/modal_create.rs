use crate::tui::app::{Action, App};
use crossterm::event::{KeyCode, KeyEvent};

/// Handle CreateModal mode key events
pub fn handle_create_modal(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => app.close_create_modal(),
        KeyCode::Enter => return app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.prev(),
        // Fields are frozen while the request is in flight.
        _ if app.form.is_submitting() => {}
        KeyCode::Char(c) => app.form.push_char(app.focus, c),
        KeyCode::Backspace => app.form.pop_char(app.focus),
        _ => {}
    }

    Action::None
}
