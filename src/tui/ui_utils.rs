use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::client::QueryState;

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

pub fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// One-line summary of a query state for the status line.
pub fn state_summary<T>(state: &QueryState<T>) -> String {
    match state {
        QueryState::Idle => "idle".to_string(),
        QueryState::Loading { stale: Some(_) } => "refreshing…".to_string(),
        QueryState::Loading { stale: None } => "loading…".to_string(),
        QueryState::Success {
            fetched_at,
            from_cache,
            ..
        } => {
            let source = if *from_cache { "cache" } else { "network" };
            format!("updated {} ({})", local_time(fetched_at), source)
        }
        QueryState::Error { message } => format!("error: {}", message),
    }
}
