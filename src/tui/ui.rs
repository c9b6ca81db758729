use super::app::{App, InputMode, ViewMode};
use super::theme::theme;
use super::ui_modals;
use super::ui_utils;

use crate::client::{QueryState, RootType};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // View tabs + query state
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Footer (keybindings only)
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    match app.view_mode {
        ViewMode::Books => draw_books(f, app, chunks[1]),
        ViewMode::Schema => draw_schema(f, app, chunks[1]),
    }
    draw_footer(f, app, chunks[2]);

    if app.input_mode == InputMode::CreateModal {
        ui_modals::draw_create_modal(f, app);
    }
    if app.show_help {
        draw_help_popup(f);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let mut spans = Vec::new();
    for view in [ViewMode::Books, ViewMode::Schema] {
        let style = if view == app.view_mode {
            Style::default()
                .fg(t.text_highlight)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(t.text_muted)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(view.label(), style));
    }

    let (summary, color) = match app.view_mode {
        ViewMode::Books => (
            ui_utils::state_summary(&app.books),
            t.state_color(&app.books),
        ),
        ViewMode::Schema => (
            ui_utils::state_summary(&app.schema),
            t.state_color(&app.schema),
        ),
    };
    spans.push(Span::styled("  │  ", Style::default().fg(t.border)));
    spans.push(Span::styled(summary, Style::default().fg(color)));
    if app.view_mode == ViewMode::Books {
        spans.push(Span::styled(
            format!("  [{}]", app.strategy.label()),
            Style::default().fg(t.text_muted),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_books(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_book_list(f, app, chunks[0]);
    draw_book_detail(f, app, chunks[1]);
}

fn draw_book_list(f: &mut Frame, app: &mut App, area: Rect) {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style(true))
        .title(format!(" Books ({}) ", app.book_list().len()));

    if app.book_list().is_empty() {
        let text = match &app.books {
            QueryState::Error { message } => Line::from(Span::styled(
                format!("Error: {}", message),
                Style::default().fg(t.state_error),
            )),
            QueryState::Idle | QueryState::Loading { .. } => Line::from(Span::styled(
                "Loading…",
                Style::default().fg(t.state_loading),
            )),
            QueryState::Success { .. } => Line::from(Span::styled(
                "No books yet. Press c to add one.",
                Style::default().fg(t.text_muted),
            )),
        };
        f.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .book_list()
        .iter()
        .enumerate()
        .map(|(i, book)| {
            let selected = i == app.selected_index;
            let indicator = if selected {
                Span::styled("▶ ", t.selection_indicator_style())
            } else {
                Span::raw("  ")
            };
            let title_style = if selected {
                t.selected_style().fg(t.text_highlight)
            } else {
                Style::default().fg(t.text)
            };
            ListItem::new(vec![
                Line::from(vec![
                    indicator,
                    Span::styled(ui_utils::truncate(&book.title, width), title_style),
                ]),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        ui_utils::truncate(&book.author, width),
                        Style::default().fg(t.author),
                    ),
                ]),
            ])
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_book_detail(f: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style(false))
        .title(" Detail ");

    let Some(book) = app.selected_book() else {
        f.render_widget(block, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default()
                .fg(t.text_highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("by ", Style::default().fg(t.text_muted)),
            Span::styled(book.author.clone(), Style::default().fg(t.author)),
            Span::styled(format!("  #{}", book.id), Style::default().fg(t.id)),
        ]),
        Line::from(""),
    ];
    lines.extend(book.content.lines().map(|l| Line::from(l.to_string())));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_schema(f: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style(true))
        .title(" Schema (r to reload) ");

    let lines = match &app.schema {
        QueryState::Success { data, .. } => {
            let mut lines = root_type_lines("Query", &data.schema.query_type);
            if let Some(mutation) = &data.schema.mutation_type {
                lines.push(Line::from(""));
                lines.extend(root_type_lines("Mutation", mutation));
            }
            lines
        }
        QueryState::Error { message } => vec![Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(t.state_error),
        ))],
        QueryState::Idle | QueryState::Loading { .. } => vec![Line::from(Span::styled(
            "Loading schema…",
            Style::default().fg(t.state_loading),
        ))],
    };

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.schema_scroll, 0)),
        area,
    );
}

fn root_type_lines(kind: &str, root: &RootType) -> Vec<Line<'static>> {
    let t = theme();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", kind),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(root.name.clone(), Style::default().fg(t.schema_root)),
    ])];
    for field in root.fields() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(field.signature(), Style::default().fg(t.schema_field)),
        ]));
        if let Some(description) = &field.description {
            lines.push(Line::from(Span::styled(
                format!("    {}", description),
                Style::default().fg(t.text_muted),
            )));
        }
    }
    lines
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let mode_indicator = match (app.input_mode, app.view_mode) {
        (InputMode::CreateModal, _) => Span::styled(
            " CREATE ",
            Style::default().bg(t.mode_create.0).fg(t.mode_create.1),
        ),
        (InputMode::Normal, ViewMode::Books) => Span::styled(
            " BOOKS ",
            Style::default().bg(t.mode_normal.0).fg(t.mode_normal.1),
        ),
        (InputMode::Normal, ViewMode::Schema) => Span::styled(
            " SCHEMA ",
            Style::default().bg(t.mode_schema.0).fg(t.mode_schema.1),
        ),
    };

    let help_text = match (app.input_mode, app.view_mode) {
        (InputMode::Normal, ViewMode::Books) => {
            " ↑↓:nav  Tab:schema  r:refetch  c:create  ?:help  q:quit "
        }
        (InputMode::Normal, ViewMode::Schema) => {
            " ↑↓:scroll  Tab:books  r:reload  c:create  ?:help  q:quit "
        }
        (InputMode::CreateModal, _) => " Tab:next field  Enter:create  Esc:close ",
    };

    let mut footer_spans = vec![mode_indicator];

    if let Some(ref msg) = app.message {
        footer_spans.push(Span::raw(" "));
        footer_spans.push(Span::styled(
            msg,
            Style::default().fg(t.message).add_modifier(Modifier::BOLD),
        ));
    }

    footer_spans.push(Span::styled(help_text, Style::default().fg(t.text_muted)));

    let keybindings = Paragraph::new(Line::from(footer_spans));
    f.render_widget(keybindings, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = ui_utils::centered_rect(50, 60, f.area());
    let t = theme();
    let key_style = Style::default().fg(t.help_key);

    let entry = |key: &'static str, what: &'static str| {
        Line::from(vec![Span::styled(key, key_style), Span::raw(what)])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        entry("↑/↓ j/k   ", "Move up/down"),
        entry("Tab       ", "Switch between Books/Schema"),
        Line::from(""),
        Line::from(Span::styled(
            "Actions",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        entry("r         ", "Refetch from the server"),
        entry("c         ", "Create new book"),
        entry("?         ", "Toggle this help"),
        entry("q         ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Create form",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        entry("Tab/S-Tab ", "Next/previous field"),
        entry("Enter     ", "Submit"),
        entry("Esc       ", "Close"),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.help_border)),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
