use super::app::App;
use super::theme::theme;
use super::ui_utils;

use crate::form::SubmitStatus;
use crate::model::BookField;
use crate::validation::{MAX_AUTHOR_LENGTH, MAX_TITLE_LENGTH, MIN_CONTENT_LENGTH};

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn field_hint(field: BookField) -> String {
    match field {
        BookField::Title => format!("up to {} characters", MAX_TITLE_LENGTH),
        BookField::Author => format!("up to {} characters", MAX_AUTHOR_LENGTH),
        BookField::Content => format!("at least {} characters", MIN_CONTENT_LENGTH),
    }
}

pub fn draw_create_modal(f: &mut Frame, app: &App) {
    let area = ui_utils::centered_rect(60, 50, f.area());
    let t = theme();
    let form = &app.form;

    let mut content = vec![Line::from("")];

    for field in BookField::ALL {
        let active = app.focus == field;
        let label_style = if active {
            Style::default().fg(t.modal_cursor)
        } else {
            Style::default().fg(t.text)
        };

        let value = form.value(field);
        let value_span = if value.is_empty() {
            Span::styled(field_hint(field), Style::default().fg(t.text_muted))
        } else {
            Span::raw(value.to_string())
        };

        content.push(Line::from(vec![
            Span::styled(
                if active { "▶ " } else { "  " },
                Style::default().fg(t.modal_cursor),
            ),
            Span::styled(
                format!("{:<9}", format!("{}:", field.label())),
                label_style.add_modifier(Modifier::BOLD),
            ),
            value_span,
            if active && !form.is_submitting() {
                Span::styled("_", Style::default().fg(t.modal_cursor))
            } else {
                Span::raw("")
            },
        ]));

        match form.errors().get(field) {
            Some(error) => content.push(Line::from(Span::styled(
                format!("           {}", error),
                Style::default().fg(t.field_error),
            ))),
            None => content.push(Line::from("")),
        }
    }

    let status_line = match form.status() {
        SubmitStatus::Idle => Line::from(Span::styled(
            "Enter to save",
            Style::default().fg(t.text_muted),
        )),
        SubmitStatus::Submitting => Line::from(Span::styled(
            "Saving…",
            Style::default().fg(t.state_loading),
        )),
        SubmitStatus::Succeeded(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(t.state_success),
        )),
        SubmitStatus::Failed(message) => Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(t.state_error),
        )),
    };
    content.push(status_line);

    let modal = Paragraph::new(content)
        .block(
            Block::default()
                .title(" New Book ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.modal_border_create)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}
