use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, FormField, Round};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Allocation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines = Vec::new();
    for field in FormField::visible(app.form.round) {
        let focused = app.form.focus == field;
        lines.push(field_line(field, &field_value(app, field), focused));
        if let Some(note) = field_note(app, field) {
            lines.push(Line::from(Span::styled(
                format!("      {note}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn label(field: FormField) -> &'static str {
    match field {
        FormField::Registrations => "Sign-up sheet",
        FormField::Round => "Round",
        FormField::History => "History roster",
        FormField::Incremental => "New only",
        FormField::Blacklist => "Blacklist",
        FormField::Exits => "Exits",
        FormField::Capacity => "Seats/window",
        FormField::Output => "Output file",
        FormField::Run => "",
    }
}

fn field_value(app: &App, field: FormField) -> String {
    let form = &app.form;
    match field {
        FormField::Registrations => form.registrations_path.clone(),
        FormField::Round => format!("< {} >", form.round.label()),
        FormField::History => form.history_path.clone(),
        FormField::Incremental => {
            let mark = if form.incremental { "x" } else { " " };
            format!("[{mark}] export only newly admitted rows")
        }
        FormField::Blacklist => format!("{} selected", app.blacklist.chosen.len()),
        FormField::Exits => format!("{} selected", app.exits.chosen.len()),
        FormField::Capacity => form.capacity.clone(),
        FormField::Output => form.output_path.clone(),
        FormField::Run => "[ Run allocation ]".into(),
    }
}

/// Dim line under a field describing what was loaded for it.
fn field_note(app: &App, field: FormField) -> Option<String> {
    match field {
        FormField::Registrations => app.registrations.as_ref().map(|r| {
            format!(
                "{} registrants, {} candidate slots",
                r.sheet.registrants.len(),
                r.candidate_count
            )
        }),
        FormField::History if app.form.round == Round::Subsequent => {
            app.history.as_ref().map(|h| format!("{} rows", h.rows.len()))
        }
        _ => None,
    }
}

fn field_line(field: FormField, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { " > " } else { "   " };
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    if field == FormField::Run {
        return Line::from(vec![
            Span::styled(marker, style),
            Span::styled(
                value.to_string(),
                if focused {
                    style
                } else {
                    Style::default().fg(Color::Green)
                },
            ),
        ]);
    }

    let value_style = if field.is_text() {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{:<15}", label(field)), Style::default().fg(Color::Cyan)),
        Span::styled(value.to_string(), value_style),
    ])
}
