use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::app::App;

/// Full-width table of the roster produced by the last run.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = app
        .last_run
        .as_ref()
        .map(|r| r.outcome.roster.as_slice())
        .unwrap_or_default();

    let title = format!(" Roster ({} rows) ", rows.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let headers = app.config.columns.roster_headers();
    let header = Row::new(headers.iter().map(|h| Cell::from(h.to_string()))).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows
        .iter()
        .skip(app.roster_scroll)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.identity.name.clone()),
                Cell::from(row.identity.student_id.clone()),
                Cell::from(row.sex.clone()),
                Cell::from(row.identity.contact.clone()),
                Cell::from(row.window.to_string()),
                Cell::from(row.sequence.map(|s| s.to_string()).unwrap_or_default()),
            ])
        })
        .collect();

    let table = Table::new(
        body,
        [
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(34),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}
