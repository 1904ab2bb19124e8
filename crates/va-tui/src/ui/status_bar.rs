use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Mode};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // First line: status message or blank
    let status_line = if let Some(ref msg) = app.status_message {
        let color = if msg.starts_with("Error") || msg.contains("failed") {
            Color::Red
        } else {
            Color::Green
        };
        Line::from(Span::styled(format!(" {msg}"), Style::default().fg(color)))
    } else {
        Line::from("")
    };

    // Second line: context-sensitive hotkey hints
    let hints = match &app.mode {
        Mode::BlacklistPicker | Mode::ExitPicker => Line::from(vec![
            hint("Type", "filter"),
            Span::raw(" "),
            hint("Space", "toggle"),
            Span::raw(" "),
            hint("Enter", "done"),
        ]),
        Mode::Roster => Line::from(vec![
            hint("Up/Down", "scroll"),
            Span::raw(" "),
            hint("Esc", "back"),
        ]),
        Mode::ConfirmDialog { .. } => Line::from(vec![
            hint("Y", "es"),
            Span::raw(" "),
            hint("N", "o"),
        ]),
        Mode::Loading(_) => Line::from(Span::raw(" Working...")),
        Mode::Form | Mode::HelpDialog => Line::from(vec![
            hint("Tab", "next"),
            Span::raw(" "),
            hint("Enter", "load"),
            Span::raw(" "),
            hint("Space", "toggle"),
            Span::raw(" "),
            hint("F5", "run"),
            Span::raw(" "),
            hint("F1", "help"),
            Span::raw(" "),
            hint("Esc", "quit"),
        ]),
    };

    let widget = Paragraph::new(vec![status_line, hints]);
    f.render_widget(widget, area);
}

fn hint(key: &str, label: &str) -> Span<'static> {
    Span::styled(
        format!("[{key}]{label}"),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
}
