use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use va_core::models::WindowSummary;

use crate::app::{App, RunReport};

/// Warnings listed below the window table before the rest are counted.
const MAX_WARNINGS: usize = 5;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Last Run ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match &app.last_run {
        Some(report) => report_lines(report),
        None if app.registrations.is_some() => vec![Line::from(Span::styled(
            " Ready. Press F5 or select Run to allocate.",
            Style::default().fg(Color::DarkGray),
        ))],
        None => vec![Line::from(Span::styled(
            " Enter a sign-up sheet path and press Enter to load it.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn report_lines(report: &RunReport) -> Vec<Line<'static>> {
    let outcome = &report.outcome;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", report.finished_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                report.output_path.display().to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                " {} rows: {} new, {} carried forward, {} rejected",
                outcome.roster.len(),
                outcome.newly_admitted,
                outcome.carried_forward,
                outcome.rejected()
            ),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                " {:<34}{:>5}{:>6}{:>6}{:>6}{:>6}",
                "Window", "Hist", "Open", "Cand", "Adm", "Rej"
            ),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    lines.extend(outcome.windows.iter().map(window_line));

    if !outcome.warnings.is_empty() {
        lines.push(Line::from(""));
        for warning in outcome.warnings.iter().take(MAX_WARNINGS) {
            lines.push(Line::from(Span::styled(
                format!(" ! {warning}"),
                Style::default().fg(Color::Yellow),
            )));
        }
        let hidden = outcome.warnings.len().saturating_sub(MAX_WARNINGS);
        if hidden > 0 {
            lines.push(Line::from(Span::styled(
                format!("   ... and {hidden} more"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines
}

fn window_line(w: &WindowSummary) -> Line<'static> {
    let color = if w.rejected > 0 {
        Color::Red
    } else {
        Color::White
    };
    Line::from(Span::styled(
        format!(
            " {:<34}{:>5}{:>6}{:>6}{:>6}{:>6}",
            w.window.to_string(),
            w.history_count,
            w.remaining,
            w.candidates,
            w.admitted,
            w.rejected
        ),
        Style::default().fg(color),
    ))
}
