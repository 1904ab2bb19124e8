use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::layout::centered_rect;

pub fn render(f: &mut Frame) {
    let area = centered_rect(65, 80, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help: Keybindings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = vec![
        section_header("Form"),
        key_line("Tab / Down", "Next field"),
        key_line("Shift+Tab / Up", "Previous field"),
        key_line("Enter", "Load the sheet in a path field"),
        key_line("Space", "Toggle round, checkbox, open picker"),
        key_line("F5", "Run allocation"),
        key_line("v", "View roster (on Run)"),
        key_line("F1 / ?", "Show this help"),
        key_line("Esc", "Quit"),
        Line::from(""),
        section_header("Pickers"),
        key_line("Type", "Fuzzy filter"),
        key_line("Up/Down", "Navigate list"),
        key_line("Space", "Select / unselect"),
        key_line("Enter / Esc", "Done"),
        Line::from(""),
        section_header("Roster"),
        key_line("Up/Down", "Scroll"),
        key_line("Esc", "Back to form"),
        Line::from(""),
        section_header("Dialogs"),
        key_line("Y / Enter", "Confirm"),
        key_line("N / Esc", "Cancel"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("    {key:<16}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
