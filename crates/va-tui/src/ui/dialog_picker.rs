use std::hash::Hash;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::app::{Picker, PICKER_PAGE};
use crate::ui::layout::centered_rect;

pub fn render<K: Clone + Eq + Hash>(f: &mut Frame, title: &str, picker: &Picker<K>) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // filter input
            Constraint::Length(1), // blank
            Constraint::Min(3),    // options
            Constraint::Length(1), // help text
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::White)),
            Span::styled(
                picker.query.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(
                format!("   {} selected", picker.chosen.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        chunks[0],
    );

    if picker.filtered.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                " No matches",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[2],
        );
    } else {
        let offset = picker.scroll_offset();
        let items: Vec<ListItem> = picker
            .filtered
            .iter()
            .enumerate()
            .skip(offset)
            .take(PICKER_PAGE)
            .map(|(pos, &idx)| {
                let is_cursor = pos == picker.cursor;
                let mark = if picker.is_chosen(idx) { "[x]" } else { "[ ]" };
                let style = if is_cursor {
                    Style::default()
                        .fg(Color::Yellow)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let prefix = if is_cursor { " > " } else { "   " };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(format!("{mark} "), style),
                    Span::styled(picker.options[idx].1.clone(), style),
                ]))
            })
            .collect();
        f.render_widget(List::new(items), chunks[2]);
    }

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Up/Down", Style::default().fg(Color::Yellow)),
            Span::styled(" navigate  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::styled(" toggle  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter/Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" done", Style::default().fg(Color::DarkGray)),
        ])),
        chunks[3],
    );
}
