use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_form(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 70, f.area());
    let block = Block::default().title("holdem-equity").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(3)])
        .split(inner(area));

    let title = vec![
        Line::from(Span::styled(
            "Texas Hold'em Equity Calculator",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Cards as rank + suit, e.g. As Kd 10c or 7d2d9c",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), rows[0]);

    let mut lines: Vec<Line> = Vec::new();
    for (i, it) in app.form_items_display().into_iter().enumerate() {
        let style = if i == app.form_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if i == app.form_index { "> " } else { "  " };
        lines.push(Line::from(Span::styled(format!("{marker}{it}"), style)));
    }
    lines.push(Line::from(""));
    if let Some(err) = app.form_error() {
        lines.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), rows[1]);

    let hint = if app.form_field_is_text() {
        "[Enter] Calculate  [Tab/↑/↓] Move  [Backspace] Delete  [Del] Clear  [F1] Help  [Esc] Quit"
    } else {
        "[Enter] Calculate  [Tab/↑/↓] Move  [+/-] Adjust  [?] Help  [Q] Quit"
    };
    let hint = Paragraph::new(Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM))))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[2]);
}
