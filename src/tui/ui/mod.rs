mod cards;
mod form;
mod layout;
mod results;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::*;
use ratatui::widgets::*;

use layout::{centered_rect, inner};

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Form => form::draw_form(f, app),
        Scene::Calculating => draw_calculating(f, app),
        Scene::Results => results::draw_results(f, app),
    }
    if app.help_open() {
        draw_help(f);
    }
}

fn draw_calculating(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let block = Block::default().title("Calculating").borders(Borders::ALL);
    let elapsed = app.calculating_for().unwrap_or_default();
    let lines = vec![
        Line::from(format!(
            "{} simulations vs {} opponent(s), then the range table",
            app.cfg_trials, app.cfg_opponents
        )),
        Line::from(format!("Running for {:.1}s", elapsed.as_secs_f64())),
        Line::from(""),
        Line::from(Span::styled("[Esc/C] Cancel  [Q] Quit", Style::default().add_modifier(Modifier::DIM))),
    ];
    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Form:", bold)),
        Line::from("- Up / Down / Tab: move between fields"),
        Line::from("- type cards into the card fields, Backspace / Del to edit"),
        Line::from("- + / - or Left / Right: adjust opponents and simulations"),
        Line::from("- Enter: calculate, Esc while running: cancel"),
        Line::from(""),
        Line::from(Span::styled("Results:", bold)),
        Line::from("- Tab: switch between Equity and Ranges"),
        Line::from("- Esc / E: back to the form"),
        Line::from("- Edge is the opponent's share, 100 minus your equity"),
        Line::from("- Null: every suit choice for that hand is already visible"),
        Line::from(""),
        Line::from("Close help: ?, F1 or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
