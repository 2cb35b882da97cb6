use crate::hand::{Board, HoleCards};
use crate::table::{TableRow, TableSection};
use crate::tui::app::{Analysis, AppState, ResultsTab};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::cards::{card_span, render_card_widget};
use super::layout::{columns, inner};

pub(super) fn draw_results(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)])
        .split(f.area());

    let selected = match app.tab {
        ResultsTab::Equity => 0,
        ResultsTab::Ranges => 1,
    };
    let tabs = Tabs::new(vec!["Equity", "Ranges"])
        .select(selected)
        .block(Block::default().title("holdem-equity").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.analysis() {
        Some(analysis) => match app.tab {
            ResultsTab::Equity => draw_equity(f, chunks[1], analysis),
            ResultsTab::Ranges => draw_ranges(f, chunks[1], analysis),
        },
        None => {
            let para = Paragraph::new("Nothing calculated yet. Press Esc to edit the hand.");
            f.render_widget(para.block(Block::default().borders(Borders::ALL)), chunks[1]);
        }
    }

    let keys = Paragraph::new(Line::from(Span::styled(
        "[Tab] Switch view  [Esc/E] Edit hand  [?] Help  [Q] Quit",
        Style::default().add_modifier(Modifier::DIM),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(keys, chunks[2]);
}

fn draw_equity(f: &mut Frame, area: Rect, analysis: &Analysis) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    draw_board(f, rows[0], &analysis.request.board);
    draw_hands(f, rows[1], &analysis.request.hero, &analysis.request.known_opponents);

    let est = &analysis.estimate;
    let max_bet = match analysis.max_bet {
        Ok(ratio) => format!("{ratio:.1}x Pot"),
        Err(_) => "undefined".to_string(),
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::raw("Win probability: "),
            Span::styled(format!("{:.2}%", est.equity() * 100.0), bold.fg(Color::Green)),
        ]),
        Line::from(vec![Span::raw("Max bet: "), Span::styled(max_bet, bold)]),
        Line::from(vec![
            Span::raw("Made hand: "),
            Span::raw(analysis.made_hand.map_or("-", |c| c.label())),
        ]),
        Line::from(format!(
            "Win {:.1}%  Tie {:.1}%  Loss {:.1}%  over {} simulations vs {} opponent(s)",
            est.win_rate() * 100.0,
            est.tie_rate() * 100.0,
            est.loss_rate() * 100.0,
            est.trials,
            analysis.request.opponents
        )),
        Line::from(Span::styled(
            format!("Computed in {:.2?}", analysis.elapsed),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let para = Paragraph::new(lines).block(Block::default().title("Equity").borders(Borders::ALL));
    f.render_widget(para, rows[2]);
}

fn draw_board(f: &mut Frame, area: Rect, board: &Board) {
    let block = Block::default().title("Community cards").borders(Borders::ALL);
    let board_inner = inner(area);
    f.render_widget(block, area);
    let slots = columns(board_inner, Board::MAX, board_inner.width / Board::MAX as u16);
    for (i, slot) in slots.iter().enumerate() {
        render_card_widget(f, *slot, board.as_slice().get(i).copied(), None);
    }
}

fn draw_hands(f: &mut Frame, area: Rect, hero: &HoleCards, known: &[HoleCards]) {
    let block = Block::default().title("Hands").borders(Borders::ALL);
    let hands_inner = inner(area);
    f.render_widget(block, area);
    let hands = 1 + known.len();
    let cols = columns(hands_inner, hands, hands_inner.width / hands as u16);
    for (i, col) in cols.iter().enumerate() {
        let (hand, color) = match i {
            0 => (*hero, Color::Cyan),
            _ => (known[i - 1], Color::Magenta),
        };
        let halves = columns(*col, 2, col.width.min(16) / 2);
        render_card_widget(f, halves[0], Some(hand.first()), Some(color));
        render_card_widget(f, halves[1], Some(hand.second()), Some(color));
    }
}

fn draw_ranges(f: &mut Frame, area: Rect, analysis: &Analysis) {
    let table = &analysis.table;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let suits: String = table.suit_order.iter().map(|s| s.to_char()).collect();
    let debug = format!(
        "Suits by frequency: [{}]  default suits: {}",
        suits,
        table.default_suits
    );
    f.render_widget(
        Paragraph::new(Span::styled(debug, Style::default().add_modifier(Modifier::DIM))),
        chunks[0],
    );

    let n = table.sections.len().max(1);
    let width = chunks[1].width / n as u16;
    for (section, col) in table.sections.iter().zip(columns(chunks[1], n, width)) {
        draw_section(f, col, section);
    }
}

fn draw_section(f: &mut Frame, area: Rect, section: &TableSection) {
    let header = Row::new(vec!["Opponent", "Hand", "Edge"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = section.rows.iter().map(table_row).collect();
    let widths = [Constraint::Length(9), Constraint::Length(8), Constraint::Length(6)];
    let widget = Table::new(rows, widths).header(header).block(
        Block::default().title(format!("vs {}x", section.anchor)).borders(Borders::ALL),
    );
    f.render_widget(widget, area);
}

fn table_row(row: &TableRow) -> Row<'static> {
    let hand = match row.hand {
        Some(h) => Line::from(vec![card_span(h.first()), card_span(h.second())]),
        None => Line::from("Null"),
    };
    let edge = match row.edge {
        Some(e) => e.to_string(),
        None => "Null".to_string(),
    };
    let style = if row.is_highlighted() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Row::new(vec![Cell::from(row.class.to_string()), Cell::from(hand), Cell::from(edge)]).style(style)
}
