use crate::cards::{Card, Rank, Suit};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::inner;

pub(super) fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
    }
}

fn rank_label(r: Rank) -> &'static str {
    match r {
        Rank::Ten => "10",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

/// Rank and suit glyph in the suit's colour, e.g. `10♥`.
pub(super) fn card_span(c: Card) -> Span<'static> {
    let (glyph, style) = suit_glyph_and_style(c.suit());
    Span::styled(format!("{}{}", rank_label(c.rank()), glyph), style)
}

pub(super) fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(card_span(c)),
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
