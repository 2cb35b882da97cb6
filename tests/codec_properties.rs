use holdem_equity::cards::{parse_cards, tokens, Card, CardParseError, Rank, Suit};
use proptest::prelude::*;

fn card_at(i: usize) -> Card {
    Card::new(Rank::ALL[i % 13], Suit::ALL[i / 13])
}

#[test]
fn all_52_tokens_round_trip() {
    let mut seen = std::collections::HashSet::new();
    for i in 0..52 {
        let c = card_at(i);
        let t = c.token();
        assert_eq!(t.len(), 2);
        assert!(seen.insert(t.clone()), "token {t} repeated");
        assert_eq!(Card::parse_token(&t), Ok(c));
        assert_eq!(c.index(), i);
    }
}

#[test]
fn strict_tokens_reject_junk() {
    for bad in ["", "A", "1s", "Az", "Ass", "10h", "♥A"] {
        assert!(
            matches!(Card::parse_token(bad), Err(CardParseError::InvalidToken(_))),
            "{bad} accepted"
        );
    }
}

#[test]
fn lenient_parsing_accepts_separators_and_ten() {
    let cards = parse_cards("as, KD\t10h  9c").unwrap();
    assert_eq!(tokens(&cards), "AsKdTh9c");
    assert!(parse_cards("").unwrap().is_empty());
    assert!(parse_cards("7d2d9").is_err());
}

proptest! {
    #[test]
    fn concatenated_tokens_parse_back(idx in prop::collection::vec(0usize..52, 0..8)) {
        let cards: Vec<Card> = idx.iter().map(|i| card_at(*i)).collect();
        let text = tokens(&cards);
        prop_assert_eq!(parse_cards(&text).unwrap(), cards.clone());
        let spaced = cards.iter().map(|c| c.token()).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(parse_cards(&spaced).unwrap(), cards);
    }
}
