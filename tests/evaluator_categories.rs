use holdem_equity::cards::{parse_cards, Card, Rank, Suit};
use holdem_equity::evaluator::{
    evaluate_five, evaluate_seven, Category, HandEvaluator, StandardEvaluator,
};
use holdem_equity::hand::HoleCards;
use proptest::prelude::*;
use std::cmp::Ordering;

fn five(s: &str) -> [Card; 5] {
    let xs = parse_cards(s).unwrap();
    [xs[0], xs[1], xs[2], xs[3], xs[4]]
}

#[test]
fn every_category_is_detected() {
    let cases = [
        ("AsKsQsJsTs", Category::StraightFlush),
        ("9c9d9h9sAc", Category::FourOfAKind),
        ("3c3d3hJsJc", Category::FullHouse),
        ("KhTh8h6h3h", Category::Flush),
        ("Ac5c4d3h2s", Category::Straight),
        ("7c7d7hKs2c", Category::ThreeOfAKind),
        ("8c8dKhKs2c", Category::TwoPair),
        ("QcQd9h5s2c", Category::Pair),
        ("AcJd9h5s2c", Category::HighCard),
    ];
    for (hand, category) in cases {
        assert_eq!(evaluate_five(&five(hand)).category, category, "{hand}");
    }
}

#[test]
fn kickers_break_ties_within_a_category() {
    assert!(evaluate_five(&five("QcQdAh5s2c")) > evaluate_five(&five("QhQsKh9s8c")));
    assert!(evaluate_five(&five("8c8d4h4s2c")) > evaluate_five(&five("7c7d6h6sAc")));
    assert_eq!(evaluate_five(&five("AcKd9h5s2c")), evaluate_five(&five("AdKh9s5c2d")));
}

#[test]
fn strength_is_lower_for_the_better_hand() {
    let e = StandardEvaluator;
    let board = five("Kh9h4c3d2s");
    let flush_draw_missed: HoleCards = "AhQh".parse().unwrap();
    let set: HoleCards = "4s4d".parse().unwrap();
    assert!(e.evaluate(&board, &set) < e.evaluate(&board, &flush_draw_missed));
}

fn any_card() -> impl Strategy<Value = Card> {
    (0usize..52).prop_map(|i| Card::new(Rank::ALL[i % 13], Suit::ALL[i / 13]))
}

fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    Just((0usize..52).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(move |v| v[..n].iter().map(|i| Card::new(Rank::ALL[i % 13], Suit::ALL[i / 13])).collect())
}

proptest! {
    #[test]
    fn five_card_ordering_is_total(a in prop::array::uniform5(any_card()), b in prop::array::uniform5(any_card()), c in prop::array::uniform5(any_card())) {
        let (ea, eb, ec) = (evaluate_five(&a), evaluate_five(&b), evaluate_five(&c));
        if ea >= eb && eb >= ea { prop_assert_eq!(ea, eb); }
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
    }

    #[test]
    fn seven_card_best_dominates_every_five(cards in prop::array::uniform7(any_card())) {
        let best7 = evaluate_seven(&cards);
        for i in 0..3 { for j in (i+1)..4 { for k in (j+1)..5 { for l in (k+1)..6 { for m in (l+1)..7 {
            prop_assert!(best7 >= evaluate_five(&[cards[i], cards[j], cards[k], cards[l], cards[m]]));
        }}}}}
    }

    #[test]
    fn strength_order_mirrors_evaluation_order(cards in distinct_cards(9)) {
        let board = [cards[0], cards[1], cards[2], cards[3], cards[4]];
        let a = HoleCards::try_new(cards[5], cards[6]).unwrap();
        let b = HoleCards::try_new(cards[7], cards[8]).unwrap();
        let seven = |h: &HoleCards| evaluate_seven(&[h.first(), h.second(), board[0], board[1], board[2], board[3], board[4]]);
        let by_eval = seven(&a).cmp(&seven(&b));
        let e = StandardEvaluator;
        let by_strength = e.evaluate(&board, &a).cmp(&e.evaluate(&board, &b));
        prop_assert_eq!(by_strength, by_eval.reverse());
        if by_eval == Ordering::Equal {
            prop_assert_eq!(e.evaluate(&board, &a), e.evaluate(&board, &b));
        }
    }
}
