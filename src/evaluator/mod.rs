//! Hand strength evaluation.
//!
//! The simulator only depends on [`HandEvaluator`]: a [`Strength`] score where a
//! lower value is a stronger hand and equal values tie at showdown.
//! [`StandardEvaluator`] is the bundled implementation.

mod analysis;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::fmt;

use analysis::HandAnalysis;

/// Showdown score. Lower is stronger; equal scores split the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strength(pub u32);

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scores a two-card hand against a complete five-card board.
///
/// Implementations must produce a total order where the lower [`Strength`] wins
/// and equal strengths denote a tie. The simulator compares scores with `<` and
/// `==` only and never inspects their meaning.
pub trait HandEvaluator: Sync {
    fn evaluate(&self, board: &[Card; 5], hand: &HoleCards) -> Strength;
}

/// Best five of seven, ranked by category then kickers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, board: &[Card; 5], hand: &HoleCards) -> Strength {
        let seven = [hand.first(), hand.second(), board[0], board[1], board[2], board[3], board[4]];
        evaluate_seven(&seven).value().strength()
    }
}

/// Compact, comparable hand value. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandValue(u32);

impl HandValue {
    // [ category (4) | r0 (4) | r1 (4) | r2 (4) | r3 (4) | r4 (4) ]
    const RANK_BITS: u32 = 4;
    const CATEGORY_SHIFT: u32 = Self::RANK_BITS * 5;
    const MAX: u32 = (1 << (Self::CATEGORY_SHIFT + 4)) - 1;

    pub fn from_parts(category: Category, ranks_desc: &[Rank; 5]) -> Self {
        let ranks = ranks_desc.iter().fold(0u32, |acc, r| (acc << Self::RANK_BITS) | r.value() as u32);
        HandValue(((category as u32) << Self::CATEGORY_SHIFT) | ranks)
    }

    /// Flip into the lower-is-stronger convention.
    pub const fn strength(self) -> Strength {
        Strength(Self::MAX - self.0)
    }
}

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Detailed evaluation result. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Evaluation {
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate")]
    NotEnoughCards,
}

/// Evaluate exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let analysis = HandAnalysis::new(cards);
    let (category, tiebreak) = analysis.classify();
    Evaluation { category, best_five: analysis.sorted, value: HandValue::from_parts(category, &tiebreak) }
}

/// Best of the 21 five-card subsets of seven cards.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    let mut best = evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    // each subset drops two of the seven cards
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            if (skip_a, skip_b) == (5, 6) {
                continue;
            }
            let mut five = [cards[0]; 5];
            let mut k = 0;
            for (i, c) in cards.iter().enumerate() {
                if i != skip_a && i != skip_b {
                    five[k] = *c;
                    k += 1;
                }
            }
            let eval = evaluate_five(&five);
            if eval > best {
                best = eval;
            }
        }
    }
    best
}

/// Best made hand for hole cards on a flop, turn or river, validating the inputs.
///
/// ```
/// use holdem_equity::evaluator::{evaluate_holdem, Category};
///
/// let eval = evaluate_holdem(&"AsAh".parse().unwrap(), &"QcJd9h3s2c".parse().unwrap()).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// let flop = evaluate_holdem(&"7s7h".parse().unwrap(), &"7d2c9h".parse().unwrap()).unwrap();
/// assert_eq!(flop.category.label(), "Three of a Kind");
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let mut cards = vec![hole.first(), hole.second()];
    cards.extend_from_slice(board.as_slice());
    match *cards.as_slice() {
        [a, b, c, d, e] => Ok(evaluate_five(&[a, b, c, d, e])),
        [a, b, c, d, e, f] => {
            let six = [a, b, c, d, e, f];
            (0..6)
                .map(|skip| {
                    let mut five = [a; 5];
                    let mut k = 0;
                    for (i, c) in six.iter().enumerate() {
                        if i != skip {
                            five[k] = *c;
                            k += 1;
                        }
                    }
                    evaluate_five(&five)
                })
                .max()
                .ok_or(EvalError::NotEnoughCards)
        }
        [a, b, c, d, e, f, g] => Ok(evaluate_seven(&[a, b, c, d, e, f, g])),
        _ => Err(EvalError::NotEnoughCards),
    }
}
