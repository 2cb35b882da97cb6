//! Canonical opponent hands for starting-hand rank classes.
//!
//! A [`RankClass`] such as `AK` names thirteen-by-thirteen grid cells without
//! suits. To simulate against one we need a concrete hand that does not reuse a
//! visible card. The [`Resolver`] picks suits for it: first the two most common
//! suits among the visible cards, then a fixed list of alternatives, and finally
//! [`Resolution::Unassignable`] when every candidate collides.

use crate::cards::{Card, Rank, RankParseError, Suit};
use crate::hand::HoleCards;
use std::fmt;
use std::str::FromStr;

/// Suits used when nothing is visible yet.
pub const FALLBACK_SUITS: SuitPair = SuitPair(Suit::Diamonds, Suit::Spades);

/// Alternatives tried, in order, when the default suits collide.
pub const CANDIDATE_SUITS: [SuitPair; 6] = [
    SuitPair(Suit::Diamonds, Suit::Spades),
    SuitPair(Suit::Diamonds, Suit::Hearts),
    SuitPair(Suit::Diamonds, Suit::Clubs),
    SuitPair(Suit::Spades, Suit::Hearts),
    SuitPair(Suit::Spades, Suit::Clubs),
    SuitPair(Suit::Hearts, Suit::Clubs),
];

/// Suit order used to pad the frequency ranking.
const PAD_ORDER: [Suit; 4] = [Suit::Diamonds, Suit::Spades, Suit::Hearts, Suit::Clubs];

/// Two ranks without suits; equal ranks are a pocket pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankClass {
    pub first: Rank,
    pub second: Rank,
}

impl RankClass {
    pub const fn new(first: Rank, second: Rank) -> Self {
        Self { first, second }
    }

    pub const fn pair(rank: Rank) -> Self {
        Self { first: rank, second: rank }
    }

    pub fn is_pair(&self) -> bool {
        self.first == self.second
    }

    /// First suit goes to the first rank, second suit to the second rank.
    pub fn with_suits(&self, suits: SuitPair) -> (Card, Card) {
        (Card::new(self.first, suits.0), Card::new(self.second, suits.1))
    }
}

impl fmt::Display for RankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

impl FromStr for RankClass {
    type Err = RankParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => Ok(Self::new(Rank::try_from(a)?, Rank::try_from(b)?)),
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuitPair(pub Suit, pub Suit);

impl fmt::Display for SuitPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// Visible cards, as a 52-bit set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockedCards(u64);

impl BlockedCards {
    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1 << card.index()) != 0
    }

    pub fn insert(&mut self, card: Card) {
        self.0 |= 1 << card.index();
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Card> for BlockedCards {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = Self::default();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// Suits of `visible` by descending count, ties going to the suit seen first.
/// Suits that never appear are left out.
pub fn suit_frequency(visible: &[Card]) -> Vec<Suit> {
    let mut seen: Vec<(Suit, usize)> = Vec::with_capacity(4);
    for c in visible {
        match seen.iter_mut().find(|(s, _)| *s == c.suit()) {
            Some((_, n)) => *n += 1,
            None => seen.push((c.suit(), 1)),
        }
    }
    seen.sort_by(|a, b| b.1.cmp(&a.1));
    seen.into_iter().map(|(s, _)| s).collect()
}

/// The two most frequent visible suits, padded with [`FALLBACK_SUITS`] and then
/// the remaining suits when fewer than two are visible.
pub fn default_suits(visible: &[Card]) -> SuitPair {
    let mut order = suit_frequency(visible);
    for s in [FALLBACK_SUITS.0, FALLBACK_SUITS.1].into_iter().chain(PAD_ORDER) {
        if order.len() >= 2 {
            break;
        }
        if !order.contains(&s) {
            order.push(s);
        }
    }
    SuitPair(order[0], order[1])
}

/// Outcome of resolving one rank class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The frequency-derived default suits were free.
    Default(HoleCards),
    /// A candidate from [`CANDIDATE_SUITS`] was used.
    Fallback(HoleCards),
    /// Every candidate collides with a visible card.
    Unassignable,
}

impl Resolution {
    pub fn hand(&self) -> Option<HoleCards> {
        match self {
            Resolution::Default(h) | Resolution::Fallback(h) => Some(*h),
            Resolution::Unassignable => None,
        }
    }

    pub fn is_unassignable(&self) -> bool {
        matches!(self, Resolution::Unassignable)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hand() {
            Some(h) => write!(f, "{h}"),
            None => write!(f, "Null"),
        }
    }
}

/// Picks collision-free suits for rank classes against one set of visible cards.
///
/// ```
/// use holdem_equity::cards::parse_cards;
/// use holdem_equity::range::{Resolution, Resolver};
///
/// let visible = parse_cards("AsAh 7d2d9c").unwrap();
/// let resolver = Resolver::new(&visible);
/// let aa = resolver.resolve("AA".parse().unwrap());
/// assert_eq!(aa.to_string(), "AdAc");
/// assert!(matches!(aa, Resolution::Fallback(_)));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    blocked: BlockedCards,
    default: SuitPair,
}

impl Resolver {
    pub fn new(visible: &[Card]) -> Self {
        Self { blocked: visible.iter().copied().collect(), default: default_suits(visible) }
    }

    pub fn default_suits(&self) -> SuitPair {
        self.default
    }

    pub fn blocked(&self) -> &BlockedCards {
        &self.blocked
    }

    fn assign(&self, class: RankClass, suits: SuitPair) -> Option<HoleCards> {
        let (a, b) = class.with_suits(suits);
        if self.blocked.contains(a) || self.blocked.contains(b) {
            return None;
        }
        HoleCards::try_new(a, b).ok()
    }

    pub fn resolve(&self, class: RankClass) -> Resolution {
        if let Some(hand) = self.assign(class, self.default) {
            log::trace!("{class}: default suits {} -> {hand}", self.default);
            return Resolution::Default(hand);
        }
        for suits in CANDIDATE_SUITS {
            if let Some(hand) = self.assign(class, suits) {
                log::trace!("{class}: candidate {suits} -> {hand}");
                return Resolution::Fallback(hand);
            }
        }
        log::trace!("{class}: no collision-free suits");
        Resolution::Unassignable
    }

    /// Resolve every class of `catalog`, in catalog order.
    pub fn resolve_all(&self, catalog: &RangeCatalog) -> Vec<(RankClass, Resolution)> {
        catalog.classes().map(|c| (c, self.resolve(c))).collect()
    }
}

/// One anchor rank and the classes listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub anchor: Rank,
    pub classes: Vec<RankClass>,
}

impl CatalogRow {
    /// `RR` followed by `R` with every lower kicker, highest first.
    pub fn anchored(anchor: Rank) -> Self {
        let mut classes = vec![RankClass::pair(anchor)];
        classes.extend(
            Rank::ALL.iter().rev().filter(|k| **k < anchor).map(|k| RankClass::new(anchor, *k)),
        );
        Self { anchor, classes }
    }
}

/// Table of rank classes to build equity rows for, grouped by anchor rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCatalog {
    rows: Vec<CatalogRow>,
}

impl RangeCatalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    pub fn anchored(anchors: &[Rank]) -> Self {
        Self::new(anchors.iter().map(|a| CatalogRow::anchored(*a)).collect())
    }

    /// Every anchor from Ace down to Two.
    pub fn full() -> Self {
        let anchors: Vec<Rank> = Rank::ALL.iter().rev().copied().collect();
        Self::anchored(&anchors)
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn classes(&self) -> impl Iterator<Item = RankClass> + '_ {
        self.rows.iter().flat_map(|r| r.classes.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(|r| r.classes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RangeCatalog {
    /// Aces and kings.
    fn default() -> Self {
        Self::anchored(&[Rank::Ace, Rank::King])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn frequency_orders_by_count_then_first_seen() {
        assert_eq!(suit_frequency(&cards("7d2d9c")), vec![Suit::Diamonds, Suit::Clubs]);
        assert_eq!(suit_frequency(&cards("9c7h")), vec![Suit::Clubs, Suit::Hearts]);
        assert!(suit_frequency(&[]).is_empty());
    }

    #[test]
    fn default_suits_pad_when_short() {
        assert_eq!(default_suits(&[]), FALLBACK_SUITS);
        assert_eq!(default_suits(&cards("AsKsQs")), SuitPair(Suit::Spades, Suit::Diamonds));
        assert_eq!(default_suits(&cards("2d")), SuitPair(Suit::Diamonds, Suit::Spades));
        assert_eq!(default_suits(&cards("ThJhQh")), SuitPair(Suit::Hearts, Suit::Diamonds));
    }

    #[test]
    fn default_path_used_when_free() {
        let r = Resolver::new(&cards("7d2d9c"));
        assert_eq!(r.default_suits(), SuitPair(Suit::Diamonds, Suit::Clubs));
        let res = r.resolve("AK".parse().unwrap());
        assert_eq!(res, Resolution::Default("AdKc".parse().unwrap()));
    }

    #[test]
    fn collision_walks_candidates_in_order() {
        // Ad visible: (d,c) default fails, (d,*) candidates fail, (s,h) is next
        let r = Resolver::new(&cards("Ad7d9c"));
        let res = r.resolve("AK".parse().unwrap());
        assert_eq!(res, Resolution::Fallback("AsKh".parse().unwrap()));
    }

    #[test]
    fn four_aces_visible_is_unassignable() {
        let r = Resolver::new(&cards("AsAh AdAc2c"));
        let res = r.resolve(RankClass::pair(Rank::Ace));
        assert_eq!(res, Resolution::Unassignable);
        assert_eq!(res.to_string(), "Null");
        assert!(res.hand().is_none());
    }

    #[test]
    fn resolved_hands_never_touch_visible_cards() {
        let visible = cards("AsKd Qh7d2d");
        let r = Resolver::new(&visible);
        for (_, res) in r.resolve_all(&RangeCatalog::full()) {
            if let Some(h) = res.hand() {
                assert!(!visible.contains(&h.first()) && !visible.contains(&h.second()));
            }
        }
    }

    #[test]
    fn catalog_shapes() {
        let cat = RangeCatalog::default();
        assert_eq!(cat.rows().len(), 2);
        assert_eq!(cat.rows()[0].classes.len(), 13);
        assert_eq!(cat.rows()[1].classes.len(), 12);
        let labels: Vec<String> = cat.rows()[0].classes.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels[..3], ["AA", "AK", "AQ"]);
        assert_eq!(labels[12], "A2");
        assert_eq!(RangeCatalog::full().len(), 91);
    }

    #[test]
    fn rank_class_parse() {
        let c: RankClass = "KT".parse().unwrap();
        assert_eq!(c, RankClass::new(Rank::King, Rank::Ten));
        assert!(!c.is_pair());
        assert!("K".parse::<RankClass>().is_err());
        assert!("KX".parse::<RankClass>().is_err());
    }
}
