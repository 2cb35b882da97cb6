use crate::cards::{Card, Rank};
use crate::evaluator::Category;

/// Pre-computed facts about five cards, shared by every category check.
#[derive(Debug, Clone)]
pub(crate) struct HandAnalysis {
    pub sorted: [Card; 5],
    /// (rank, count) sorted by count desc then rank desc; only `len` entries are live.
    groups: [(Rank, u8); 5],
    len: usize,
    pub is_flush: bool,
    pub straight_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted = *cards;
        sorted.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));

        let mut counts = [0u8; 15];
        for c in &sorted {
            counts[c.rank().value() as usize] += 1;
        }

        let mut groups = [(Rank::Two, 0u8); 5];
        let mut len = 0;
        for r in Rank::ALL.iter().rev().copied() {
            let n = counts[r.value() as usize];
            if n > 0 {
                groups[len] = (r, n);
                len += 1;
            }
        }
        // stable sort keeps rank-descending order within equal counts
        groups[..len].sort_by(|a, b| b.1.cmp(&a.1));

        let is_flush = sorted.iter().all(|c| c.suit() == sorted[0].suit());
        let straight_top = straight_top(&groups[..len]);

        Self { sorted, groups, len, is_flush, straight_top }
    }

    fn groups(&self) -> &[(Rank, u8)] {
        &self.groups[..self.len]
    }

    fn ranks_with(&self, count: u8) -> impl Iterator<Item = Rank> + '_ {
        self.groups().iter().filter(move |(_, n)| *n == count).map(|(r, _)| *r)
    }

    /// Category plus five tiebreak ranks, most significant first.
    pub fn classify(&self) -> (Category, [Rank; 5]) {
        let pad = Rank::Two;
        let g = self.groups();
        let mut counts = [0u8; 5];
        for (slot, (_, n)) in counts.iter_mut().zip(g) {
            *slot = *n;
        }
        let shape = &counts[..self.len];

        if let (true, Some(top)) = (self.is_flush, self.straight_top) {
            return (Category::StraightFlush, [top, pad, pad, pad, pad]);
        }
        match shape {
            [4, 1] => return (Category::FourOfAKind, [g[0].0, g[1].0, pad, pad, pad]),
            [3, 2] => return (Category::FullHouse, [g[0].0, g[1].0, pad, pad, pad]),
            _ => {}
        }
        if self.is_flush {
            return (Category::Flush, self.ranks());
        }
        if let Some(top) = self.straight_top {
            return (Category::Straight, [top, pad, pad, pad, pad]);
        }
        let kickers: Vec<Rank> = self.ranks_with(1).collect();
        match shape {
            [3, 1, 1] => (Category::ThreeOfAKind, [g[0].0, kickers[0], kickers[1], pad, pad]),
            [2, 2, 1] => (Category::TwoPair, [g[0].0, g[1].0, kickers[0], pad, pad]),
            [2, 1, 1, 1] => {
                (Category::Pair, [g[0].0, kickers[0], kickers[1], kickers[2], pad])
            }
            _ => (Category::HighCard, self.ranks()),
        }
    }

    fn ranks(&self) -> [Rank; 5] {
        self.sorted.map(|c| c.rank())
    }
}

/// Top rank of a five-distinct-rank straight, with the wheel topping at Five.
fn straight_top(groups: &[(Rank, u8)]) -> Option<Rank> {
    if groups.len() != 5 {
        return None;
    }
    // groups are rank-descending here since every count is 1
    let hi = groups[0].0.value();
    let lo = groups[4].0.value();
    if hi - lo == 4 {
        return Some(groups[0].0);
    }
    let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    if groups.iter().map(|(r, _)| *r).eq(wheel) {
        return Some(Rank::Five);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyze(s: &str) -> HandAnalysis {
        let xs = parse_cards(s).unwrap();
        HandAnalysis::new(&[xs[0], xs[1], xs[2], xs[3], xs[4]])
    }

    #[test]
    fn royal_flush() {
        let a = analyze("AsKsQsJsTs");
        assert!(a.is_flush);
        assert_eq!(a.straight_top, Some(Rank::Ace));
        assert_eq!(a.classify().0, Category::StraightFlush);
    }

    #[test]
    fn wheel_tops_at_five() {
        let a = analyze("As2h3d4c5s");
        assert_eq!(a.straight_top, Some(Rank::Five));
        assert_eq!(a.classify(), (Category::Straight, [Rank::Five, Rank::Two, Rank::Two, Rank::Two, Rank::Two]));
    }

    #[test]
    fn groups_sort_by_count_then_rank() {
        let a = analyze("3s3hKdKcQs");
        assert_eq!(a.classify(), (Category::TwoPair, [Rank::King, Rank::Three, Rank::Queen, Rank::Two, Rank::Two]));
        let b = analyze("2s2h2dAcAs");
        assert_eq!(b.classify().0, Category::FullHouse);
        assert_eq!(b.classify().1[0], Rank::Two);
    }

    #[test]
    fn pair_kickers_descend() {
        let a = analyze("JsJh9d7c3s");
        assert_eq!(a.classify(), (Category::Pair, [Rank::Jack, Rank::Nine, Rank::Seven, Rank::Three, Rank::Two]));
    }

    #[test]
    fn near_straight_is_high_card() {
        let a = analyze("AsKhQdJc9s");
        assert_eq!(a.straight_top, None);
        assert_eq!(a.classify().0, Category::HighCard);
    }
}
