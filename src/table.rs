//! Hero edge against each rank class of a [`RangeCatalog`].

use crate::cards::{Card, Rank, Suit};
use crate::evaluator::HandEvaluator;
use crate::hand::{Board, HoleCards};
use crate::range::{suit_frequency, CatalogRow, RangeCatalog, RankClass, Resolution, Resolver, SuitPair};
use crate::simulation::{EquityRequest, SimError, Simulator};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Edges at or above this are highlighted by front ends.
pub const HIGHLIGHT_EDGE: u8 = 52;

/// One catalog class and the hero's edge against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow {
    pub class: RankClass,
    /// Canonical opponent hand; `None` when no suits were free.
    pub hand: Option<HoleCards>,
    /// `100 - hero equity %`, truncated: the opponent class's share of the pot.
    pub edge: Option<u8>,
}

impl TableRow {
    pub fn is_highlighted(&self) -> bool {
        self.edge.is_some_and(|e| e >= HIGHLIGHT_EDGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSection {
    pub anchor: Rank,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquityTable {
    pub sections: Vec<TableSection>,
    /// Visible suits by frequency, as used for the default assignment.
    pub suit_order: Vec<Suit>,
    pub default_suits: SuitPair,
}

impl EquityTable {
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> + '_ {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }
}

/// Percentage edge from a hero equity in `[0, 1]`, truncated toward zero.
pub fn edge_from_equity(equity: f64) -> u8 {
    (100.0 - equity * 100.0).clamp(0.0, 100.0) as u8
}

/// Simulate the hero heads-up against a canonical hand for every class of
/// `catalog`, `trials` trials per class.
///
/// Unassignable classes produce a row without a hand or edge and run no trials.
/// Rows keep catalog order.
pub fn build_equity_table<E>(
    hero: HoleCards,
    board: &Board,
    catalog: &RangeCatalog,
    simulator: &Simulator<E>,
    trials: usize,
) -> Result<EquityTable, SimError>
where
    E: HandEvaluator + Clone,
{
    build_equity_table_until(hero, board, catalog, simulator, trials, None)
}

/// Like [`build_equity_table`], polling `stop` between and during rows. A raised
/// flag fails the whole table with [`SimError::Cancelled`]; partial rows are
/// never returned.
pub fn build_equity_table_until<E>(
    hero: HoleCards,
    board: &Board,
    catalog: &RangeCatalog,
    simulator: &Simulator<E>,
    trials: usize,
    stop: Option<&AtomicBool>,
) -> Result<EquityTable, SimError>
where
    E: HandEvaluator + Clone,
{
    let stopped = || stop.is_some_and(|s| s.load(Ordering::Relaxed));
    // reject a bad hero/board once instead of once per row
    EquityRequest::new(hero, board.clone(), 1).prepare()?;

    let mut visible: Vec<Card> = hero.as_array().to_vec();
    visible.extend_from_slice(board.as_slice());
    let resolver = Resolver::new(&visible);
    let simulator = simulator.with_trials(trials);
    log::debug!(
        "equity table for {hero} on [{board}]: {} classes, default suits {}",
        catalog.len(),
        resolver.default_suits()
    );

    let build_row = |class: RankClass| -> Result<TableRow, SimError> {
        if stopped() {
            return Err(SimError::Cancelled);
        }
        match resolver.resolve(class) {
            Resolution::Unassignable => Ok(TableRow { class, hand: None, edge: None }),
            resolution => {
                let hand = resolution.hand();
                let known: Vec<HoleCards> = hand.into_iter().collect();
                let request = EquityRequest::new(hero, board.clone(), 1).with_known(known);
                let estimate = simulator.run_until(&request, stop)?;
                if stopped() {
                    return Err(SimError::Cancelled);
                }
                Ok(TableRow { class, hand, edge: Some(edge_from_equity(estimate.equity())) })
            }
        }
    };
    let build_section = |row: &CatalogRow| -> Result<TableSection, SimError> {
        let rows = if simulator.config().parallel {
            row.classes.par_iter().map(|c| build_row(*c)).collect::<Result<Vec<_>, _>>()?
        } else {
            row.classes.iter().map(|c| build_row(*c)).collect::<Result<Vec<_>, _>>()?
        };
        Ok(TableSection { anchor: row.anchor, rows })
    };
    let sections = catalog.rows().iter().map(build_section).collect::<Result<Vec<_>, _>>()?;

    Ok(EquityTable { sections, suit_order: suit_frequency(&visible), default_suits: resolver.default_suits() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationConfig, TABLE_TRIALS};

    #[test]
    fn edge_truncates() {
        assert_eq!(edge_from_equity(0.0), 100);
        assert_eq!(edge_from_equity(1.0), 0);
        assert_eq!(edge_from_equity(0.425), 57);
        assert_eq!(edge_from_equity(0.4999), 50);
    }

    #[test]
    fn unassignable_rows_are_empty() {
        let sim = Simulator::new(SimulationConfig::default().with_seed(3));
        let hero: HoleCards = "AsAh".parse().unwrap();
        let board: Board = "AdAc2c".parse().unwrap();
        let table =
            build_equity_table(hero, &board, &RangeCatalog::anchored(&[Rank::Ace]), &sim, 100).unwrap();
        let aa = table.rows().next().unwrap();
        assert_eq!(aa.class, RankClass::pair(Rank::Ace));
        assert_eq!((aa.hand, aa.edge), (None, None));
        assert!(!aa.is_highlighted());
        assert!(table.rows().skip(1).all(|r| r.hand.is_none()));
    }

    #[test]
    fn rows_follow_catalog_order() {
        let sim = Simulator::new(SimulationConfig::default().with_seed(5).sequential());
        let hero: HoleCards = "7c7d".parse().unwrap();
        let catalog = RangeCatalog::default();
        let table = build_equity_table(hero, &Board::default(), &catalog, &sim, 50).unwrap();
        let classes: Vec<RankClass> = table.rows().map(|r| r.class).collect();
        assert_eq!(classes, catalog.classes().collect::<Vec<_>>());
        assert!(table.rows().all(|r| r.edge.is_some_and(|e| e <= 100)));
        assert_eq!(table.default_suits, SuitPair(Suit::Clubs, Suit::Diamonds));
    }

    #[test]
    fn raised_stop_flag_cancels_the_table() {
        let sim = Simulator::new(SimulationConfig::default().with_seed(3));
        let hero: HoleCards = "AsKd".parse().unwrap();
        let stop = AtomicBool::new(true);
        let res = build_equity_table_until(
            hero,
            &Board::default(),
            &RangeCatalog::default(),
            &sim,
            TABLE_TRIALS,
            Some(&stop),
        );
        assert_eq!(res, Err(SimError::Cancelled));

        let lowered = AtomicBool::new(false);
        let catalog = RangeCatalog::anchored(&[Rank::Two]);
        let table = build_equity_table_until(hero, &Board::default(), &catalog, &sim, 20, Some(&lowered));
        assert_eq!(table.map(|t| t.rows().count()), Ok(1));
    }

    #[test]
    fn bad_hero_board_fails_once() {
        let sim = Simulator::default();
        let hero: HoleCards = "AsAh".parse().unwrap();
        let board = Board::new(vec![hero.first()]);
        let err = build_equity_table(hero, &board, &RangeCatalog::default(), &sim, 10).unwrap_err();
        assert_eq!(err, SimError::DuplicateCard(hero.first()));
    }
}
