//! Monte Carlo equity estimation.
//!
//! Every trial completes the board and deals the unknown opponents from the cards
//! nobody can see, then compares the hero against the best opponent. Results are
//! statistical: two unseeded runs over the same spot converge on the same equity
//! but will rarely agree exactly. Fix [`SimulationConfig::seed`] for reproducible
//! output.

use crate::cards::{parse_cards, Card, CardParseError, Rank, Suit};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{HandEvaluator, StandardEvaluator, Strength};
use crate::hand::{Board, HandError, HoleCards};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Trials for a headline equity estimate.
pub const DEFAULT_TRIALS: usize = 10_000;
/// Trials per row of an equity table.
pub const TABLE_TRIALS: usize = 1_000;
pub const MAX_OPPONENTS: usize = 9;

/// Trials handed to one worker at a time; each batch owns its deck and RNG stream.
const BATCH_SIZE: usize = 250;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimError {
    #[error("expected a two-card hand, got {0} cards")]
    InvalidHandSize(usize),
    #[error("board has {0} cards, at most 5 allowed")]
    BoardOverflow(usize),
    #[error("{known} known opponent hands for {requested} opponents")]
    OpponentCountMismatch { known: usize, requested: usize },
    #[error("opponent count must be 1..={max}, got {0}", max = MAX_OPPONENTS)]
    InvalidOpponentCount(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("simulation needs at least one trial")]
    NoTrials,
    #[error("each trial needs {requested} cards but only {remaining} are unseen")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("calculation cancelled")]
    Cancelled,
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Hero's result in a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

impl Outcome {
    /// Lower strength wins.
    pub fn versus(hero: Strength, best_opponent: Strength) -> Self {
        match hero.cmp(&best_opponent) {
            std::cmp::Ordering::Less => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Tie,
            std::cmp::Ordering::Greater => Outcome::Loss,
        }
    }
}

/// Win/tie counts over a number of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquityEstimate {
    pub wins: u64,
    pub ties: u64,
    pub trials: u64,
}

impl EquityEstimate {
    pub fn record(&mut self, outcome: Outcome) {
        self.trials += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => {}
        }
    }

    /// Sum of two partial estimates; order does not matter.
    pub fn merge(self, other: Self) -> Self {
        Self {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            trials: self.trials + other.trials,
        }
    }

    pub fn losses(&self) -> u64 {
        self.trials - self.wins - self.ties
    }

    /// `(wins + ties / 2) / trials`, in `[0, 1]`. Zero when no trial ran.
    pub fn equity(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / self.trials as f64
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses())
    }

    fn rate(&self, n: u64) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            n as f64 / self.trials as f64
        }
    }
}

impl fmt::Display for EquityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% (W {} / T {} / L {} of {})",
            self.equity() * 100.0,
            self.wins,
            self.ties,
            self.losses(),
            self.trials
        )
    }
}

/// Knobs for a simulation run.
///
/// ```
/// use holdem_equity::simulation::SimulationConfig;
///
/// let cfg = SimulationConfig::default().with_trials(2_000).with_seed(7);
/// assert_eq!(cfg.trials, 2_000);
/// assert_eq!(SimulationConfig::table().trials, 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub trials: usize,
    /// Fixed seed for reproducible runs; `None` draws a fresh one per call.
    pub seed: Option<u64>,
    /// Spread batches over the rayon pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { trials: DEFAULT_TRIALS, seed: None, parallel: true }
    }
}

impl SimulationConfig {
    /// Lightweight preset used per equity-table row.
    pub fn table() -> Self {
        Self { trials: TABLE_TRIALS, ..Self::default() }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// What is known about the hand being simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquityRequest {
    pub hero: HoleCards,
    pub board: Board,
    pub opponents: usize,
    /// Opponent hands that are face up; the rest are dealt at random.
    pub known_opponents: Vec<HoleCards>,
}

impl EquityRequest {
    pub fn new(hero: HoleCards, board: Board, opponents: usize) -> Self {
        Self { hero, board, opponents, known_opponents: Vec::new() }
    }

    pub fn with_known(mut self, hands: Vec<HoleCards>) -> Self {
        self.known_opponents = hands;
        self
    }

    /// Opponents whose cards are dealt at random each trial.
    pub fn random_opponents(&self) -> usize {
        self.opponents.saturating_sub(self.known_opponents.len())
    }

    /// Cards each trial takes from the deck.
    pub fn cards_per_trial(&self) -> usize {
        self.board.missing() + 2 * self.random_opponents()
    }

    /// Every card already visible: hero, board, and known opponents.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut cards = self.hero.as_array().to_vec();
        cards.extend_from_slice(self.board.as_slice());
        cards.extend(self.known_opponents.iter().flat_map(|h| h.as_array()));
        cards
    }

    /// Validate opponents, board and card uniqueness; return the deck of unseen cards.
    pub fn prepare(&self) -> Result<Deck, SimError> {
        if !(1..=MAX_OPPONENTS).contains(&self.opponents) {
            return Err(SimError::InvalidOpponentCount(self.opponents));
        }
        if self.board.len() > Board::MAX {
            return Err(SimError::BoardOverflow(self.board.len()));
        }
        if self.known_opponents.len() > self.opponents {
            return Err(SimError::OpponentCountMismatch {
                known: self.known_opponents.len(),
                requested: self.opponents,
            });
        }
        let known = self.known_cards();
        let mut seen = [false; 52];
        for c in &known {
            if std::mem::replace(&mut seen[c.index()], true) {
                return Err(SimError::DuplicateCard(*c));
            }
        }
        Deck::without(&known).map_err(|e| {
            debug_assert!(false, "deck bookkeeping out of sync: {e}");
            SimError::Deck(e)
        })
    }

    /// Fail when a trial would need more cards than `deck` holds.
    pub fn check_demand(&self, deck: &Deck) -> Result<(), SimError> {
        let requested = self.cards_per_trial();
        if requested > deck.len() {
            return Err(SimError::InsufficientCards { requested, remaining: deck.len() });
        }
        Ok(())
    }
}

/// Runs trials for an [`EquityRequest`] with a pluggable evaluator.
#[derive(Debug, Clone)]
pub struct Simulator<E = StandardEvaluator> {
    evaluator: E,
    config: SimulationConfig,
}

impl Simulator<StandardEvaluator> {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_evaluator(StandardEvaluator, config)
    }
}

impl Default for Simulator<StandardEvaluator> {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl<E: HandEvaluator> Simulator<E> {
    pub fn with_evaluator(evaluator: E, config: SimulationConfig) -> Self {
        Self { evaluator, config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Same evaluator, different trial budget.
    pub fn with_trials(&self, trials: usize) -> Self
    where
        E: Clone,
    {
        Self { evaluator: self.evaluator.clone(), config: self.config.with_trials(trials) }
    }

    pub fn run(&self, request: &EquityRequest) -> Result<EquityEstimate, SimError> {
        self.run_until(request, None)
    }

    /// Like [`Simulator::run`], polling `stop` between trials. A stopped run returns
    /// the estimate over the trials completed so far.
    pub fn run_until(
        &self,
        request: &EquityRequest,
        stop: Option<&AtomicBool>,
    ) -> Result<EquityEstimate, SimError> {
        let deck = request.prepare()?;
        let trials = self.config.trials;
        if trials == 0 {
            return Err(SimError::NoTrials);
        }
        request.check_demand(&deck)?;
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!(
            "simulating {} vs {} opponent(s) ({} known) on [{}]: {} trials, seed {}",
            request.hero,
            request.opponents,
            request.known_opponents.len(),
            request.board,
            trials,
            seed
        );

        let batches = trials.div_ceil(BATCH_SIZE);
        let run_batch = |b: usize| -> Result<EquityEstimate, SimError> {
            let n = BATCH_SIZE.min(trials - b * BATCH_SIZE);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(b as u64);
            self.run_batch(request, deck.clone(), n, &mut rng, stop)
        };
        let estimate = if self.config.parallel {
            (0..batches)
                .into_par_iter()
                .map(run_batch)
                .try_reduce(EquityEstimate::default, |a, b| Ok(a.merge(b)))?
        } else {
            (0..batches)
                .map(run_batch)
                .try_fold(EquityEstimate::default(), |acc, r| r.map(|e| acc.merge(e)))?
        };

        if (estimate.trials as usize) < trials {
            log::warn!("simulation stopped after {} of {} trials", estimate.trials, trials);
        }
        log::debug!("simulation finished: {estimate}");
        Ok(estimate)
    }

    fn run_batch<R: Rng>(
        &self,
        request: &EquityRequest,
        mut deck: Deck,
        n: usize,
        rng: &mut R,
        stop: Option<&AtomicBool>,
    ) -> Result<EquityEstimate, SimError> {
        let mut estimate = EquityEstimate::default();
        for _ in 0..n {
            if stop.is_some_and(|s| s.load(Ordering::Relaxed)) {
                break;
            }
            estimate.record(self.trial(request, &mut deck, rng)?);
        }
        Ok(estimate)
    }

    fn trial<R: Rng>(
        &self,
        request: &EquityRequest,
        deck: &mut Deck,
        rng: &mut R,
    ) -> Result<Outcome, SimError> {
        let known = request.board.as_slice();
        let dealt = deck.sample(request.cards_per_trial(), rng)?;
        let (runout, holes) = dealt.split_at(Board::MAX - known.len());

        let mut board = [Card::new(Rank::Two, Suit::Clubs); 5];
        for (slot, c) in board.iter_mut().zip(known.iter().chain(runout)) {
            *slot = *c;
        }

        let hero = self.evaluator.evaluate(&board, &request.hero);
        let mut best = Strength(u32::MAX);
        for hand in &request.known_opponents {
            best = best.min(self.evaluator.evaluate(&board, hand));
        }
        for pair in holes.chunks_exact(2) {
            let hand = HoleCards::try_new(pair[0], pair[1])?;
            best = best.min(self.evaluator.evaluate(&board, &hand));
        }
        Ok(Outcome::versus(hero, best))
    }
}

/// Hero equity from card strings such as `"AsJd"` and `"7d2d9c"`.
///
/// Blank entries in `opponent_cards` are ignored; every other entry must hold
/// exactly two cards.
///
/// ```
/// use holdem_equity::simulation::calculate_win_probability;
///
/// let p = calculate_win_probability("AsAh", 1, "", 2_000, &["2s2d"]).unwrap();
/// assert!(p > 0.7);
/// ```
pub fn calculate_win_probability(
    hole_cards: &str,
    num_opponents: usize,
    community_cards: &str,
    num_simulations: usize,
    opponent_cards: &[&str],
) -> Result<f64, SimError> {
    let hero = parse_hand(hole_cards)?;
    let board = Board::new(parse_cards(community_cards)?);
    let known = opponent_cards
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_hand(s))
        .collect::<Result<Vec<_>, _>>()?;
    let request = EquityRequest::new(hero, board, num_opponents).with_known(known);
    let simulator = Simulator::new(SimulationConfig::default().with_trials(num_simulations));
    Ok(simulator.run(&request)?.equity())
}

/// Parse exactly two cards into a hand.
pub fn parse_hand(s: &str) -> Result<HoleCards, SimError> {
    let cards = parse_cards(s)?;
    if cards.len() != 2 {
        return Err(SimError::InvalidHandSize(cards.len()));
    }
    if cards[0] == cards[1] {
        return Err(SimError::DuplicateCard(cards[0]));
    }
    Ok(HoleCards::try_new(cards[0], cards[1])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    fn seeded(trials: usize) -> Simulator {
        Simulator::new(SimulationConfig::default().with_trials(trials).with_seed(11))
    }

    #[test]
    fn estimate_merge_is_order_free() {
        let a = EquityEstimate { wins: 3, ties: 1, trials: 5 };
        let b = EquityEstimate { wins: 0, ties: 2, trials: 4 };
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(a.merge(b).losses(), 3);
        assert!((a.equity() - 0.7).abs() < 1e-12);
        assert_eq!(EquityEstimate::default().equity(), 0.0);
    }

    #[test]
    fn outcome_uses_lower_is_better() {
        assert_eq!(Outcome::versus(Strength(1), Strength(2)), Outcome::Win);
        assert_eq!(Outcome::versus(Strength(2), Strength(2)), Outcome::Tie);
        assert_eq!(Outcome::versus(Strength(3), Strength(2)), Outcome::Loss);
    }

    #[test]
    fn rejects_bad_requests() {
        let board: Board = "2c3c4c".parse().unwrap();
        let sim = seeded(10);
        let zero = EquityRequest::new(hand("AsAh"), board.clone(), 0);
        assert_eq!(sim.run(&zero), Err(SimError::InvalidOpponentCount(0)));
        let ten = EquityRequest::new(hand("AsAh"), board.clone(), 10);
        assert_eq!(sim.run(&ten), Err(SimError::InvalidOpponentCount(10)));

        let overflow = EquityRequest::new(hand("AsAh"), Board::new(parse_cards("2c3c4c5c6c7c").unwrap()), 1);
        assert_eq!(sim.run(&overflow), Err(SimError::BoardOverflow(6)));

        let mismatch = EquityRequest::new(hand("AsAh"), board.clone(), 1)
            .with_known(vec![hand("KsKd"), hand("QsQd")]);
        assert_eq!(sim.run(&mismatch), Err(SimError::OpponentCountMismatch { known: 2, requested: 1 }));

        let dup = EquityRequest::new(hand("AsAh"), board, 1).with_known(vec![hand("As2d")]);
        assert_eq!(sim.run(&dup), Err(SimError::DuplicateCard(Card::parse_token("As").unwrap())));
    }

    #[test]
    fn demand_beyond_pool_is_insufficient() {
        let req = EquityRequest::new(hand("AsAh"), Board::default(), 9);
        let gone: Vec<Card> = Deck::standard().cards()[..40].to_vec();
        let small = Deck::without(&gone).unwrap();
        assert_eq!(
            req.check_demand(&small),
            Err(SimError::InsufficientCards { requested: 23, remaining: 12 })
        );
    }

    #[test]
    fn zero_trials_rejected() {
        let req = EquityRequest::new(hand("AsAh"), Board::default(), 1);
        assert_eq!(seeded(0).run(&req), Err(SimError::NoTrials));
    }

    #[test]
    fn single_trial_is_win_tie_or_loss() {
        let req = EquityRequest::new(hand("7c2d"), Board::default(), 3);
        for seed in 0..20 {
            let sim = Simulator::new(SimulationConfig::default().with_trials(1).with_seed(seed));
            let e = sim.run(&req).unwrap().equity();
            assert!(e == 0.0 || e == 0.5 || e == 1.0, "got {e}");
        }
    }

    #[test]
    fn seeded_runs_repeat_and_ignore_threading() {
        let req = EquityRequest::new(hand("AhKh"), "Qh7h2c".parse().unwrap(), 2);
        let par = seeded(3_000).run(&req).unwrap();
        let seq = Simulator::new(SimulationConfig::default().with_trials(3_000).with_seed(11).sequential())
            .run(&req)
            .unwrap();
        assert_eq!(par, seq);
        assert_eq!(par.trials, 3_000);
    }

    #[test]
    fn full_board_with_known_opponent_is_exact() {
        // hero makes the nut flush, opponent fills up
        let req = EquityRequest::new(hand("AhKh"), "Qh7h2h2c9d".parse().unwrap(), 1)
            .with_known(vec![hand("QsQd")]);
        let est = seeded(50).run(&req).unwrap();
        assert_eq!(est.wins, 0);
        assert_eq!(est.losses(), 50);
    }

    #[test]
    fn stop_flag_halts_early() {
        let stop = AtomicBool::new(true);
        let req = EquityRequest::new(hand("AsAh"), Board::default(), 1);
        let est = seeded(1_000).run_until(&req, Some(&stop)).unwrap();
        assert_eq!(est.trials, 0);
    }

    #[test]
    fn string_entry_validates_hand_size() {
        assert_eq!(
            calculate_win_probability("AsKsQs", 1, "", 10, &[]),
            Err(SimError::InvalidHandSize(3))
        );
        assert_eq!(
            calculate_win_probability("AsKs", 1, "", 10, &["Qd"]),
            Err(SimError::InvalidHandSize(1))
        );
        assert!(matches!(
            calculate_win_probability("AsKx", 1, "", 10, &[]),
            Err(SimError::Card(CardParseError::InvalidToken(_)))
        ));
        let p = calculate_win_probability("AsKs", 2, "7d2d9c", 200, &["", "QdQh"]).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
}
