//! holdem-equity: Monte Carlo equity for Texas Hold'em
//!
//! - Estimate the hero's share of the pot against random and face-up opponents
//! - Turn an equity into the largest profitable bet
//! - Tabulate the hero's edge against canonical opponent hands per rank class
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start
//! ```
//! use holdem_equity::hand::{Board, HoleCards};
//! use holdem_equity::odds::max_bet_ratio;
//! use holdem_equity::simulation::{EquityRequest, SimulationConfig, Simulator};
//!
//! let hero: HoleCards = "AsJd".parse().unwrap();
//! let board: Board = "7d2d9c".parse().unwrap();
//! let request = EquityRequest::new(hero, board, 2);
//!
//! let simulator = Simulator::new(SimulationConfig::default().with_trials(2_000).with_seed(1));
//! let estimate = simulator.run(&request).unwrap();
//! assert!(estimate.equity() > 0.0 && estimate.equity() < 1.0);
//! assert!(max_bet_ratio(estimate.equity()).is_ok());
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin holdem-equity
//! ```

pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod odds;
pub mod range;
pub mod simulation;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
