use crate::cards::parse_cards;
use crate::evaluator::{evaluate_holdem, Category};
use crate::hand::{Board, HoleCards};
use crate::odds::{max_bet_ratio, OddsError};
use crate::range::RangeCatalog;
use crate::simulation::{
    parse_hand, EquityEstimate, EquityRequest, SimError, SimulationConfig, Simulator,
    DEFAULT_TRIALS, TABLE_TRIALS,
};
use crate::table::{build_equity_table_until, EquityTable};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Form,
    Calculating,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsTab {
    Equity,
    Ranges,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    FormNext,
    FormPrev,
    FormInc,
    FormDec,
    FormChar(char),
    FormBackspace,
    FormClear,
    Calculate,
    Cancel,
    BackToForm,
    TabNext,
    ToggleHelp,
}

/// Everything computed for one submitted form.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub request: EquityRequest,
    /// Hero's current made hand; `None` before the flop.
    pub made_hand: Option<Category>,
    pub estimate: EquityEstimate,
    pub max_bet: Result<f64, OddsError>,
    pub table: EquityTable,
    pub elapsed: Duration,
}

/// Run the headline simulation and the range table, honouring `stop`.
pub fn analyse(
    request: EquityRequest,
    config: SimulationConfig,
    catalog: &RangeCatalog,
    stop: Option<&AtomicBool>,
) -> Result<Analysis, SimError> {
    let started = Instant::now();
    let simulator = Simulator::new(config);
    let estimate = simulator.run_until(&request, stop)?;
    if stop.is_some_and(|s| s.load(Ordering::Relaxed)) {
        return Err(SimError::Cancelled);
    }
    let table =
        build_equity_table_until(request.hero, &request.board, catalog, &simulator, TABLE_TRIALS, stop)?;
    Ok(Analysis {
        made_hand: evaluate_holdem(&request.hero, &request.board).ok().map(|e| e.category),
        max_bet: max_bet_ratio(estimate.equity()),
        request,
        estimate,
        table,
        elapsed: started.elapsed(),
    })
}

/// A calculation running on a worker thread.
#[derive(Debug)]
struct Job {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Result<Analysis, SimError>>,
    started: Instant,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub tab: ResultsTab,
    // Form being edited
    pub form_index: usize,
    pub cfg_opponents: usize,
    pub cfg_trials: usize,
    pub cfg_board: String,
    pub cfg_hero: String,
    pub cfg_known: [String; 2],
    /// Fixed seed for every run; `None` reseeds each time.
    pub seed: Option<u64>,
    pub catalog: RangeCatalog,
    analysis: Option<Analysis>,
    job: Option<Job>,
    help_open: bool,
    form_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            scene: Scene::Form,
            tab: ResultsTab::Equity,
            form_index: 0,
            cfg_opponents: 1,
            cfg_trials: DEFAULT_TRIALS,
            cfg_board: String::new(),
            cfg_hero: String::new(),
            cfg_known: [String::new(), String::new()],
            seed: None,
            catalog: RangeCatalog::default(),
            analysis: None,
            job: None,
            help_open: false,
            form_error: None,
        }
    }
}

impl AppState {
    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    fn config(&self) -> SimulationConfig {
        let cfg = SimulationConfig::default().with_trials(self.cfg_trials);
        match self.seed {
            Some(seed) => cfg.with_seed(seed),
            None => cfg,
        }
    }

    /// Parse the form into a simulation request.
    pub fn request(&self) -> Result<EquityRequest, SimError> {
        let hero = parse_hand(&self.cfg_hero)?;
        let board = Board::new(parse_cards(&self.cfg_board)?);
        let known = self
            .cfg_known
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_hand(s))
            .collect::<Result<Vec<HoleCards>, _>>()?;
        Ok(EquityRequest::new(hero, board, self.cfg_opponents).with_known(known))
    }

    /// How long the running calculation has taken, if one is running.
    pub fn calculating_for(&self) -> Option<Duration> {
        self.job.as_ref().map(|job| job.started.elapsed())
    }

    /// Run the simulation and the range table for the current form, blocking.
    pub fn calculate(&mut self) -> bool {
        let result = self.request().and_then(|request| analyse(request, self.config(), &self.catalog, None));
        self.finish(result)
    }

    /// Validate the form, then calculate on a worker thread. Input errors are
    /// reported at once and keep the form open.
    pub fn start_calculation(&mut self) -> bool {
        let request = match self.request() {
            Ok(request) => request,
            Err(err) => return self.finish(Err(err)),
        };
        if let Err(err) = request.prepare() {
            return self.finish(Err(err));
        }
        let stop = Arc::new(AtomicBool::new(false));
        let (config, catalog, flag) = (self.config(), self.catalog.clone(), Arc::clone(&stop));
        let handle = thread::spawn(move || analyse(request, config, &catalog, Some(&*flag)));
        self.job = Some(Job { stop, handle, started: Instant::now() });
        self.form_error = None;
        self.scene = Scene::Calculating;
        true
    }

    /// Pick up a finished calculation without blocking. Returns `true` when one landed.
    pub fn poll_calculation(&mut self) -> bool {
        if !self.job.as_ref().is_some_and(|job| job.handle.is_finished()) {
            return false;
        }
        self.wait_calculation()
    }

    /// Block until the running calculation finishes.
    pub fn wait_calculation(&mut self) -> bool {
        let Some(job) = self.job.take() else {
            return false;
        };
        match job.handle.join() {
            Ok(result) => self.finish(result),
            Err(_) => {
                log::error!("calculation worker panicked");
                self.fail("calculation worker stopped unexpectedly".to_string());
                false
            }
        }
    }

    /// Raise the stop flag of the running calculation and return to the form. The
    /// worker is left to wind down on its own.
    pub fn cancel_calculation(&mut self) {
        if let Some(job) = self.job.take() {
            job.stop.store(true, Ordering::Relaxed);
            log::info!("calculation cancelled after {:?}", job.started.elapsed());
            self.fail(SimError::Cancelled.to_string());
        }
    }

    fn finish(&mut self, result: Result<Analysis, SimError>) -> bool {
        match result {
            Ok(analysis) => {
                log::info!(
                    "{} vs {} opponent(s) on [{}]: {} in {:?}",
                    analysis.request.hero,
                    analysis.request.opponents,
                    analysis.request.board,
                    analysis.estimate,
                    analysis.elapsed
                );
                self.analysis = Some(analysis);
                self.form_error = None;
                self.scene = Scene::Results;
                self.tab = ResultsTab::Equity;
                true
            }
            Err(err) => {
                log::warn!("calculation failed: {err}");
                self.fail(err.to_string());
                false
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.form_error = Some(message);
        self.scene = Scene::Form;
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleHelp => {
                self.help_open = !self.help_open;
                false
            }
            InputAction::FormNext => {
                if self.scene == Scene::Form {
                    self.form_next();
                }
                false
            }
            InputAction::FormPrev => {
                if self.scene == Scene::Form {
                    self.form_prev();
                }
                false
            }
            InputAction::FormInc => {
                if self.scene == Scene::Form {
                    self.form_inc();
                }
                false
            }
            InputAction::FormDec => {
                if self.scene == Scene::Form {
                    self.form_dec();
                }
                false
            }
            InputAction::FormChar(c) => {
                if self.scene == Scene::Form {
                    self.form_push(c);
                }
                false
            }
            InputAction::FormBackspace => {
                if self.scene == Scene::Form {
                    self.form_backspace();
                }
                false
            }
            InputAction::FormClear => {
                if self.scene == Scene::Form {
                    self.form_clear();
                }
                false
            }
            InputAction::Calculate => self.scene == Scene::Form && self.start_calculation(),
            InputAction::Cancel => {
                self.cancel_calculation();
                false
            }
            InputAction::BackToForm => {
                self.cancel_calculation();
                self.open_form();
                false
            }
            InputAction::TabNext => {
                if self.scene == Scene::Results {
                    self.tab = match self.tab {
                        ResultsTab::Equity => ResultsTab::Ranges,
                        ResultsTab::Ranges => ResultsTab::Equity,
                    };
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_hand_stays_on_form() {
        let mut app = AppState::default();
        app.cfg_hero = "AsKsQs".to_string();
        assert!(!app.calculate());
        assert_eq!(app.scene, Scene::Form);
        assert!(app.form_error().is_some_and(|e| e.contains("3 cards")));
        assert!(app.analysis().is_none());
    }

    #[test]
    fn blank_known_hands_are_skipped() {
        let mut app = AppState::default();
        app.cfg_hero = "AsKs".to_string();
        app.cfg_known = [String::new(), "QdQh".to_string()];
        let req = app.request().unwrap();
        assert_eq!(req.known_opponents, vec!["QdQh".parse::<HoleCards>().unwrap()]);
    }

    #[test]
    fn raised_flag_cancels_the_analysis() {
        let req = EquityRequest::new("AsKs".parse().unwrap(), Board::default(), 1);
        let stop = AtomicBool::new(true);
        let res = analyse(req, SimulationConfig::default().with_seed(1), &RangeCatalog::default(), Some(&stop));
        assert_eq!(res.map(|a| a.estimate), Err(SimError::Cancelled));
    }

    #[test]
    fn made_hand_needs_a_flop() {
        let catalog = RangeCatalog::anchored(&[crate::cards::Rank::Two]);
        let config = SimulationConfig::default().with_trials(50).with_seed(1);
        let preflop = EquityRequest::new("7s7h".parse().unwrap(), Board::default(), 1);
        assert_eq!(analyse(preflop, config, &catalog, None).unwrap().made_hand, None);
        let flop = EquityRequest::new("7s7h".parse().unwrap(), "7d2c9h".parse().unwrap(), 1);
        assert_eq!(analyse(flop, config, &catalog, None).unwrap().made_hand, Some(Category::ThreeOfAKind));
    }

    #[test]
    fn background_calculation_lands_in_results() {
        let mut app = AppState::default();
        app.cfg_hero = "QhQc".to_string();
        app.cfg_trials = 1_000;
        app.seed = Some(9);
        assert!(app.handle_input(InputAction::Calculate));
        assert_eq!(app.scene, Scene::Calculating);
        assert!(app.calculating_for().is_some());
        assert!(app.wait_calculation());
        assert_eq!(app.scene, Scene::Results);
        assert!(app.calculating_for().is_none());
        assert!(!app.poll_calculation());
    }
}
