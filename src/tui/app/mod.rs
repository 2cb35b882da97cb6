mod form;
mod state;

pub use state::{analyse, Analysis, AppState, InputAction, ResultsTab, Scene};
