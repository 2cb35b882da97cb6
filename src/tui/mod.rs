//! Terminal front-end: a form for the hand, and a results view with the equity
//! estimate and the range table.

pub mod app;
pub mod controller;
mod ui;
