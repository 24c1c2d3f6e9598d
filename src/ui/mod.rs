//! Ratatui front-end: the form, the movie list and the warning dialog.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::{App, FormPhase, SubmitOutcome};
pub use terminal::run_app;
