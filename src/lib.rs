//! Core library surface for Movie Shelf, a single-screen terminal app that
//! records movies into a local SQLite file and lists them.
//!
//! The binary only wires these pieces together; tests drive the same `App`
//! without a real terminal.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Start-up plumbing used by `main.rs`: where files live and where the
/// diagnostic log goes.
pub use config::AppConfig;
pub use logging::init_logging;

/// The persistence layer. `MovieStore` owns the one SQLite connection and
/// reports failures as `StoreError`.
pub use db::MovieStore;
pub use error::StoreError;

/// The domain types passed between the store and the UI.
pub use models::{MovieRecord, NewMovie};

/// The interactive state container, its observable outcomes, and the event
/// loop that drives it.
pub use ui::{run_app, App, FormPhase, SubmitOutcome};
