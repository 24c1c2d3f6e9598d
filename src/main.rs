//! Binary entry point: resolve paths, start logging, open the database, then
//! hand control to the Ratatui event loop until the user exits.
use anyhow::Context;
use movie_shelf::{init_logging, run_app, App, AppConfig, MovieStore};
use tracing::info;

/// Returning a `Result` bubbles fatal start-up problems (an unwritable data
/// directory, an unopenable database) to the shell instead of a blank screen.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_home()?;
    config.prepare()?;
    init_logging(&config)?;
    info!(data_dir = %config.data_dir.display(), "starting movie-shelf");

    let store = MovieStore::open(&config.db_path).context("failed to open movie database")?;
    let mut app = App::new(store);
    app.mount();

    let result = run_app(&mut app);
    let closed = app.shutdown().context("failed to close movie database");
    result?;
    closed
}
