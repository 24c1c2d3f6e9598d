use std::fs;

use crossterm::event::KeyCode;
use movie_shelf::{init_logging, App, AppConfig, MovieStore, SubmitOutcome};
use tempfile::TempDir;

// Installs the global subscriber, so it lives in its own test binary.
#[test]
fn store_failures_land_in_the_log_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config = AppConfig::in_dir(temp_dir.path());
    config.prepare()?;
    init_logging(&config)?;

    // Skipping mount leaves the table missing, so the insert fails.
    let mut app = App::new(MovieStore::open(&config.db_path)?);
    for value in ["Inception", "2010", "Christopher Nolan", "8.8"] {
        for ch in value.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
        app.handle_key(KeyCode::Tab);
    }
    assert_eq!(app.submit(), SubmitOutcome::Failed);

    let log = fs::read_to_string(&config.log_path)?;
    assert!(log.contains("database opened"));
    assert!(log.contains("failed to insert movie"));
    assert!(log.contains("ERROR"));
    Ok(())
}
