//! Filesystem locations used by the application.
//!
//! Everything lives in a single folder beneath the user's home directory: the
//! SQLite file and the diagnostic log. The terminal is owned by the UI, so the
//! log cannot go to stderr.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".movie-shelf";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "MoviesDB.db";
/// Diagnostic log written next to the database.
const LOG_FILE_NAME: &str = "movie-shelf.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Resolve the default locations inside the user's home directory.
    pub fn from_home() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Root every file in `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }

    /// Create the data directory so the log file and database can be opened.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "failed to create data directory {}",
                self.data_dir.display()
            )
        })
    }
}
