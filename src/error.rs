//! Error type for the persistence layer.
//!
//! The UI never shows these to the user; it writes them to the diagnostic log
//! and carries on. Keeping them typed still lets tests assert which store
//! operation failed.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open SQLite database at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create Movies table")]
    Schema(#[source] rusqlite::Error),

    #[error("failed to insert movie")]
    Insert(#[source] rusqlite::Error),

    #[error("failed to load movies")]
    Fetch(#[source] rusqlite::Error),

    /// A numeric form field did not convert to a number.
    #[error("{field} '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("failed to close SQLite database")]
    Close(#[source] rusqlite::Error),
}
