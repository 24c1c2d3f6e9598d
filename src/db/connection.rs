use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::StoreError;

/// The only table. Columns stay nullable so database files written by earlier
/// builds of the app keep opening; the form enforces non-empty values instead.
const CREATE_MOVIES_TABLE: &str = "CREATE TABLE IF NOT EXISTS Movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    year INTEGER,
    director TEXT,
    rating REAL
)";

/// Owner of the single SQLite connection. The UI holds exactly one of these
/// for the lifetime of the process and hands it back through
/// [`MovieStore::close`] on shutdown.
pub struct MovieStore {
    pub(super) conn: Connection,
}

impl MovieStore {
    /// Open (or create) the database file, creating its parent directory
    /// first. The schema is left alone; call [`MovieStore::ensure_schema`].
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "database opened");
        Ok(Self { conn })
    }

    /// Private in-memory database, mostly useful for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: ":memory:".into(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Create the `Movies` table if it does not exist yet. Safe to call any
    /// number of times; existing rows are never touched.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute(CREATE_MOVIES_TABLE, [])
            .map_err(StoreError::Schema)?;
        Ok(())
    }

    /// Release the connection, surfacing any error SQLite reports while
    /// finalizing it.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn
            .close()
            .map_err(|(_, err)| StoreError::Close(err))?;
        info!("database closed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn conn_for_tests(&self) -> &Connection {
        &self.conn
    }
}
