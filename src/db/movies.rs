use rusqlite::params;
use tracing::debug;

use super::connection::MovieStore;
use crate::error::StoreError;
use crate::models::{MovieRecord, NewMovie};

impl MovieStore {
    /// Append one row. Year and rating are converted from the form text here;
    /// text that does not parse fails the insert like any other store error.
    /// Returns the stored row with its freshly assigned id.
    pub fn insert(&self, movie: &NewMovie) -> Result<MovieRecord, StoreError> {
        let year = parse_number::<i64>("year", &movie.year)?;
        let rating = parse_number::<f64>("rating", &movie.rating)?;

        self.conn
            .execute(
                "INSERT INTO Movies (title, year, director, rating) VALUES (?1, ?2, ?3, ?4)",
                params![movie.title, year, movie.director, rating],
            )
            .map_err(StoreError::Insert)?;

        let id = self.conn.last_insert_rowid();
        debug!(id, title = %movie.title, "movie inserted");
        Ok(MovieRecord {
            id,
            title: movie.title.clone(),
            year,
            director: movie.director.clone(),
            rating,
        })
    }

    /// Every row in the table. No ORDER BY, so rows come back in engine order,
    /// which for this table is insertion order.
    pub fn fetch_all(&self) -> Result<Vec<MovieRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, year, director, rating FROM Movies")
            .map_err(StoreError::Fetch)?;

        let movies = stmt
            .query_map([], |row| {
                Ok(MovieRecord {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    year: row.get(2)?,
                    director: row.get(3)?,
                    rating: row.get(4)?,
                })
            })
            .map_err(StoreError::Fetch)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::Fetch)?;

        Ok(movies)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Movies", [], |row| row.get(0))
            .map_err(StoreError::Fetch)?;
        Ok(count as usize)
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, StoreError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| StoreError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
