//! Domain models that mirror the `Movies` table. They stay plain data holders
//! so the store and the UI can pass them around freely.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// A movie row as read back from SQLite.
pub struct MovieRecord {
    /// Primary key assigned by SQLite on insert. The list uses it as the
    /// only identity key; two rows with identical content are still distinct.
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub director: String,
    /// Stored as REAL. Display goes through `f64`'s shortest formatting so
    /// `8.8` stays `8.8` and `9.0` prints as `9`.
    pub rating: f64,
}

impl MovieRecord {
    /// Headline shown in bold for each list entry: `Title, Year`.
    pub fn headline(&self) -> String {
        format!("{}, {}", self.title, self.year)
    }

    pub fn director_line(&self) -> String {
        format!("Director: {}", self.director)
    }

    pub fn rating_line(&self) -> String {
        format!("Rating: {}", self.rating)
    }
}

impl fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline())
    }
}

/// The raw text of a submitted form. Year and rating are still strings here;
/// the store converts them when it binds the insert parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub year: String,
    pub director: String,
    pub rating: String,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        year: impl Into<String>,
        director: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            director: director.into(),
            rating: rating.into(),
        }
    }
}
