//! Persistence layer: the single SQLite connection and the queries that run
//! against the `Movies` table.

mod connection;
mod movies;

pub use connection::MovieStore;
