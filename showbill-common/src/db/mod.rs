//! SQLite persistence
//!
//! Every read takes the pool explicitly; every write runs inside a single
//! transaction that is committed on success and rolled back (dropped) on the
//! first error.

pub mod artists;
pub mod init;
pub mod migrations;
pub mod seed;
pub mod shows;
pub mod venues;

pub use init::init_database;
pub use migrations::run_migrations;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::Result;

/// Decode a JSON-encoded genre list column
fn genres_from_row(row: &SqliteRow) -> Result<Vec<String>> {
    let raw: String = row.try_get("genres")?;
    Ok(serde_json::from_str(&raw)?)
}

fn genres_to_json(genres: &[String]) -> Result<String> {
    Ok(serde_json::to_string(genres)?)
}
