//! SQLite persistence for events, rosters and computed rounds.
//!
//! The engine itself is storage-agnostic; this module keeps each event's
//! settings, its participants with their meeting and table history, and
//! every computed round (draft or committed). `all_met_people` is never
//! stored: it is rebuilt whenever a roster is loaded.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod event_queries;
pub mod migrations;
pub mod participant_queries;
pub mod round_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a throwaway in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
