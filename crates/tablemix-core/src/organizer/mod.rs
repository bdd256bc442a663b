//! High-level async API over the event store and the grouping engine.
//!
//! [`Organizer`] is the entry point for interfaces. Every operation opens a
//! fresh SQLite connection inside `tokio::task::spawn_blocking`, so an
//! organizer is cheap to clone and share. Compute and commit cycles of the
//! same event must be serialized by the caller.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │ Database/Engine │
//! │ (display types) │───▶│ (event_ops, ...)│───▶│  (db/, engine/) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and construction of an [`Organizer`]
//! - [`event_ops`]: event creation and settings
//! - [`participant_ops`]: roster management
//! - [`round_ops`]: computing, committing and exporting rounds
//! - [`handlers`]: operations returning display wrappers
//!
//! # Example
//!
//! ```rust,no_run
//! use tablemix_core::{
//!     models::GroupSizing,
//!     params::{ComputeRound, CreateEvent, EventRound},
//!     OrganizerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let organizer = OrganizerBuilder::new()
//!     .with_database_path(Some("/tmp/tablemix.db"))
//!     .build()
//!     .await?;
//!
//! let event = organizer
//!     .create_event(&CreateEvent {
//!         name: "Friday mixer".to_string(),
//!         group_sizing: GroupSizing::Uniform(4),
//!         gender_constraints: None,
//!     })
//!     .await?;
//!
//! let draft = organizer
//!     .compute_round(&ComputeRound {
//!         event_id: event.id,
//!         ..Default::default()
//!     })
//!     .await?;
//! organizer
//!     .commit_round(&EventRound {
//!         event_id: event.id,
//!         round: draft.round,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    engine::EngineConfig,
    error::{GroupingError, Result},
    models::Event,
};

pub mod builder;
pub mod event_ops;
pub mod handlers;
pub mod participant_ops;
pub mod round_ops;

#[cfg(test)]
mod tests;

pub use builder::OrganizerBuilder;

/// Main interface for managing events and computing their rounds.
#[derive(Debug, Clone)]
pub struct Organizer {
    pub(crate) db_path: PathBuf,
    pub(crate) engine_config: EngineConfig,
}

impl Organizer {
    pub(crate) fn new(db_path: PathBuf, engine_config: EngineConfig) -> Self {
        Self {
            db_path,
            engine_config,
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(GroupingError::join)?
    }
}

/// Loads an event or fails with [`GroupingError::EventNotFound`].
pub(crate) fn require_event(db: &Database, id: u64) -> Result<Event> {
    db.get_event(id)?.ok_or(GroupingError::EventNotFound { id })
}
