//! Builder for creating and configuring Organizer instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Organizer;
use crate::{
    db::Database,
    engine::EngineConfig,
    error::{GroupingError, Result},
};

/// Builder for creating and configuring Organizer instances.
#[derive(Debug, Clone, Default)]
pub struct OrganizerBuilder {
    database_path: Option<PathBuf>,
    engine_config: EngineConfig,
}

impl OrganizerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tablemix/tablemix.db` or
    /// `~/.local/share/tablemix/tablemix.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the scoring weights and iteration caps used for every round.
    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = config;
        self
    }

    /// Builds the configured organizer instance.
    ///
    /// # Errors
    ///
    /// Returns `GroupingError::FileSystem` if the database directory cannot
    /// be created, `GroupingError::XdgDirectory` if no default location is
    /// available, and `GroupingError::Database` if schema initialization
    /// fails.
    pub async fn build(self) -> Result<Organizer> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GroupingError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(GroupingError::join)??;

        debug!("Using database at {}", db_path.display());
        Ok(Organizer::new(db_path, self.engine_config))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tablemix")
            .place_data_file("tablemix.db")
            .map_err(|e| GroupingError::XdgDirectory(e.to_string()))
    }
}
