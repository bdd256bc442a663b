//! Error types for the grouping library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Gender;

/// Comprehensive error type for all grouping and storage operations.
#[derive(Error, Debug)]
pub enum GroupingError {
    /// Fewer than two participants were supplied
    #[error("At least 2 participants are required, got {count}")]
    InsufficientParticipants { count: usize },
    /// The requested groups cannot seat every participant
    #[error("Total group capacity {capacity} is less than the {participants} participants")]
    CapacityExceeded { capacity: usize, participants: usize },
    /// A gender pool does not match the summed per-group constraints.
    ///
    /// The engine recovers from this internally by falling back to the
    /// unconstrained allocator; it is never returned from `compute_groups`.
    #[error("Gender constraints seat {required} {gender} participants, {available} available")]
    GenderConstraintInfeasible {
        gender: Gender,
        required: usize,
        available: usize,
    },
    /// A constraint seats more people than its group's target size.
    ///
    /// Recovered internally like [`GroupingError::GenderConstraintInfeasible`].
    #[error("Gender constraint for table {group} seats {required}, target is {target}")]
    GenderConstraintOverTarget {
        group: u32,
        required: usize,
        target: usize,
    },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Event not found for the given ID
    #[error("Event with ID {id} not found")]
    EventNotFound { id: u64 },
    /// Participant not found for the given ID
    #[error("Participant '{id}' not found")]
    ParticipantNotFound { id: String },
    /// No stored result for the given round
    #[error("Round {round} of event {event_id} not found")]
    RoundNotFound { event_id: u64, round: u32 },
    /// The round was already folded into participant history
    #[error("Round {round} of event {event_id} is already committed")]
    RoundAlreadyCommitted { event_id: u64, round: u32 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> GroupingError {
        GroupingError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> GroupingError {
        GroupingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl GroupingError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| GroupingError::database(message).with_source(e))
    }
}

/// Result type alias for grouping operations
pub type Result<T> = std::result::Result<T, GroupingError>;
