//! Display formatting wrappers.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the newtype wrappers here add context that a single model cannot know,
//! such as how a list reads when it is empty or whether a stored round has
//! been committed.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (Event, Result) │───▶│ Reports         │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: `ParticipantList`, `EventList`, `RoundList`
//! - [`reports`]: `GroupingReport`, `CapacityReport`, `ScenarioReport`,
//!   `CoverageReport`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp formatting in the system timezone
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use tablemix_core::display::OperationStatus;
//!
//! let done = OperationStatus::success("Removed participant 'ana'");
//! assert_eq!(done.to_string(), "Success: Removed participant 'ana'\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod reports;
pub mod status;

pub use collections::{EventList, ParticipantList, RoundList};
pub use datetime::{LocalDate, LocalDateTime};
pub use reports::{CapacityReport, CoverageReport, GroupingReport, ScenarioReport};
pub use status::OperationStatus;
