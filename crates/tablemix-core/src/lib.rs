//! Core library for the tablemix event grouping tool.
//!
//! tablemix seats the roster of a recurring social event at tables, round
//! after round, so that people keep meeting someone new. This crate holds
//! the grouping engine and everything around it:
//!
//! - [`engine`]: the pure, synchronous grouping cycle (validate, plan,
//!   allocate, refine, balance, aggregate) and the history commit step
//! - [`models`]: participants, groupings, events and stored rounds
//! - [`analysis`]: theoretical round limits and pair coverage
//! - [`db`]: SQLite persistence of events, rosters and rounds
//! - [`organizer`]: the async facade interfaces talk to
//! - [`display`]: markdown formatting of all of the above
//!
//! # Quick Start
//!
//! The engine can be used on its own, without any storage:
//!
//! ```rust
//! use tablemix_core::{
//!     engine::{commit_history, compute_groups},
//!     models::{Gender, GroupSizing, Participant, Personality},
//! };
//!
//! let roster: Vec<Participant> = (0..8)
//!     .map(|i| {
//!         let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
//!         Participant::new(format!("guest{i}"), gender, Personality::Extrovert)
//!     })
//!     .collect();
//!
//! let round1 = compute_groups(&roster, &GroupSizing::Uniform(4), 1, None, Some(7)).unwrap();
//! assert_eq!(round1.groups.len(), 2);
//! assert_eq!(round1.summary.new_meetings_count, 12);
//!
//! let roster = commit_history(&roster, &round1, 1);
//! let round2 = compute_groups(&roster, &GroupSizing::Uniform(4), 2, None, Some(7)).unwrap();
//! assert!(round2.summary.new_meetings_count > 0);
//! ```
//!
//! With persistence, go through an [`Organizer`]:
//!
//! ```rust,no_run
//! use tablemix_core::{params::CreateEvent, OrganizerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let organizer = OrganizerBuilder::new().build().await?;
//! let event = organizer
//!     .create_event(&CreateEvent {
//!         name: "Book club".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{event}");
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod organizer;
pub mod params;

// Re-export commonly used types
pub use analysis::{compare_scenarios, CoverageStats, FeasibilityRating, RoundCapacity};
pub use db::Database;
pub use display::{
    CapacityReport, CoverageReport, EventList, GroupingReport, OperationStatus, ParticipantList,
    RoundList, ScenarioReport,
};
pub use engine::{commit_history, compute_groups, EngineConfig, GroupingEngine};
pub use error::{GroupingError, Result};
pub use models::{
    Event, Gender, GenderConstraint, GroupAssignment, GroupSizing, GroupingResult,
    GroupingSummary, HistoryExport, Participant, Personality, RoundRecord,
};
pub use organizer::{Organizer, OrganizerBuilder};
pub use params::{
    AddParticipant, ComputeRound, ConfigureEvent, CreateEvent, DeleteEvent, EventRound, Id,
    ImportParticipants, RemoveParticipant,
};
