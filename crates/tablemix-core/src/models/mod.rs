//! Data models for participants, events and computed rounds.
//!
//! This module contains the domain types shared by the grouping engine, the
//! event store and the interfaces. Display implementations for these models
//! are located in [`crate::display::models`] to keep data structures and
//! presentation apart.
//!
//! # Ownership
//!
//! - [`Participant`] records are long-lived and owned by the caller (or the
//!   event store). The engine only reads them; the commit step returns new
//!   snapshots instead of mutating in place.
//! - [`GroupingResult`] is produced fresh by every computation and stored as
//!   a [`RoundRecord`] by the organizer.
//!
//! # Examples
//!
//! ```rust
//! use tablemix_core::models::{Gender, Participant, Personality};
//!
//! let mut ana = Participant::new("ana", Gender::Female, Personality::Introvert);
//! ana.record_meeting(1, "ben");
//! ana.rebuild_met_cache();
//!
//! assert!(ana.has_met_before("ben", 2));
//! assert!(!ana.has_met_before("ben", 1));
//! assert!(ana.all_met_people.contains("ben"));
//! ```

pub mod attributes;
pub mod event;
pub mod grouping;
pub mod participant;


pub use attributes::{Gender, Personality};
pub use event::{Event, HistoryExport, RoundGroups, RoundRecord};
pub use grouping::{
    GenderConstraint, GroupAssignment, GroupSizing, GroupingResult, GroupingSummary,
};
pub use participant::Participant;
