//! Parameter structures for organizer operations.
//!
//! These structures are shared by every interface layer. They carry only
//! serde derives; interface crates wrap them with their own framework
//! derives (clap `Args` in the CLI) and convert with `From`/`Into`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│  Core Params    │
//! │  (clap derives) │    │ (serde derives) │
//! └─────────────────┘    └─────────────────┘
//! ```
//!
//! Settings left as `None` fall back to the values stored with the event.

use serde::{Deserialize, Serialize};

use crate::models::{GenderConstraint, GroupSizing, Participant};

/// Generic parameters for operations requiring just an ID.
///
/// Used for get_event, list_participants, list_rounds,
/// export_history and coverage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the event to operate on
    pub id: u64,
}

/// Parameters for creating a new event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Display name of the event (required)
    pub name: String,
    /// Default sizing for rounds of this event
    #[serde(default)]
    pub group_sizing: GroupSizing,
    /// Optional default per-group gender constraints
    #[serde(default)]
    pub gender_constraints: Option<Vec<GenderConstraint>>,
}

/// Parameters for changing an event's stored settings.
///
/// Only fields that are `Some` are changed. `clear_constraints` removes any
/// stored constraints and wins over `gender_constraints`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigureEvent {
    pub id: u64,
    pub name: Option<String>,
    pub group_sizing: Option<GroupSizing>,
    pub gender_constraints: Option<Vec<GenderConstraint>>,
    #[serde(default)]
    pub clear_constraints: bool,
}

/// Parameters for permanently deleting an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteEvent {
    pub id: u64,
    /// Must be true; deletion also drops the roster and every round
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding one participant to an event roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddParticipant {
    pub event_id: u64,
    /// The participant; any history it carries is stored as well
    pub participant: Participant,
}

/// Parameters for adding several participants at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportParticipants {
    pub event_id: u64,
    pub participants: Vec<Participant>,
}

/// Parameters for removing a participant from an event roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveParticipant {
    pub event_id: u64,
    pub participant_id: String,
}

/// Parameters for computing a round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputeRound {
    pub event_id: u64,
    /// Round number; defaults to one past the last committed round
    pub round: Option<u32>,
    /// Overrides the event's stored sizing
    pub group_sizing: Option<GroupSizing>,
    /// Overrides the event's stored constraints
    pub gender_constraints: Option<Vec<GenderConstraint>>,
    /// Fixed random seed for a reproducible result
    pub seed: Option<u64>,
}

/// Parameters addressing one round of an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRound {
    pub event_id: u64,
    pub round: u32,
}
