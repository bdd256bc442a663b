//! Event and stored-round records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{GenderConstraint, GroupSizing, GroupingResult};

/// A recurring gathering with its own roster and round history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Unique identifier for the event
    pub id: u64,

    /// Display name of the event
    pub name: String,

    /// Default group sizing for new rounds
    pub group_sizing: GroupSizing,

    /// Default per-group gender constraints for new rounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_constraints: Option<Vec<GenderConstraint>>,

    /// Timestamp when the event was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the event settings were last modified (UTC)
    pub updated_at: Timestamp,
}

/// A computed round as kept by the event store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    pub event_id: u64,
    pub round: u32,
    pub result: GroupingResult,
    /// Whether the result has been folded into participant history
    pub committed: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<Timestamp>,
}

/// Per-round group membership, as exported for archiving.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundGroups {
    pub round: u32,
    pub groups: Vec<Vec<String>>,
}

/// Portable history document of an event's committed rounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryExport {
    pub event: String,
    pub total_people: usize,
    pub group_sizing: GroupSizing,
    pub rounds: Vec<RoundGroups>,
}

impl From<&RoundRecord> for RoundGroups {
    fn from(record: &RoundRecord) -> Self {
        Self {
            round: record.round,
            groups: record
                .result
                .groups
                .iter()
                .map(|group| group.members.clone())
                .collect(),
        }
    }
}
