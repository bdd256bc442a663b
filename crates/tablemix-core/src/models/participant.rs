//! Participant model and its cross-round meeting memory.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Gender, Personality};

/// A roster member together with everything they remember from earlier
/// rounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Stable identifier (nickname or external key)
    pub id: String,

    pub gender: Gender,

    #[serde(default)]
    pub personality: Personality,

    /// Participant ids met in each committed round
    #[serde(default)]
    pub meetings_by_round: BTreeMap<u32, BTreeSet<String>>,

    /// Union of every `meetings_by_round` entry.
    ///
    /// Derived cache; rebuild with [`Participant::rebuild_met_cache`]
    /// after touching `meetings_by_round`.
    #[serde(default)]
    pub all_met_people: BTreeSet<String>,

    /// Group number held in each committed round, oldest first
    #[serde(default)]
    pub group_history: Vec<u32>,
}

impl Participant {
    /// Creates a participant with no history.
    pub fn new(id: impl Into<String>, gender: Gender, personality: Personality) -> Self {
        Self {
            id: id.into(),
            gender,
            personality,
            meetings_by_round: BTreeMap::new(),
            all_met_people: BTreeSet::new(),
            group_history: Vec::new(),
        }
    }

    /// Whether `other` was met in any round strictly before `round`.
    pub fn has_met_before(&self, other: &str, round: u32) -> bool {
        self.meetings_by_round
            .range(..round)
            .any(|(_, met)| met.contains(other))
    }

    /// Group number from the most recent committed round.
    pub fn last_group(&self) -> Option<u32> {
        self.group_history.last().copied()
    }

    /// Recomputes `all_met_people` from `meetings_by_round`.
    pub fn rebuild_met_cache(&mut self) {
        self.all_met_people = self
            .meetings_by_round
            .values()
            .flat_map(|met| met.iter().cloned())
            .collect();
    }

    /// Records a meeting with `other` in `round`. Returns false if it was
    /// already recorded for that round.
    pub fn record_meeting(&mut self, round: u32, other: &str) -> bool {
        self.meetings_by_round
            .entry(round)
            .or_default()
            .insert(other.to_string())
    }
}
