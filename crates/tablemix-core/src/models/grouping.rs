//! Grouping request and result types.

use serde::{Deserialize, Serialize};

/// How many groups to form and how large each should be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupSizing {
    /// "Auto" mode: every group targets the same size and the group count
    /// follows from the roster size
    Uniform(u32),
    /// "Manual" mode: one target size per group, used verbatim
    Manual(Vec<u32>),
}

impl GroupSizing {
    /// Sum of all group targets for a roster of `participants`.
    pub fn total_capacity(&self, participants: usize) -> usize {
        match self {
            GroupSizing::Uniform(size) => {
                let size = *size as usize;
                if size == 0 {
                    0
                } else {
                    participants.div_ceil(size) * size
                }
            }
            GroupSizing::Manual(sizes) => sizes.iter().map(|&s| s as usize).sum(),
        }
    }
}

impl Default for GroupSizing {
    fn default() -> Self {
        GroupSizing::Uniform(4)
    }
}

/// Exact male/female headcount required at one specific group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderConstraint {
    pub male_count: u32,
    pub female_count: u32,
}

/// One table in a computed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAssignment {
    /// 1-based table number
    pub id: u32,
    /// Participant ids seated at this table
    pub members: Vec<String>,
    pub male_count: u32,
    pub female_count: u32,
    pub extrovert_count: u32,
    pub introvert_count: u32,
    /// Member pairs with no meeting recorded before this round
    pub new_meetings_count: u32,
}

impl GroupAssignment {
    /// Number of members at the table.
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Aggregate quality scores for a computed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSummary {
    pub total_groups: u32,
    pub avg_group_size: f64,
    /// 0-100, higher means male/female splits are closer to even
    pub gender_balance_score: u32,
    /// 0-100, higher means extrovert/introvert splits are closer to even
    pub mbti_balance_score: u32,
    pub new_meetings_count: u32,
}

/// Output of one grouping computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingResult {
    pub round: u32,
    /// Non-empty groups in table-number order
    pub groups: Vec<GroupAssignment>,
    pub summary: GroupingSummary,
    /// Seed of the random source used for the computation
    pub seed: u64,
    /// Whether per-group gender constraints shaped the allocation
    #[serde(default)]
    pub constraints_applied: bool,
}

impl GroupingResult {
    /// Finds the table a participant was seated at.
    pub fn group_of(&self, participant_id: &str) -> Option<&GroupAssignment> {
        self.groups
            .iter()
            .find(|group| group.members.iter().any(|m| m == participant_id))
    }

    /// Total number of seated participants.
    pub fn participant_count(&self) -> usize {
        self.groups.iter().map(GroupAssignment::size).sum()
    }
}
