//! Turns a sizing request into concrete per-group targets.

use crate::models::GroupSizing;

/// Resolved target size of every group, indexed by table position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityPlan {
    targets: Vec<usize>,
}

impl CapacityPlan {
    /// Resolves `sizing` for a roster of `participants`.
    ///
    /// Uniform sizing yields `ceil(participants / size)` groups of `size`;
    /// manual sizing is taken verbatim.
    pub fn resolve(sizing: &GroupSizing, participants: usize) -> Self {
        let targets = match sizing {
            GroupSizing::Uniform(size) => {
                let size = (*size as usize).max(1);
                vec![size; participants.div_ceil(size)]
            }
            GroupSizing::Manual(sizes) => sizes.iter().map(|&s| s as usize).collect(),
        };
        Self { targets }
    }

    pub fn group_count(&self) -> usize {
        self.targets.len()
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn total(&self) -> usize {
        self.targets.iter().sum()
    }
}
