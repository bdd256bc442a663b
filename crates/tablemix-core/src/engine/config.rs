//! Tunable weights and iteration caps for the grouping engine.

use serde::{Deserialize, Serialize};

/// Score of a pair that has never met before.
pub const DEFAULT_NEW_MEETING_WEIGHT: u32 = 10;
/// Extra score when a new pair also crosses genders.
pub const DEFAULT_CROSS_GENDER_BONUS: u32 = 15;
/// Upper bound on accepted refinement swaps.
pub const DEFAULT_MAX_REFINE_PASSES: usize = 100;
/// Upper bound on balance iterations.
pub const DEFAULT_MAX_BALANCE_ITERATIONS: usize = 50;

/// Configuration for a [`GroupingEngine`](super::GroupingEngine).
///
/// The defaults reproduce the reference scoring: a new pair is worth 10, a
/// new cross-gender pair 25, refinement stops after 100 accepted swaps and
/// balancing after 50 iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub new_meeting_weight: u32,
    pub cross_gender_bonus: u32,
    pub max_refine_passes: usize,
    pub max_balance_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            new_meeting_weight: DEFAULT_NEW_MEETING_WEIGHT,
            cross_gender_bonus: DEFAULT_CROSS_GENDER_BONUS,
            max_refine_passes: DEFAULT_MAX_REFINE_PASSES,
            max_balance_iterations: DEFAULT_MAX_BALANCE_ITERATIONS,
        }
    }
}

impl EngineConfig {
    /// Sets the refinement pass cap.
    pub fn with_max_refine_passes(mut self, passes: usize) -> Self {
        self.max_refine_passes = passes;
        self
    }

    /// Sets the balance iteration cap.
    pub fn with_max_balance_iterations(mut self, iterations: usize) -> Self {
        self.max_balance_iterations = iterations;
        self
    }
}
