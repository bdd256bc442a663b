//! The grouping engine.
//!
//! A grouping cycle runs validate, plan, allocate, refine, balance and
//! aggregate over an immutable roster and returns a fresh
//! [`GroupingResult`]. Nothing here performs I/O; persisting a result and
//! folding it into participant history with [`commit_history`] is up to the
//! caller.
//!
//! ```
//! use tablemix_core::engine::{commit_history, GroupingEngine, EngineConfig};
//! use tablemix_core::models::{Gender, GroupSizing, Participant, Personality};
//!
//! let roster: Vec<Participant> = (0..6)
//!     .map(|i| Participant::new(format!("p{i}"), Gender::Female, Personality::Extrovert))
//!     .collect();
//!
//! let engine = GroupingEngine::new(EngineConfig::default()).with_seed(Some(1));
//! let result = engine
//!     .compute_groups(&roster, &GroupSizing::Uniform(3), 1, None)
//!     .unwrap();
//! assert_eq!(result.groups.len(), 2);
//!
//! let roster = commit_history(&roster, &result, 1);
//! assert_eq!(roster[0].group_history.len(), 1);
//! ```

pub mod allocate;
pub mod balance;
pub mod capacity;
pub mod commit;
pub mod config;
pub mod metrics;
pub mod refine;
pub mod validate;

use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use capacity::CapacityPlan;
pub use commit::commit_history;
pub use config::EngineConfig;
pub use refine::MeetingMatrix;
pub use validate::{validate, MIN_PARTICIPANTS};

use crate::{
    error::Result,
    models::{GenderConstraint, GroupSizing, GroupingResult, Participant},
};

/// Table number of the group at `index`.
pub(crate) fn group_number(index: usize) -> u32 {
    index as u32 + 1
}

/// Runs grouping cycles with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct GroupingEngine {
    config: EngineConfig,
    seed: Option<u64>,
}

impl GroupingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, seed: None }
    }

    /// Fixes the random seed; `None` draws a fresh one per call.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the grouping of `participants` for `round`.
    ///
    /// `constraints` only take effect when their length equals the resolved
    /// group count, seat the whole roster and fit every group's target.
    /// An infeasible constraint set is not an error: the
    /// engine falls back to unconstrained allocation from the same random
    /// state and reports `constraints_applied: false`.
    pub fn compute_groups(
        &self,
        participants: &[Participant],
        sizing: &GroupSizing,
        round: u32,
        constraints: Option<&[GenderConstraint]>,
    ) -> Result<GroupingResult> {
        validate(participants, sizing)?;
        let plan = CapacityPlan::resolve(sizing, participants.len());

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let constraints = match constraints {
            Some(list) if list.len() == plan.group_count() => Some(list),
            Some(list) => {
                warn!(
                    "Gender constraints not applied for round {round}: {} constraints for {} groups",
                    list.len(),
                    plan.group_count()
                );
                None
            }
            None => None,
        };

        let (mut groups, constrained) = match constraints {
            Some(list) => {
                let snapshot = rng.clone();
                let allocated =
                    allocate::allocate_constrained(participants, list, plan.targets(), &mut rng);
                match allocated {
                    Ok(groups) => (groups, true),
                    Err(err) => {
                        warn!("Gender constraints not applied for round {round}: {err}");
                        rng = snapshot;
                        let groups = allocate::allocate_unconstrained(
                            participants,
                            plan.group_count(),
                            &mut rng,
                        );
                        (groups, false)
                    }
                }
            }
            None => (
                allocate::allocate_unconstrained(participants, plan.group_count(), &mut rng),
                false,
            ),
        };

        let matrix = MeetingMatrix::build(participants, round);
        refine::refine(&mut groups, &matrix, &self.config, constrained);
        if !constrained {
            balance::balance(&mut groups, plan.targets(), matrix.genders(), &self.config);
        }

        let result = metrics::aggregate(participants, &groups, &matrix, round, seed, constrained);
        info!(
            "Round {round}: {} participants in {} groups, {} new meetings (seed {seed})",
            participants.len(),
            result.summary.total_groups,
            result.summary.new_meetings_count
        );
        Ok(result)
    }
}

/// Computes a grouping with the default configuration.
pub fn compute_groups(
    participants: &[Participant],
    sizing: &GroupSizing,
    round: u32,
    constraints: Option<&[GenderConstraint]>,
    seed: Option<u64>,
) -> Result<GroupingResult> {
    GroupingEngine::default()
        .with_seed(seed)
        .compute_groups(participants, sizing, round, constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Personality};

    fn roster(males: usize, females: usize) -> Vec<Participant> {
        let males = (0..males).map(|i| Participant::new(format!("m{i}"), Gender::Male, Personality::Extrovert));
        let females = (0..females)
            .map(|i| Participant::new(format!("f{i}"), Gender::Female, Personality::Introvert));
        males.chain(females).collect()
    }

    #[test]
    fn test_group_number_is_one_based() {
        assert_eq!(group_number(0), 1);
        assert_eq!(group_number(4), 5);
    }

    #[test]
    fn test_same_seed_same_result() {
        let people = roster(5, 6);
        let a = compute_groups(&people, &GroupSizing::Uniform(4), 1, None, Some(99)).unwrap();
        let b = compute_groups(&people, &GroupSizing::Uniform(4), 1, None, Some(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, 99);
    }

    #[test]
    fn test_unseeded_runs_report_their_seed() {
        let people = roster(3, 3);
        let first = compute_groups(&people, &GroupSizing::Uniform(3), 1, None, None).unwrap();
        let replay =
            compute_groups(&people, &GroupSizing::Uniform(3), 1, None, Some(first.seed)).unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn test_mismatched_constraints_are_ignored() {
        let people = roster(4, 4);
        let constraints = [GenderConstraint {
            male_count: 4,
            female_count: 4,
        }];
        let with = compute_groups(
            &people,
            &GroupSizing::Uniform(4),
            1,
            Some(&constraints),
            Some(3),
        )
        .unwrap();
        let without = compute_groups(&people, &GroupSizing::Uniform(4), 1, None, Some(3)).unwrap();

        assert!(!with.constraints_applied);
        assert_eq!(with, without);
    }

    #[test]
    fn test_validation_errors_propagate() {
        let people = roster(1, 0);
        assert!(compute_groups(&people, &GroupSizing::Uniform(4), 1, None, Some(1)).is_err());
    }
}
