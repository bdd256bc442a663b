//! Theoretical round limits and pair-coverage statistics.
//!
//! [`RoundCapacity`] answers "how many rounds can N people in groups of n
//! play before everyone has necessarily met again", [`compare_scenarios`]
//! lines several such answers up, and [`CoverageStats`] measures how far an
//! event has actually progressed towards that.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::{GroupingError, Result},
    models::{GroupSizing, Participant},
};

/// How comfortably a roster supports repeated rounds of first meetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeasibilityRating {
    /// Three or more full rounds of new pairs
    Ample,
    /// One or two full rounds
    Limited,
    /// Not even one full round
    Infeasible,
}

impl FeasibilityRating {
    pub fn from_rounds(practical_rounds: u64) -> Self {
        match practical_rounds {
            3.. => FeasibilityRating::Ample,
            1..=2 => FeasibilityRating::Limited,
            0 => FeasibilityRating::Infeasible,
        }
    }
}

/// Round-limit analysis for `participants` people seated `group_size` per
/// table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundCapacity {
    pub participants: usize,
    pub group_size: usize,
    pub group_count: usize,
    /// Even split of the roster over `group_count` tables, largest first
    pub group_sizes: Vec<usize>,
    /// C(participants, 2)
    pub total_pairs: u64,
    /// Pairs formed at the largest table
    pub pairs_per_group: u64,
    /// Pairs formed by one full round
    pub pairs_per_round: u64,
    pub theoretical_rounds: f64,
    pub practical_rounds: u64,
    /// The (N - 1) / (n - 1) approximation
    pub approximate_rounds: f64,
    pub rating: FeasibilityRating,
}

fn pairs(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

impl RoundCapacity {
    /// Analyzes a roster of `participants` split into tables of
    /// `group_size`.
    ///
    /// A roster that does not divide evenly is spread over
    /// `ceil(participants / group_size)` tables whose sizes differ by at
    /// most one.
    pub fn analyze(participants: usize, group_size: usize) -> Result<Self> {
        if participants < 2 {
            return Err(GroupingError::invalid_input("participants")
                .with_reason("at least 2 participants are required"));
        }
        if group_size < 2 {
            return Err(GroupingError::invalid_input("group_size")
                .with_reason("groups must seat at least 2 people"));
        }

        let group_count = participants.div_ceil(group_size);
        let base = participants / group_count;
        let extra = participants % group_count;
        let group_sizes: Vec<usize> = (0..group_count)
            .map(|g| if g < extra { base + 1 } else { base })
            .collect();

        let total_pairs = pairs(participants);
        let pairs_per_group = pairs(group_sizes[0]);
        let pairs_per_round: u64 = group_sizes.iter().map(|&s| pairs(s)).sum();
        let theoretical_rounds = total_pairs as f64 / pairs_per_round as f64;
        let practical_rounds = theoretical_rounds.floor() as u64;
        let approximate_rounds = (participants - 1) as f64 / (group_size - 1) as f64;

        Ok(Self {
            participants,
            group_size,
            group_count,
            group_sizes,
            total_pairs,
            pairs_per_group,
            pairs_per_round,
            theoretical_rounds,
            practical_rounds,
            approximate_rounds,
            rating: FeasibilityRating::from_rounds(practical_rounds),
        })
    }

    /// Whether the roster splits into equally sized tables.
    pub fn is_even_split(&self) -> bool {
        self.participants % self.group_size == 0
    }
}

/// One row of a scenario comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub participants: usize,
    pub group_size: usize,
    /// `None` when the roster or table size is too small to analyze
    pub capacity: Option<RoundCapacity>,
}

/// Analyzes every `(participants, group_size)` pair in order.
///
/// Degenerate pairs become rows without a capacity instead of failing the
/// whole comparison.
pub fn compare_scenarios(scenarios: &[(usize, usize)]) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|&(participants, group_size)| ScenarioOutcome {
            participants,
            group_size,
            capacity: RoundCapacity::analyze(participants, group_size).ok(),
        })
        .collect()
}

/// Pairs formed by one full round of `sizing`, counting every manual table
/// as filled to its target.
fn pairs_per_round(sizing: &GroupSizing, participants: usize) -> u64 {
    match sizing {
        GroupSizing::Uniform(size) => RoundCapacity::analyze(participants, *size as usize)
            .map(|cap| cap.pairs_per_round)
            .unwrap_or(0),
        GroupSizing::Manual(sizes) => sizes.iter().map(|&s| pairs(s as usize)).sum(),
    }
}

/// How many of an event's possible pairs have already met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub participants: usize,
    pub committed_rounds: usize,
    /// Distinct unordered pairs with at least one recorded meeting
    pub met_pairs: u64,
    pub possible_pairs: u64,
    /// `met_pairs / possible_pairs` as a percentage
    pub progress_percent: f64,
    /// Full rounds of first meetings the roster supports under the event's
    /// sizing; `None` when a round forms no pairs
    pub theoretical_max_rounds: Option<u64>,
    /// Rough estimate of rounds left: `theoretical_max_rounds` minus the
    /// committed rounds, never below zero
    pub remaining_rounds: Option<u64>,
}

impl CoverageStats {
    /// Counts distinct roster pairs recorded in either participant's
    /// meeting history. Meetings with people no longer on the roster are
    /// ignored.
    pub fn from_participants(
        participants: &[Participant],
        committed_rounds: usize,
        sizing: &GroupSizing,
    ) -> Self {
        let roster: BTreeSet<&str> = participants.iter().map(|p| p.id.as_str()).collect();
        let mut met: BTreeSet<(&str, &str)> = BTreeSet::new();

        for p in participants {
            for other in p.meetings_by_round.values().flatten() {
                let Some(&other) = roster.get(other.as_str()) else {
                    continue;
                };
                if other == p.id {
                    continue;
                }
                let pair = if p.id.as_str() < other {
                    (p.id.as_str(), other)
                } else {
                    (other, p.id.as_str())
                };
                met.insert(pair);
            }
        }

        let possible_pairs = pairs(roster.len());
        let met_pairs = met.len() as u64;
        let progress_percent = if possible_pairs == 0 {
            0.0
        } else {
            met_pairs as f64 * 100.0 / possible_pairs as f64
        };

        let per_round = pairs_per_round(sizing, roster.len());
        let theoretical_max_rounds = (per_round > 0).then(|| possible_pairs / per_round);
        let remaining_rounds =
            theoretical_max_rounds.map(|max| max.saturating_sub(committed_rounds as u64));

        Self {
            participants: participants.len(),
            committed_rounds,
            met_pairs,
            possible_pairs,
            progress_percent,
            theoretical_max_rounds,
            remaining_rounds,
        }
    }

    pub fn remaining_pairs(&self) -> u64 {
        self.possible_pairs - self.met_pairs
    }
}
