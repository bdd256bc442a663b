//! Report wrappers for computed rounds and analyses.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    analysis::{CoverageStats, RoundCapacity, ScenarioOutcome},
    models::{GroupingResult, RoundRecord},
};

/// Wrapper type for displaying a computed round, optionally with its
/// storage state.
///
/// # Examples
///
/// ```rust
/// use tablemix_core::{
///     display::GroupingReport,
///     engine::compute_groups,
///     models::{Gender, GroupSizing, Participant, Personality},
/// };
///
/// let roster: Vec<Participant> = (0..4)
///     .map(|i| Participant::new(format!("p{i}"), Gender::Male, Personality::Extrovert))
///     .collect();
/// let result = compute_groups(&roster, &GroupSizing::Uniform(2), 1, None, Some(5)).unwrap();
///
/// let output = GroupingReport::new(result).to_string();
/// assert!(output.contains("# Round 1"));
/// assert!(output.contains("### Table 2"));
/// ```
pub struct GroupingReport {
    pub result: GroupingResult,
    pub committed: Option<bool>,
    pub committed_at: Option<jiff::Timestamp>,
}

impl GroupingReport {
    /// Report for a freshly computed result.
    pub fn new(result: GroupingResult) -> Self {
        Self {
            result,
            committed: None,
            committed_at: None,
        }
    }
}

impl From<RoundRecord> for GroupingReport {
    fn from(record: RoundRecord) -> Self {
        Self {
            result: record.result,
            committed: Some(record.committed),
            committed_at: record.committed_at,
        }
    }
}

impl fmt::Display for GroupingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.committed, &self.committed_at) {
            (Some(true), Some(at)) => writeln!(f, "Committed on {}", LocalDateTime(at))?,
            (Some(true), None) => writeln!(f, "Committed")?,
            (Some(false), _) => writeln!(f, "Draft: not yet committed")?,
            (None, _) => {}
        }
        if self.committed.is_some() {
            writeln!(f)?;
        }
        write!(f, "{}", self.result)
    }
}

/// Wrapper type for displaying a [`RoundCapacity`] analysis.
pub struct CapacityReport(pub RoundCapacity);

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cap = &self.0;
        let n = cap.participants;
        let k = cap.group_size;

        writeln!(f, "# Round capacity: {n} people, tables of {k}")?;
        writeln!(f)?;
        writeln!(f, "## Setup")?;
        writeln!(f)?;
        writeln!(f, "- Tables per round: {}", cap.group_count)?;
        if !cap.is_even_split() {
            let sizes: Vec<String> = cap.group_sizes.iter().map(usize::to_string).collect();
            writeln!(f, "- Uneven split: {}", sizes.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "## Pairs")?;
        writeln!(f)?;
        writeln!(f, "- Possible pairs: C({n}, 2) = {}", cap.total_pairs)?;
        writeln!(f, "- Pairs per table: {}", cap.pairs_per_group)?;
        writeln!(f, "- Pairs per round: {}", cap.pairs_per_round)?;
        writeln!(f)?;
        writeln!(f, "## Rounds")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Theoretical maximum: {} / {} = {:.2}",
            cap.total_pairs, cap.pairs_per_round, cap.theoretical_rounds
        )?;
        writeln!(f, "- Practical maximum: {}", cap.practical_rounds)?;
        writeln!(
            f,
            "- Approximation (N-1)/(n-1): ({n}-1)/({k}-1) = {:.2}",
            cap.approximate_rounds
        )?;
        writeln!(f, "- Feasibility: {}", cap.rating)
    }
}

/// Wrapper type for displaying a [`compare_scenarios`] table.
///
/// [`compare_scenarios`]: crate::analysis::compare_scenarios
pub struct ScenarioReport(pub Vec<ScenarioOutcome>);

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Scenario comparison")?;
        writeln!(f)?;
        writeln!(
            f,
            "| People | Table size | Tables | Max rounds | Total pairs | Feasibility |"
        )?;
        writeln!(f, "|---|---|---|---|---|---|")?;
        for row in &self.0 {
            match &row.capacity {
                Some(cap) => writeln!(
                    f,
                    "| {} | {} | {} | {} | {} | {} |",
                    row.participants,
                    row.group_size,
                    cap.group_count,
                    cap.practical_rounds,
                    cap.total_pairs,
                    cap.rating
                )?,
                None => writeln!(
                    f,
                    "| {} | {} | N/A | N/A | N/A | invalid |",
                    row.participants, row.group_size
                )?,
            }
        }
        Ok(())
    }
}

/// Wrapper type for displaying [`CoverageStats`] of an event.
pub struct CoverageReport(pub CoverageStats);

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.0;
        writeln!(f, "# Pair coverage")?;
        writeln!(f)?;
        writeln!(f, "- Participants: {}", stats.participants)?;
        writeln!(f, "- Committed rounds: {}", stats.committed_rounds)?;
        writeln!(
            f,
            "- Pairs met: {} of {} ({:.1}%)",
            stats.met_pairs, stats.possible_pairs, stats.progress_percent
        )?;
        writeln!(f, "- Pairs remaining: {}", stats.remaining_pairs())?;
        if let (Some(max), Some(left)) = (stats.theoretical_max_rounds, stats.remaining_rounds) {
            writeln!(f, "- Theoretical maximum rounds: {max}")?;
            writeln!(f, "- Rounds remaining: about {left}")?;
        }
        Ok(())
    }
}
