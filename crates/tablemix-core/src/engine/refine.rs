//! First-improvement swap hill climbing over new-meeting scores.

use log::debug;

use super::EngineConfig;
use crate::models::{Gender, Participant};

/// Precomputed "already met" relation for one roster and round.
///
/// `met(a, b)` is true when either participant recorded the other in any
/// round strictly before the current one.
///
/// Stored as a dense `n × n` table, which suits event rosters of up to a
/// few hundred people.
#[derive(Debug, Clone)]
pub struct MeetingMatrix {
    size: usize,
    met: Vec<bool>,
    genders: Vec<Gender>,
}

impl MeetingMatrix {
    pub fn build(participants: &[Participant], round: u32) -> Self {
        let size = participants.len();
        let mut met = vec![false; size * size];
        for (a, left) in participants.iter().enumerate() {
            for (b, right) in participants.iter().enumerate().skip(a + 1) {
                let seen =
                    left.has_met_before(&right.id, round) || right.has_met_before(&left.id, round);
                met[a * size + b] = seen;
                met[b * size + a] = seen;
            }
        }
        Self {
            size,
            met,
            genders: participants.iter().map(|p| p.gender).collect(),
        }
    }

    pub fn met(&self, a: usize, b: usize) -> bool {
        self.met[a * self.size + b]
    }

    pub fn gender(&self, idx: usize) -> Gender {
        self.genders[idx]
    }

    pub fn genders(&self) -> &[Gender] {
        &self.genders
    }

    /// Weighted value of seating `a` with `b`.
    pub fn pair_score(&self, a: usize, b: usize, config: &EngineConfig) -> u32 {
        if self.met(a, b) {
            return 0;
        }
        if self.genders[a] != self.genders[b] {
            config.new_meeting_weight + config.cross_gender_bonus
        } else {
            config.new_meeting_weight
        }
    }

    /// Sum of pair scores over every member pair of a group.
    pub fn group_score(&self, members: &[usize], config: &EngineConfig) -> u32 {
        pairs(members)
            .map(|(a, b)| self.pair_score(a, b, config))
            .sum()
    }

    /// Unweighted count of member pairs that have not met before.
    pub fn new_pairs(&self, members: &[usize]) -> u32 {
        pairs(members).filter(|&(a, b)| !self.met(a, b)).count() as u32
    }
}

fn pairs(members: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    members
        .iter()
        .enumerate()
        .flat_map(move |(i, &a)| members[i + 1..].iter().map(move |&b| (a, b)))
}

/// Counters reported by [`refine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineOutcome {
    pub passes: usize,
    pub accepted_swaps: usize,
}

/// Swaps members between groups while the swap strictly raises the
/// combined score of the two groups involved.
///
/// Each pass stops at the first improving swap and the scan restarts; the
/// loop ends on a pass without improvement or after
/// `config.max_refine_passes` passes. With `same_gender_only`, only swaps
/// between participants of the same gender are tried, which keeps every
/// group's gender counts intact.
pub fn refine(
    groups: &mut [Vec<usize>],
    matrix: &MeetingMatrix,
    config: &EngineConfig,
    same_gender_only: bool,
) -> RefineOutcome {
    let mut outcome = RefineOutcome::default();

    while outcome.passes < config.max_refine_passes {
        outcome.passes += 1;
        if !improve_once(groups, matrix, config, same_gender_only) {
            break;
        }
        outcome.accepted_swaps += 1;
    }

    debug!(
        "Refinement finished after {} passes with {} accepted swaps",
        outcome.passes, outcome.accepted_swaps
    );
    outcome
}

fn improve_once(
    groups: &mut [Vec<usize>],
    matrix: &MeetingMatrix,
    config: &EngineConfig,
    same_gender_only: bool,
) -> bool {
    for a in 0..groups.len() {
        for b in (a + 1)..groups.len() {
            let before =
                matrix.group_score(&groups[a], config) + matrix.group_score(&groups[b], config);

            for i in 0..groups[a].len() {
                for j in 0..groups[b].len() {
                    if same_gender_only
                        && matrix.gender(groups[a][i]) != matrix.gender(groups[b][j])
                    {
                        continue;
                    }

                    swap_members(groups, (a, i), (b, j));
                    let after = matrix.group_score(&groups[a], config)
                        + matrix.group_score(&groups[b], config);
                    if after > before {
                        return true;
                    }
                    swap_members(groups, (a, i), (b, j));
                }
            }
        }
    }
    false
}

/// Exchanges `groups[a][i]` with `groups[b][j]`; requires `a < b`.
pub(crate) fn swap_members(groups: &mut [Vec<usize>], (a, i): (usize, usize), (b, j): (usize, usize)) {
    debug_assert!(a < b, "swap_members expects ordered group indices");
    let (left, right) = groups.split_at_mut(b);
    std::mem::swap(&mut left[a][i], &mut right[0][j]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Personality;

    fn person(id: &str, gender: Gender) -> Participant {
        Participant::new(id, gender, Personality::Extrovert)
    }

    fn met_in(people: &mut [Participant], round: u32, a: usize, b: usize) {
        let (id_a, id_b) = (people[a].id.clone(), people[b].id.clone());
        people[a].record_meeting(round, &id_b);
        people[b].record_meeting(round, &id_a);
    }

    #[test]
    fn test_matrix_ignores_current_and_later_rounds() {
        let mut people = vec![person("a", Gender::Male), person("b", Gender::Female)];
        met_in(&mut people, 2, 0, 1);

        assert!(!MeetingMatrix::build(&people, 2).met(0, 1));
        assert!(MeetingMatrix::build(&people, 3).met(0, 1));
    }

    #[test]
    fn test_matrix_is_symmetric_on_one_sided_records() {
        let mut people = vec![person("a", Gender::Male), person("b", Gender::Male)];
        people[0].record_meeting(1, "b");

        let matrix = MeetingMatrix::build(&people, 2);
        assert!(matrix.met(0, 1));
        assert!(matrix.met(1, 0));
    }

    #[test]
    fn test_pair_scores() {
        let mut people = vec![
            person("a", Gender::Male),
            person("b", Gender::Female),
            person("c", Gender::Male),
        ];
        met_in(&mut people, 1, 0, 2);
        let matrix = MeetingMatrix::build(&people, 2);
        let config = EngineConfig::default();

        assert_eq!(matrix.pair_score(0, 1, &config), 25);
        assert_eq!(matrix.pair_score(0, 2, &config), 0);
        assert_eq!(matrix.group_score(&[0, 1, 2], &config), 50);
        assert_eq!(matrix.new_pairs(&[0, 1, 2]), 2);
    }

    #[test]
    fn test_refine_breaks_up_previous_tables() {
        // a,b sat together last round and so did c,d.
        let mut people = vec![
            person("a", Gender::Male),
            person("b", Gender::Male),
            person("c", Gender::Male),
            person("d", Gender::Male),
        ];
        met_in(&mut people, 1, 0, 1);
        met_in(&mut people, 1, 2, 3);
        let matrix = MeetingMatrix::build(&people, 2);
        let config = EngineConfig::default();

        let mut groups = vec![vec![0, 1], vec![2, 3]];
        let outcome = refine(&mut groups, &matrix, &config, false);

        assert_eq!(outcome.accepted_swaps, 1);
        assert_eq!(matrix.new_pairs(&groups[0]) + matrix.new_pairs(&groups[1]), 2);
    }

    #[test]
    fn test_refine_respects_pass_cap() {
        let mut people = vec![
            person("a", Gender::Male),
            person("b", Gender::Male),
            person("c", Gender::Female),
            person("d", Gender::Female),
        ];
        met_in(&mut people, 1, 0, 1);
        met_in(&mut people, 1, 2, 3);
        let matrix = MeetingMatrix::build(&people, 2);
        let config = EngineConfig::default().with_max_refine_passes(0);

        let mut groups = vec![vec![0, 1], vec![2, 3]];
        let outcome = refine(&mut groups, &matrix, &config, false);
        assert_eq!(outcome.accepted_swaps, 0);
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_refine_same_gender_only_keeps_counts() {
        let mut people = vec![
            person("a", Gender::Male),
            person("b", Gender::Male),
            person("c", Gender::Female),
            person("d", Gender::Female),
        ];
        met_in(&mut people, 1, 0, 1);
        met_in(&mut people, 1, 2, 3);
        let matrix = MeetingMatrix::build(&people, 2);
        let config = EngineConfig::default();

        let mut groups = vec![vec![0, 1], vec![2, 3]];
        refine(&mut groups, &matrix, &config, true);

        // Only cross-gender swaps could help here, and they are disallowed.
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_refine_keeps_group_sizes() {
        let people: Vec<Participant> = (0..7)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
                person(&format!("p{i}"), gender)
            })
            .collect();
        let matrix = MeetingMatrix::build(&people, 1);
        let config = EngineConfig::default();

        let mut groups = vec![vec![0, 2, 4, 6], vec![1, 3, 5]];
        refine(&mut groups, &matrix, &config, false);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 3);
    }
}
