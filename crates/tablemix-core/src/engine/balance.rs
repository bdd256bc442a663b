//! Correction of group-size and gender drift after refinement.

use log::debug;

use super::{refine::swap_members, EngineConfig};
use crate::models::Gender;

/// Counters reported by [`balance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceOutcome {
    pub iterations: usize,
    pub moves: usize,
    pub swaps: usize,
}

/// Alternates size correction and gender correction until an iteration
/// changes nothing or `config.max_balance_iterations` is reached.
pub fn balance(
    groups: &mut [Vec<usize>],
    targets: &[usize],
    genders: &[Gender],
    config: &EngineConfig,
) -> BalanceOutcome {
    debug_assert_eq!(groups.len(), targets.len());
    let mut outcome = BalanceOutcome::default();

    while outcome.iterations < config.max_balance_iterations {
        outcome.iterations += 1;
        let moves = correct_sizes(groups, targets);
        let swaps = correct_genders(groups, genders);
        outcome.moves += moves;
        outcome.swaps += swaps;
        if moves == 0 && swaps == 0 {
            break;
        }
    }

    debug!(
        "Balancing finished after {} iterations ({} moves, {} swaps)",
        outcome.iterations, outcome.moves, outcome.swaps
    );
    outcome
}

/// Moves one member from every over-target group to every under-target
/// group it is paired with.
fn correct_sizes(groups: &mut [Vec<usize>], targets: &[usize]) -> usize {
    let mut moves = 0;
    for from in 0..groups.len() {
        for to in 0..groups.len() {
            if from == to {
                continue;
            }
            if groups[from].len() > targets[from] && groups[to].len() < targets[to] {
                if let Some(member) = groups[from].pop() {
                    groups[to].push(member);
                    moves += 1;
                }
            }
        }
    }
    moves
}

fn imbalance(members: &[usize], genders: &[Gender]) -> usize {
    let males = members
        .iter()
        .filter(|&&idx| genders[idx] == Gender::Male)
        .count();
    males.abs_diff(members.len() - males)
}

fn correct_genders(groups: &mut [Vec<usize>], genders: &[Gender]) -> usize {
    let mut swaps = 0;
    for a in 0..groups.len() {
        for b in (a + 1)..groups.len() {
            if imbalance(&groups[a], genders) <= 1 && imbalance(&groups[b], genders) <= 1 {
                continue;
            }
            if try_gender_swap(groups, genders, a, b) {
                swaps += 1;
            }
        }
    }
    swaps
}

/// Applies the first cross-gender swap between `a` and `b` that lowers
/// their summed imbalance.
fn try_gender_swap(groups: &mut [Vec<usize>], genders: &[Gender], a: usize, b: usize) -> bool {
    let before = imbalance(&groups[a], genders) + imbalance(&groups[b], genders);

    for i in 0..groups[a].len() {
        for j in 0..groups[b].len() {
            if genders[groups[a][i]] == genders[groups[b][j]] {
                continue;
            }
            swap_members(groups, (a, i), (b, j));
            let after = imbalance(&groups[a], genders) + imbalance(&groups[b], genders);
            if after < before {
                return true;
            }
            swap_members(groups, (a, i), (b, j));
        }
    }
    false
}
