//! Initial placement of participants into groups.
//!
//! Both strategies work on roster indices: a group is a `Vec<usize>` of
//! positions in the participant slice, and group `g` carries table number
//! `g + 1`.

use rand::{seq::SliceRandom, Rng};

use super::group_number;
use crate::{
    error::{GroupingError, Result},
    models::{Gender, GenderConstraint, Participant},
};

/// Places the whole roster without composition constraints.
///
/// Participants are visited in shuffled order and each joins the smallest
/// group whose table number differs from the one they held last round,
/// or the overall smallest group when every table would be a repeat.
pub fn allocate_unconstrained<R: Rng + ?Sized>(
    participants: &[Participant],
    group_count: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..participants.len()).collect();
    order.shuffle(rng);

    let mut groups = vec![Vec::new(); group_count];
    place_in_order(participants, &order, &mut groups);
    groups
}

/// Places the roster so group `g` gets exactly `constraints[g]` males and
/// females.
///
/// The constraints must seat the whole roster: each gender pool has to
/// match its summed requirement exactly, and no constraint may seat more
/// people than its group's target. Otherwise this fails with
/// [`GroupingError::GenderConstraintInfeasible`] or
/// [`GroupingError::GenderConstraintOverTarget`] before touching the random
/// source.
pub fn allocate_constrained<R: Rng + ?Sized>(
    participants: &[Participant],
    constraints: &[GenderConstraint],
    targets: &[usize],
    rng: &mut R,
) -> Result<Vec<Vec<usize>>> {
    debug_assert_eq!(constraints.len(), targets.len());
    let males = pool(participants, Gender::Male);
    let females = pool(participants, Gender::Female);

    let required_males: usize = constraints.iter().map(|c| c.male_count as usize).sum();
    let required_females: usize = constraints.iter().map(|c| c.female_count as usize).sum();
    check_pool(Gender::Male, required_males, males.len())?;
    check_pool(Gender::Female, required_females, females.len())?;
    for (g, (constraint, &target)) in constraints.iter().zip(targets).enumerate() {
        let required = (constraint.male_count + constraint.female_count) as usize;
        if required > target {
            return Err(GroupingError::GenderConstraintOverTarget {
                group: group_number(g),
                required,
                target,
            });
        }
    }

    let mut assigned = vec![false; participants.len()];
    let mut groups = vec![Vec::new(); constraints.len()];

    for (g, constraint) in constraints.iter().enumerate() {
        let number = group_number(g);
        for (candidates, count) in [
            (&males, constraint.male_count),
            (&females, constraint.female_count),
        ] {
            let picked = pick_members(participants, candidates, &assigned, number, count, rng);
            for idx in picked {
                assigned[idx] = true;
                groups[g].push(idx);
            }
        }
    }

    Ok(groups)
}

/// Appends each participant in `order` to its preferred group.
fn place_in_order(participants: &[Participant], order: &[usize], groups: &mut [Vec<usize>]) {
    for &idx in order {
        let target = choose_group(groups, participants[idx].last_group());
        groups[target].push(idx);
    }
}

/// Smallest avoidable group (lowest number on ties), else smallest overall.
fn choose_group(groups: &[Vec<usize>], previous: Option<u32>) -> usize {
    (0..groups.len())
        .filter(|&g| previous != Some(group_number(g)))
        .min_by_key(|&g| groups[g].len())
        .or_else(|| (0..groups.len()).min_by_key(|&g| groups[g].len()))
        .unwrap_or(0)
}

fn pool(participants: &[Participant], gender: Gender) -> Vec<usize> {
    participants
        .iter()
        .enumerate()
        .filter(|(_, p)| p.gender == gender)
        .map(|(i, _)| i)
        .collect()
}

fn check_pool(gender: Gender, required: usize, available: usize) -> Result<()> {
    if available != required {
        return Err(GroupingError::GenderConstraintInfeasible {
            gender,
            required,
            available,
        });
    }
    Ok(())
}

/// Chooses `count` unassigned candidates, preferring those who did not sit
/// at table `number` last round. Ties are broken by a shuffle.
fn pick_members<R: Rng + ?Sized>(
    participants: &[Participant],
    candidates: &[usize],
    assigned: &[bool],
    number: u32,
    count: u32,
    rng: &mut R,
) -> Vec<usize> {
    let mut open: Vec<usize> = candidates.iter().copied().filter(|&i| !assigned[i]).collect();
    open.shuffle(rng);
    // stable sort keeps the shuffled order within each preference class
    open.sort_by_key(|&i| participants[i].last_group() == Some(number));
    open.truncate(count as usize);
    open
}
