//! Summary scores of a finished grouping.

use super::{group_number, refine::MeetingMatrix};
use crate::models::{
    Gender, GroupAssignment, GroupingResult, GroupingSummary, Participant, Personality,
};

/// Builds the caller-facing result from index groups, dropping empty ones.
pub fn aggregate(
    participants: &[Participant],
    groups: &[Vec<usize>],
    matrix: &MeetingMatrix,
    round: u32,
    seed: u64,
    constraints_applied: bool,
) -> GroupingResult {
    let assignments: Vec<GroupAssignment> = groups
        .iter()
        .enumerate()
        .filter(|(_, members)| !members.is_empty())
        .map(|(g, members)| assignment(group_number(g), members, participants, matrix))
        .collect();

    let summary = summarize(&assignments, participants.len());

    GroupingResult {
        round,
        groups: assignments,
        summary,
        seed,
        constraints_applied,
    }
}

fn assignment(
    id: u32,
    members: &[usize],
    participants: &[Participant],
    matrix: &MeetingMatrix,
) -> GroupAssignment {
    GroupAssignment {
        id,
        members: members.iter().map(|&idx| participants[idx].id.clone()).collect(),
        male_count: count_where(members, participants, |p| p.gender == Gender::Male),
        female_count: count_where(members, participants, |p| p.gender == Gender::Female),
        extrovert_count: count_where(members, participants, |p| {
            p.personality == Personality::Extrovert
        }),
        introvert_count: count_where(members, participants, |p| {
            p.personality == Personality::Introvert
        }),
        new_meetings_count: matrix.new_pairs(members),
    }
}

fn count_where<F>(members: &[usize], participants: &[Participant], pred: F) -> u32
where
    F: Fn(&Participant) -> bool,
{
    members.iter().filter(|&&idx| pred(&participants[idx])).count() as u32
}

/// Computes the summary block for a set of non-empty groups.
pub fn summarize(groups: &[GroupAssignment], participant_count: usize) -> GroupingSummary {
    let total_groups = groups.len() as u32;
    let avg_group_size = if groups.is_empty() {
        0.0
    } else {
        participant_count as f64 / groups.len() as f64
    };

    GroupingSummary {
        total_groups,
        avg_group_size,
        gender_balance_score: balance_score(groups, |g| (g.male_count, g.female_count)),
        mbti_balance_score: balance_score(groups, |g| (g.extrovert_count, g.introvert_count)),
        new_meetings_count: groups.iter().map(|g| g.new_meetings_count).sum(),
    }
}

/// `round(100 × mean(1 − |x − y| / size))` over the groups.
fn balance_score<F>(groups: &[GroupAssignment], split: F) -> u32
where
    F: Fn(&GroupAssignment) -> (u32, u32),
{
    let scored: Vec<f64> = groups
        .iter()
        .filter(|g| !g.members.is_empty())
        .map(|g| {
            let (x, y) = split(g);
            1.0 - f64::from(x.abs_diff(y)) / g.members.len() as f64
        })
        .collect();

    if scored.is_empty() {
        return 0;
    }
    let mean = scored.iter().sum::<f64>() / scored.len() as f64;
    (mean * 100.0).round() as u32
}
