//! Folding an accepted round into participant history.

use std::collections::HashMap;

use log::warn;

use crate::models::{GroupingResult, Participant};

/// Returns new participant snapshots with `result` recorded as `round`.
///
/// Every seated participant gets the group's table number appended to
/// `group_history`, and every member pair is added to each other's
/// `meetings_by_round[round]`. Meetings use set semantics, so committing
/// the same round twice never duplicates an entry (the group history,
/// being a per-commit log, does grow). `all_met_people` is rebuilt for
/// every touched participant. The input slice is left untouched and the
/// output keeps its order.
pub fn commit_history(
    participants: &[Participant],
    result: &GroupingResult,
    round: u32,
) -> Vec<Participant> {
    let index: HashMap<&str, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();

    let mut updated = participants.to_vec();
    let mut touched = vec![false; participants.len()];

    for group in &result.groups {
        let members: Vec<usize> = group
            .members
            .iter()
            .filter_map(|id| {
                let found = index.get(id.as_str()).copied();
                if found.is_none() {
                    warn!("Skipping unknown participant '{id}' in group {}", group.id);
                }
                found
            })
            .collect();

        for &m in &members {
            updated[m].group_history.push(group.id);
            touched[m] = true;
        }

        for (pos, &a) in members.iter().enumerate() {
            for &b in &members[pos + 1..] {
                updated[a].record_meeting(round, &participants[b].id);
                updated[b].record_meeting(round, &participants[a].id);
            }
        }
    }

    for (participant, _) in updated.iter_mut().zip(&touched).filter(|(_, &t)| t) {
        participant.rebuild_met_cache();
    }

    updated
}
