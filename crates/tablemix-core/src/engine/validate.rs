//! Up-front rejection of requests that cannot be seated.

use std::collections::HashSet;

use crate::{
    error::{GroupingError, Result},
    models::{GroupSizing, Participant},
};

/// Minimum roster size for a grouping cycle.
pub const MIN_PARTICIPANTS: usize = 2;

/// Checks roster size, sizing sanity and total capacity, in that order.
pub fn validate(participants: &[Participant], sizing: &GroupSizing) -> Result<()> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(GroupingError::InsufficientParticipants {
            count: participants.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    if let Some(duplicate) = participants.iter().find(|p| !seen.insert(p.id.as_str())) {
        return Err(GroupingError::invalid_input("participants")
            .with_reason(format!("duplicate participant id '{}'", duplicate.id)));
    }

    match sizing {
        GroupSizing::Uniform(0) => {
            return Err(GroupingError::invalid_input("group_sizing")
                .with_reason("group size must be at least 1"));
        }
        GroupSizing::Manual(sizes) if sizes.contains(&0) => {
            return Err(GroupingError::invalid_input("group_sizing")
                .with_reason("every group size must be at least 1"));
        }
        _ => {}
    }

    let capacity = sizing.total_capacity(participants.len());
    if capacity < participants.len() {
        return Err(GroupingError::CapacityExceeded {
            capacity,
            participants: participants.len(),
        });
    }

    Ok(())
}
