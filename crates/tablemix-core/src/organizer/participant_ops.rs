//! Roster operations for the Organizer.

use std::collections::HashSet;

use log::info;

use super::{require_event, Organizer};
use crate::{
    error::{GroupingError, Result},
    models::Participant,
    params::{AddParticipant, Id, ImportParticipants, RemoveParticipant},
};

/// Rejects blank ids and ids repeated within one batch.
fn check_batch(participants: &[Participant]) -> Result<()> {
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if participant.id.trim().is_empty() {
            return Err(GroupingError::invalid_input("participant_id")
                .with_reason("participant id cannot be empty"));
        }
        if !seen.insert(participant.id.as_str()) {
            return Err(GroupingError::invalid_input("participant_id")
                .with_reason(format!("'{}' appears more than once", participant.id)));
        }
    }
    Ok(())
}

/// Normalizes an incoming record: the met cache is always derived.
fn normalized(mut participant: Participant) -> Participant {
    participant.rebuild_met_cache();
    participant
}

impl Organizer {
    /// Adds one participant to an event roster.
    pub async fn add_participant(&self, params: &AddParticipant) -> Result<Participant> {
        let participant = normalized(params.participant.clone());
        check_batch(std::slice::from_ref(&participant))?;

        let event_id = params.event_id;
        let stored = participant.clone();
        self.with_db(move |db| db.insert_participants(event_id, std::slice::from_ref(&stored)))
            .await?;
        info!("Added participant '{}' to event {event_id}", participant.id);
        Ok(participant)
    }

    /// Adds several participants in one transaction. Returns how many were
    /// added.
    pub async fn import_participants(&self, params: &ImportParticipants) -> Result<usize> {
        let participants: Vec<Participant> =
            params.participants.iter().cloned().map(normalized).collect();
        check_batch(&participants)?;

        let event_id = params.event_id;
        let count = participants.len();
        self.with_db(move |db| db.insert_participants(event_id, &participants))
            .await?;
        info!("Imported {count} participants into event {event_id}");
        Ok(count)
    }

    /// Removes a participant from an event roster.
    pub async fn remove_participant(&self, params: &RemoveParticipant) -> Result<()> {
        let event_id = params.event_id;
        let participant_id = params.participant_id.clone();

        self.with_db(move |db| {
            require_event(db, event_id)?;
            if db.delete_participant(event_id, &participant_id)? {
                Ok(())
            } else {
                Err(GroupingError::ParticipantNotFound { id: participant_id })
            }
        })
        .await
    }

    /// Loads an event roster with full meeting and table history.
    pub async fn list_participants(&self, params: &Id) -> Result<Vec<Participant>> {
        let event_id = params.id;
        self.with_db(move |db| {
            require_event(db, event_id)?;
            db.list_participants(event_id)
        })
        .await
    }
}
