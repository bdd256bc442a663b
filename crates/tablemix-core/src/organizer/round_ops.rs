//! Round operations for the Organizer.

use log::{info, warn};

use super::{require_event, Organizer};
use crate::{
    analysis::CoverageStats,
    engine::{commit_history, GroupingEngine},
    error::{GroupingError, Result},
    models::{HistoryExport, Participant, RoundGroups, RoundRecord},
    params::{ComputeRound, EventRound, Id},
};

impl Organizer {
    /// Computes a round and stores it as a draft.
    ///
    /// Sizing and constraints in `params` override the event's stored
    /// settings. Without an explicit round number the round after the last
    /// committed one is computed. Recomputing a draft replaces it; a
    /// committed round is refused with
    /// [`GroupingError::RoundAlreadyCommitted`].
    pub async fn compute_round(&self, params: &ComputeRound) -> Result<RoundRecord> {
        let params = params.clone();
        let engine = GroupingEngine::new(self.engine_config).with_seed(params.seed);

        self.with_db(move |db| {
            let event = require_event(db, params.event_id)?;
            let round = match params.round {
                Some(0) => {
                    return Err(GroupingError::invalid_input("round")
                        .with_reason("round numbers start at 1"))
                }
                Some(round) => round,
                None => db.last_committed_round(event.id)?.unwrap_or(0) + 1,
            };

            if let Some(existing) = db.get_round(event.id, round)? {
                if existing.committed {
                    return Err(GroupingError::RoundAlreadyCommitted {
                        event_id: event.id,
                        round,
                    });
                }
            }

            let roster = db.list_participants(event.id)?;
            let sizing = params.group_sizing.unwrap_or(event.group_sizing);
            let constraints = params.gender_constraints.or(event.gender_constraints);

            let result = engine.compute_groups(&roster, &sizing, round, constraints.as_deref())?;
            let record = db.save_round(event.id, &result)?;
            info!(
                "Stored draft of round {round} for event {} ({} tables)",
                event.id, result.summary.total_groups
            );
            Ok(record)
        })
        .await
    }

    /// Folds a draft round into participant history and marks it committed.
    ///
    /// Returns the updated roster. Members of the stored result who have
    /// since left the roster are skipped.
    pub async fn commit_round(&self, params: &EventRound) -> Result<Vec<Participant>> {
        let EventRound { event_id, round } = *params;

        self.with_db(move |db| {
            require_event(db, event_id)?;
            let record = db
                .get_round(event_id, round)?
                .ok_or(GroupingError::RoundNotFound { event_id, round })?;
            if record.committed {
                return Err(GroupingError::RoundAlreadyCommitted { event_id, round });
            }

            let roster = db.list_participants(event_id)?;
            if record.result.participant_count() != roster.len() {
                warn!(
                    "Round {round} seats {} people but event {event_id} now has {}",
                    record.result.participant_count(),
                    roster.len()
                );
            }

            let updated = commit_history(&roster, &record.result, round);
            db.commit_round(event_id, round, &updated)?;
            info!("Committed round {round} of event {event_id}");
            Ok(updated)
        })
        .await
    }

    /// Retrieves a stored round.
    pub async fn get_round(&self, params: &EventRound) -> Result<Option<RoundRecord>> {
        let EventRound { event_id, round } = *params;
        self.with_db(move |db| db.get_round(event_id, round)).await
    }

    /// Lists an event's stored rounds, drafts included.
    pub async fn list_rounds(&self, params: &Id) -> Result<Vec<RoundRecord>> {
        let event_id = params.id;
        self.with_db(move |db| {
            require_event(db, event_id)?;
            db.list_rounds(event_id, false)
        })
        .await
    }

    /// Builds the portable history document of an event's committed rounds.
    pub async fn export_history(&self, params: &Id) -> Result<HistoryExport> {
        let event_id = params.id;
        self.with_db(move |db| {
            let event = require_event(db, event_id)?;
            let total_people = db.list_participants(event_id)?.len();
            let rounds = db
                .list_rounds(event_id, true)?
                .iter()
                .map(RoundGroups::from)
                .collect();

            Ok(HistoryExport {
                event: event.name,
                total_people,
                group_sizing: event.group_sizing,
                rounds,
            })
        })
        .await
    }

    /// Measures how many roster pairs have met so far and estimates the
    /// rounds left under the event's sizing.
    pub async fn coverage(&self, params: &Id) -> Result<CoverageStats> {
        let event_id = params.id;
        self.with_db(move |db| {
            let event = require_event(db, event_id)?;
            let roster = db.list_participants(event_id)?;
            let committed = db.committed_round_count(event_id)?;
            Ok(CoverageStats::from_participants(
                &roster,
                committed,
                &event.group_sizing,
            ))
        })
        .await
    }
}
