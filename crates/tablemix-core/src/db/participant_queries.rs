//! Roster and participant-history persistence.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, Connection};

use super::utils::{gender_at, personality_at};
use crate::{
    error::{DatabaseResultExt, GroupingError, Result},
    models::Participant,
};

const CHECK_PARTICIPANT_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM participants WHERE event_id = ?1 AND participant_id = ?2)";
const INSERT_PARTICIPANT_SQL: &str = "INSERT INTO participants (event_id, participant_id, gender, personality, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const DELETE_PARTICIPANT_SQL: &str =
    "DELETE FROM participants WHERE event_id = ?1 AND participant_id = ?2";
const SELECT_PARTICIPANTS_SQL: &str = "SELECT participant_id, gender, personality FROM participants WHERE event_id = ?1 ORDER BY rowid";
const SELECT_MEETINGS_SQL: &str =
    "SELECT participant_id, round, met_id FROM participant_meetings WHERE event_id = ?1";
const SELECT_GROUPS_SQL: &str = "SELECT participant_id, group_number FROM participant_groups WHERE event_id = ?1 ORDER BY participant_id, position";
const DELETE_MEETINGS_SQL: &str =
    "DELETE FROM participant_meetings WHERE event_id = ?1 AND participant_id = ?2";
const DELETE_GROUPS_SQL: &str =
    "DELETE FROM participant_groups WHERE event_id = ?1 AND participant_id = ?2";
const INSERT_MEETING_SQL: &str = "INSERT OR IGNORE INTO participant_meetings (event_id, participant_id, round, met_id) VALUES (?1, ?2, ?3, ?4)";
const INSERT_GROUP_SQL: &str = "INSERT INTO participant_groups (event_id, participant_id, position, group_number) VALUES (?1, ?2, ?3, ?4)";

/// Replaces the stored meetings and table history of `participants`.
///
/// Runs on a plain connection so callers can compose it into their own
/// transaction.
pub(super) fn write_history(
    conn: &Connection,
    event_id: u64,
    participants: &[Participant],
) -> Result<()> {
    let mut delete_meetings = conn
        .prepare_cached(DELETE_MEETINGS_SQL)
        .db_context("Failed to prepare query")?;
    let mut delete_groups = conn
        .prepare_cached(DELETE_GROUPS_SQL)
        .db_context("Failed to prepare query")?;
    let mut insert_meeting = conn
        .prepare_cached(INSERT_MEETING_SQL)
        .db_context("Failed to prepare query")?;
    let mut insert_group = conn
        .prepare_cached(INSERT_GROUP_SQL)
        .db_context("Failed to prepare query")?;

    for participant in participants {
        delete_meetings
            .execute(params![event_id as i64, &participant.id])
            .db_context("Failed to clear meetings")?;
        delete_groups
            .execute(params![event_id as i64, &participant.id])
            .db_context("Failed to clear table history")?;

        for (round, met) in &participant.meetings_by_round {
            for other in met {
                insert_meeting
                    .execute(params![event_id as i64, &participant.id, round, other])
                    .db_context("Failed to insert meeting")?;
            }
        }
        for (position, group) in participant.group_history.iter().enumerate() {
            insert_group
                .execute(params![
                    event_id as i64,
                    &participant.id,
                    position as i64,
                    group
                ])
                .db_context("Failed to insert table history")?;
        }
    }
    Ok(())
}

impl super::Database {
    /// Adds participants, including any history they carry, to an event.
    ///
    /// Fails without writing anything if the event does not exist or an id
    /// is already on the roster.
    pub fn insert_participants(&mut self, event_id: u64, participants: &[Participant]) -> Result<()> {
        if !self.event_exists(event_id)? {
            return Err(GroupingError::EventNotFound { id: event_id });
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        for participant in participants {
            let exists: bool = tx
                .query_row(
                    CHECK_PARTICIPANT_EXISTS_SQL,
                    params![event_id as i64, &participant.id],
                    |row| row.get(0),
                )
                .db_context("Failed to check participant existence")?;
            if exists {
                return Err(GroupingError::invalid_input("participant_id").with_reason(format!(
                    "'{}' is already on the roster of event {event_id}",
                    participant.id
                )));
            }

            tx.execute(
                INSERT_PARTICIPANT_SQL,
                params![
                    event_id as i64,
                    &participant.id,
                    participant.gender.as_str(),
                    participant.personality.as_str(),
                    &now_str
                ],
            )
            .db_context("Failed to insert participant")?;
        }

        write_history(&tx, event_id, participants)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Removes a participant and their history from an event roster.
    ///
    /// Meetings other participants recorded with them are kept. Returns
    /// false if the participant was not on the roster.
    pub fn delete_participant(&mut self, event_id: u64, participant_id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(
                DELETE_PARTICIPANT_SQL,
                params![event_id as i64, participant_id],
            )
            .db_context("Failed to delete participant")?;
        Ok(deleted > 0)
    }

    /// Loads an event roster in insertion order with full history.
    pub fn list_participants(&self, event_id: u64) -> Result<Vec<Participant>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PARTICIPANTS_SQL)
            .db_context("Failed to prepare query")?;
        let mut participants = stmt
            .query_map(params![event_id as i64], |row| {
                Ok(Participant::new(
                    row.get::<_, String>(0)?,
                    gender_at(row, 1)?,
                    personality_at(row, 2)?,
                ))
            })
            .db_context("Failed to query participants")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read participant row")?;

        let index: HashMap<String, usize> = participants
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        let mut stmt = self
            .connection
            .prepare(SELECT_MEETINGS_SQL)
            .db_context("Failed to prepare query")?;
        let meetings = stmt
            .query_map(params![event_id as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .db_context("Failed to query meetings")?;
        for meeting in meetings {
            let (id, round, met) = meeting.db_context("Failed to read meeting row")?;
            if let Some(&i) = index.get(&id) {
                participants[i].record_meeting(round, &met);
            }
        }

        let mut stmt = self
            .connection
            .prepare(SELECT_GROUPS_SQL)
            .db_context("Failed to prepare query")?;
        let groups = stmt
            .query_map(params![event_id as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
            })
            .db_context("Failed to query table history")?;
        for group in groups {
            let (id, number) = group.db_context("Failed to read table history row")?;
            if let Some(&i) = index.get(&id) {
                participants[i].group_history.push(number);
            }
        }

        for participant in &mut participants {
            participant.rebuild_met_cache();
        }
        Ok(participants)
    }

    /// Replaces the stored history of the given participants in one
    /// transaction.
    pub fn save_participant_history(
        &mut self,
        event_id: u64,
        participants: &[Participant],
    ) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        write_history(&tx, event_id, participants)?;
        tx.commit().db_context("Failed to commit transaction")
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;
    use super::*;
    use crate::models::{Gender, GroupSizing, Personality};

    fn setup() -> (Database, u64) {
        let mut db = Database::in_memory().unwrap();
        let event = db
            .create_event("Mixer", &GroupSizing::Uniform(2), None)
            .unwrap();
        (db, event.id)
    }

    #[test]
    fn test_roster_round_trips_history() {
        let (mut db, event_id) = setup();
        let mut ana = Participant::new("ana", Gender::Female, Personality::Introvert);
        ana.record_meeting(1, "ben");
        ana.record_meeting(2, "cy");
        ana.group_history = vec![2, 1];
        let ben = Participant::new("ben", Gender::Male, Personality::Extrovert);

        db.insert_participants(event_id, &[ana, ben]).unwrap();
        let roster = db.list_participants(event_id).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, "ana");
        assert_eq!(roster[0].group_history, vec![2, 1]);
        assert_eq!(roster[0].all_met_people.len(), 2);
        assert!(roster[0].has_met_before("ben", 2));
        assert_eq!(roster[1].personality, Personality::Extrovert);
    }

    #[test]
    fn test_duplicate_participant_is_rejected_atomically() {
        let (mut db, event_id) = setup();
        let ana = Participant::new("ana", Gender::Female, Personality::Introvert);
        db.insert_participants(event_id, std::slice::from_ref(&ana))
            .unwrap();

        let ben = Participant::new("ben", Gender::Male, Personality::Extrovert);
        let err = db.insert_participants(event_id, &[ben, ana]).unwrap_err();
        assert!(matches!(err, GroupingError::InvalidInput { .. }));
        assert_eq!(db.list_participants(event_id).unwrap().len(), 1);
    }

    #[test]
    fn test_insert_into_missing_event() {
        let mut db = Database::in_memory().unwrap();
        let ana = Participant::new("ana", Gender::Female, Personality::Introvert);
        assert!(matches!(
            db.insert_participants(7, &[ana]),
            Err(GroupingError::EventNotFound { id: 7 })
        ));
    }

    #[test]
    fn test_save_history_replaces_previous() {
        let (mut db, event_id) = setup();
        let mut ana = Participant::new("ana", Gender::Female, Personality::Introvert);
        ana.record_meeting(1, "ben");
        ana.group_history = vec![1];
        db.insert_participants(event_id, std::slice::from_ref(&ana))
            .unwrap();

        ana.record_meeting(2, "cy");
        ana.group_history.push(3);
        db.save_participant_history(event_id, std::slice::from_ref(&ana))
            .unwrap();

        let roster = db.list_participants(event_id).unwrap();
        assert_eq!(roster[0].group_history, vec![1, 3]);
        assert_eq!(roster[0].meetings_by_round.len(), 2);
    }

    #[test]
    fn test_delete_participant() {
        let (mut db, event_id) = setup();
        let ana = Participant::new("ana", Gender::Female, Personality::Introvert);
        db.insert_participants(event_id, &[ana]).unwrap();

        assert!(db.delete_participant(event_id, "ana").unwrap());
        assert!(!db.delete_participant(event_id, "ana").unwrap());
        assert!(db.list_participants(event_id).unwrap().is_empty());
    }
}
