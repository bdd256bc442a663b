//! Stored round results.
//!
//! A round is written as a draft when computed and may be recomputed any
//! number of times. Committing freezes it: drafts can no longer replace it
//! and it counts towards the event's round numbering.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::{
    participant_queries::write_history,
    utils::{json_at, optional_timestamp_at, timestamp_at},
};
use crate::{
    error::{DatabaseResultExt, GroupingError, Result},
    models::{GroupingResult, Participant, RoundRecord},
};

const ROUND_COLUMNS: &str = "event_id, round, result, committed, created_at, committed_at";
const SELECT_ROUND_COMMITTED_SQL: &str =
    "SELECT committed FROM rounds WHERE event_id = ?1 AND round = ?2";
const UPSERT_DRAFT_SQL: &str = "INSERT INTO rounds (event_id, round, result, committed, created_at) VALUES (?1, ?2, ?3, 0, ?4) ON CONFLICT(event_id, round) DO UPDATE SET result = excluded.result, created_at = excluded.created_at WHERE committed = 0";
const MARK_COMMITTED_SQL: &str = "UPDATE rounds SET committed = 1, committed_at = ?1 WHERE event_id = ?2 AND round = ?3 AND committed = 0";
const SELECT_LAST_COMMITTED_SQL: &str =
    "SELECT MAX(round) FROM rounds WHERE event_id = ?1 AND committed = 1";
const COUNT_COMMITTED_SQL: &str =
    "SELECT COUNT(*) FROM rounds WHERE event_id = ?1 AND committed = 1";

fn committed_state(conn: &Connection, event_id: u64, round: u32) -> Result<Option<bool>> {
    conn.query_row(
        SELECT_ROUND_COMMITTED_SQL,
        params![event_id as i64, round],
        |row| row.get::<_, bool>(0),
    )
    .optional()
    .db_context("Failed to query round state")
}

fn mark_committed(conn: &Connection, event_id: u64, round: u32) -> Result<()> {
    match committed_state(conn, event_id, round)? {
        None => return Err(GroupingError::RoundNotFound { event_id, round }),
        Some(true) => return Err(GroupingError::RoundAlreadyCommitted { event_id, round }),
        Some(false) => {}
    }
    conn.execute(
        MARK_COMMITTED_SQL,
        params![Timestamp::now().to_string(), event_id as i64, round],
    )
    .db_context("Failed to mark round committed")?;
    Ok(())
}

impl super::Database {
    fn build_round_from_row(row: &rusqlite::Row) -> rusqlite::Result<RoundRecord> {
        Ok(RoundRecord {
            event_id: row.get::<_, i64>(0)? as u64,
            round: row.get(1)?,
            result: json_at(row, 2)?,
            committed: row.get(3)?,
            created_at: timestamp_at(row, 4)?,
            committed_at: optional_timestamp_at(row, 5)?,
        })
    }

    /// Stores `result` as the draft for its round, replacing an earlier
    /// draft.
    ///
    /// Fails with [`GroupingError::RoundAlreadyCommitted`] if the round is
    /// already committed.
    pub fn save_round(&mut self, event_id: u64, result: &GroupingResult) -> Result<RoundRecord> {
        let json = serde_json::to_string(result)?;
        let round = result.round;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if committed_state(&tx, event_id, round)? == Some(true) {
            return Err(GroupingError::RoundAlreadyCommitted { event_id, round });
        }

        let now = Timestamp::now();
        tx.execute(
            UPSERT_DRAFT_SQL,
            params![event_id as i64, round, &json, now.to_string()],
        )
        .db_context("Failed to store round")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(RoundRecord {
            event_id,
            round,
            result: result.clone(),
            committed: false,
            created_at: now,
            committed_at: None,
        })
    }

    /// Retrieves a stored round.
    pub fn get_round(&self, event_id: u64, round: u32) -> Result<Option<RoundRecord>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ROUND_COLUMNS} FROM rounds WHERE event_id = ?1 AND round = ?2"
            ))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![event_id as i64, round], Self::build_round_from_row)
            .optional()
            .db_context("Failed to query round")
    }

    /// Lists an event's stored rounds in round order, optionally only the
    /// committed ones.
    pub fn list_rounds(&self, event_id: u64, committed_only: bool) -> Result<Vec<RoundRecord>> {
        let filter = if committed_only { " AND committed = 1" } else { "" };
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ROUND_COLUMNS} FROM rounds WHERE event_id = ?1{filter} ORDER BY round"
            ))
            .db_context("Failed to prepare query")?;

        let rounds = stmt
            .query_map(params![event_id as i64], Self::build_round_from_row)
            .db_context("Failed to query rounds")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read round row")?;
        Ok(rounds)
    }

    /// Highest committed round number of an event.
    pub fn last_committed_round(&self, event_id: u64) -> Result<Option<u32>> {
        self.connection
            .query_row(SELECT_LAST_COMMITTED_SQL, params![event_id as i64], |row| {
                row.get::<_, Option<u32>>(0)
            })
            .db_context("Failed to query last committed round")
    }

    /// Number of committed rounds of an event.
    pub fn committed_round_count(&self, event_id: u64) -> Result<usize> {
        self.connection
            .query_row(COUNT_COMMITTED_SQL, params![event_id as i64], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .db_context("Failed to count committed rounds")
    }

    /// Marks a draft round as committed.
    pub fn mark_round_committed(&mut self, event_id: u64, round: u32) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        mark_committed(&tx, event_id, round)?;
        tx.commit().db_context("Failed to commit transaction")
    }

    /// Persists the post-commit participant history and marks the round
    /// committed, in that order, within one transaction.
    pub fn commit_round(
        &mut self,
        event_id: u64,
        round: u32,
        participants: &[Participant],
    ) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if committed_state(&tx, event_id, round)? == Some(true) {
            return Err(GroupingError::RoundAlreadyCommitted { event_id, round });
        }
        write_history(&tx, event_id, participants)?;
        mark_committed(&tx, event_id, round)?;

        tx.commit().db_context("Failed to commit transaction")
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;
    use super::*;
    use crate::models::{GroupSizing, GroupingSummary};

    fn result(round: u32, new_meetings: u32) -> GroupingResult {
        GroupingResult {
            round,
            groups: vec![],
            summary: GroupingSummary {
                total_groups: 0,
                avg_group_size: 0.0,
                gender_balance_score: 0,
                mbti_balance_score: 0,
                new_meetings_count: new_meetings,
            },
            seed: 3,
            constraints_applied: false,
        }
    }

    fn setup() -> (Database, u64) {
        let mut db = Database::in_memory().unwrap();
        let event = db
            .create_event("Mixer", &GroupSizing::Uniform(4), None)
            .unwrap();
        (db, event.id)
    }

    #[test]
    fn test_draft_is_replaced() {
        let (mut db, event_id) = setup();
        db.save_round(event_id, &result(1, 5)).unwrap();
        db.save_round(event_id, &result(1, 8)).unwrap();

        let stored = db.get_round(event_id, 1).unwrap().unwrap();
        assert_eq!(stored.result.summary.new_meetings_count, 8);
        assert!(!stored.committed);
        assert_eq!(db.list_rounds(event_id, false).unwrap().len(), 1);
    }

    #[test]
    fn test_committed_round_is_frozen() {
        let (mut db, event_id) = setup();
        db.save_round(event_id, &result(1, 5)).unwrap();
        db.mark_round_committed(event_id, 1).unwrap();

        assert!(matches!(
            db.save_round(event_id, &result(1, 9)),
            Err(GroupingError::RoundAlreadyCommitted { round: 1, .. })
        ));
        assert!(matches!(
            db.mark_round_committed(event_id, 1),
            Err(GroupingError::RoundAlreadyCommitted { .. })
        ));

        let stored = db.get_round(event_id, 1).unwrap().unwrap();
        assert!(stored.committed);
        assert!(stored.committed_at.is_some());
        assert_eq!(stored.result.summary.new_meetings_count, 5);
    }

    #[test]
    fn test_commit_missing_round() {
        let (mut db, event_id) = setup();
        assert!(matches!(
            db.mark_round_committed(event_id, 4),
            Err(GroupingError::RoundNotFound { round: 4, .. })
        ));
    }

    #[test]
    fn test_round_numbering_queries() {
        let (mut db, event_id) = setup();
        assert_eq!(db.last_committed_round(event_id).unwrap(), None);

        db.save_round(event_id, &result(1, 1)).unwrap();
        db.save_round(event_id, &result(2, 1)).unwrap();
        db.mark_round_committed(event_id, 1).unwrap();

        assert_eq!(db.last_committed_round(event_id).unwrap(), Some(1));
        assert_eq!(db.committed_round_count(event_id).unwrap(), 1);
        assert_eq!(db.list_rounds(event_id, true).unwrap().len(), 1);
        assert_eq!(db.list_rounds(event_id, false).unwrap().len(), 2);
    }

    #[test]
    fn test_deleting_event_drops_rounds() {
        let (mut db, event_id) = setup();
        db.save_round(event_id, &result(1, 1)).unwrap();
        db.delete_event(event_id).unwrap();
        assert!(db.get_round(event_id, 1).unwrap().is_none());
    }
}
