//! Event CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{json_at, optional_json_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Event, GenderConstraint, GroupSizing},
};

const INSERT_EVENT_SQL: &str = "INSERT INTO events (name, group_sizing, gender_constraints, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const EVENT_COLUMNS: &str = "id, name, group_sizing, gender_constraints, created_at, updated_at";
const CHECK_EVENT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM events WHERE id = ?1)";
const UPDATE_EVENT_SQL: &str = "UPDATE events SET name = ?1, group_sizing = ?2, gender_constraints = ?3, updated_at = ?4 WHERE id = ?5";
const DELETE_EVENT_ROUNDS_SQL: &str = "DELETE FROM rounds WHERE event_id = ?1";
const DELETE_EVENT_MEETINGS_SQL: &str = "DELETE FROM participant_meetings WHERE event_id = ?1";
const DELETE_EVENT_GROUPS_SQL: &str = "DELETE FROM participant_groups WHERE event_id = ?1";
const DELETE_EVENT_PARTICIPANTS_SQL: &str = "DELETE FROM participants WHERE event_id = ?1";
const DELETE_EVENT_SQL: &str = "DELETE FROM events WHERE id = ?1";

fn constraints_json(constraints: Option<&[GenderConstraint]>) -> Result<Option<String>> {
    Ok(constraints.map(serde_json::to_string).transpose()?)
}

impl super::Database {
    fn build_event_from_row(row: &rusqlite::Row) -> rusqlite::Result<Event> {
        Ok(Event {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            group_sizing: json_at(row, 2)?,
            gender_constraints: optional_json_at(row, 3)?,
            created_at: timestamp_at(row, 4)?,
            updated_at: timestamp_at(row, 5)?,
        })
    }

    /// Creates a new event with its default round settings.
    pub fn create_event(
        &mut self,
        name: &str,
        group_sizing: &GroupSizing,
        gender_constraints: Option<&[GenderConstraint]>,
    ) -> Result<Event> {
        let sizing_json = serde_json::to_string(group_sizing)?;
        let constraints = constraints_json(gender_constraints)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_EVENT_SQL,
            params![name, &sizing_json, constraints.as_deref(), &now_str, &now_str],
        )
        .db_context("Failed to insert event")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Event {
            id,
            name: name.to_string(),
            group_sizing: group_sizing.clone(),
            gender_constraints: gender_constraints.map(<[GenderConstraint]>::to_vec),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves an event by its ID.
    pub fn get_event(&self, id: u64) -> Result<Option<Event>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], Self::build_event_from_row)
            .optional()
            .db_context("Failed to query event")
    }

    /// Lists all events, oldest first.
    pub fn list_events(&self) -> Result<Vec<Event>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id"))
            .db_context("Failed to prepare query")?;

        let events = stmt
            .query_map([], Self::build_event_from_row)
            .db_context("Failed to query events")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read event row")?;
        Ok(events)
    }

    /// Whether an event with the given ID exists.
    pub fn event_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_EVENT_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check event existence")
    }

    /// Overwrites an event's name and round settings.
    ///
    /// Returns the stored event, or `None` if it does not exist.
    pub fn update_event(
        &mut self,
        id: u64,
        name: &str,
        group_sizing: &GroupSizing,
        gender_constraints: Option<&[GenderConstraint]>,
    ) -> Result<Option<Event>> {
        let sizing_json = serde_json::to_string(group_sizing)?;
        let constraints = constraints_json(gender_constraints)?;
        let now_str = Timestamp::now().to_string();

        let changed = self
            .connection
            .execute(
                UPDATE_EVENT_SQL,
                params![name, &sizing_json, constraints.as_deref(), &now_str, id as i64],
            )
            .db_context("Failed to update event")?;

        if changed == 0 {
            return Ok(None);
        }
        self.get_event(id)
    }

    /// Deletes an event together with its roster, history and rounds.
    ///
    /// Returns false if the event did not exist.
    pub fn delete_event(&mut self, id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for sql in [
            DELETE_EVENT_ROUNDS_SQL,
            DELETE_EVENT_MEETINGS_SQL,
            DELETE_EVENT_GROUPS_SQL,
            DELETE_EVENT_PARTICIPANTS_SQL,
        ] {
            tx.execute(sql, params![id as i64])
                .db_context("Failed to delete event data")?;
        }

        let deleted = tx
            .execute(DELETE_EVENT_SQL, params![id as i64])
            .db_context("Failed to delete event")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;
    use super::*;

    #[test]
    fn test_create_and_get_event() {
        let mut db = Database::in_memory().unwrap();
        let constraints = [GenderConstraint {
            male_count: 2,
            female_count: 2,
        }];
        let created = db
            .create_event("Mixer", &GroupSizing::Uniform(4), Some(&constraints))
            .unwrap();

        let loaded = db.get_event(created.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Mixer");
        assert_eq!(loaded.group_sizing, GroupSizing::Uniform(4));
        assert_eq!(loaded.gender_constraints, Some(constraints.to_vec()));
        assert!(db.event_exists(created.id).unwrap());
    }

    #[test]
    fn test_missing_event_is_none() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_event(99).unwrap().is_none());
        assert!(!db.event_exists(99).unwrap());
    }

    #[test]
    fn test_update_event_settings() {
        let mut db = Database::in_memory().unwrap();
        let event = db
            .create_event("Mixer", &GroupSizing::Uniform(4), None)
            .unwrap();

        let updated = db
            .update_event(event.id, "Renamed", &GroupSizing::Manual(vec![3, 5]), None)
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.group_sizing, GroupSizing::Manual(vec![3, 5]));
        assert!(updated.updated_at >= event.updated_at);

        assert!(db
            .update_event(42, "x", &GroupSizing::Uniform(2), None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list_and_delete_events() {
        let mut db = Database::in_memory().unwrap();
        let first = db.create_event("A", &GroupSizing::Uniform(4), None).unwrap();
        db.create_event("B", &GroupSizing::Uniform(4), None).unwrap();

        assert_eq!(db.list_events().unwrap().len(), 2);
        assert!(db.delete_event(first.id).unwrap());
        assert!(!db.delete_event(first.id).unwrap());

        let remaining = db.list_events().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "B");
    }
}
