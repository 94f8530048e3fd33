//! SQLite-based storage for care events.
//!
//! Holds the event list and the one generative behavior in the system:
//! completing a repeating event inserts its follow-up occurrence in the
//! same transaction.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use uuid::Uuid;

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::event::CareEvent;
use crate::recurrence::next_occurrence;

/// Result of marking an event done.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionOutcome {
    pub completed: CareEvent,
    /// The spawned next occurrence, if the event repeats.
    pub follow_up: Option<CareEvent>,
}

fn parse_column<T: FromStr>(idx: usize, value: &str) -> Result<T, rusqlite::Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_date_column(idx: usize, value: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_done_at_column(
    idx: usize,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
                })
        })
        .transpose()
}

/// Build a CareEvent from a database row.
fn row_to_event(row: &rusqlite::Row) -> Result<CareEvent, rusqlite::Error> {
    let pet_str: String = row.get(1)?;
    let type_str: String = row.get(2)?;
    let date_str: String = row.get(3)?;
    let rule_str: String = row.get(4)?;
    let done_at_str: Option<String> = row.get(6)?;

    Ok(CareEvent {
        id: row.get(0)?,
        pet: parse_column(1, &pet_str)?,
        event_type: parse_column(2, &type_str)?,
        date: parse_date_column(3, &date_str)?,
        repeat: parse_column(4, &rule_str)?,
        note: row.get(5)?,
        done_at: parse_done_at_column(6, done_at_str)?,
    })
}

fn fetch_event(conn: &Connection, id: &str) -> Result<Option<CareEvent>, rusqlite::Error> {
    conn.query_row(
        "SELECT id, pet, event_type, date, repeat_rule, note, done_at
         FROM events WHERE id = ?1",
        params![id],
        row_to_event,
    )
    .optional()
}

fn insert_event(conn: &Connection, event: &CareEvent) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO events (id, pet, event_type, date, repeat_rule, note, done_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.id,
            event.pet.code(),
            event.event_type.code(),
            event.date.format("%Y-%m-%d").to_string(),
            event.repeat.code(),
            event.note,
            event.done_at.map(|t| t.to_rfc3339()),
        ],
    )?;
    Ok(())
}

/// SQLite database for care event storage.
pub struct EventDb {
    conn: Connection,
}

impl EventDb {
    /// Open the database at `~/.config/pawcal/pawcal.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("pawcal.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|e| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS events (
                    id          TEXT PRIMARY KEY,
                    pet         TEXT NOT NULL,
                    event_type  TEXT NOT NULL,
                    date        TEXT NOT NULL,
                    repeat_rule TEXT NOT NULL DEFAULT 'none',
                    note        TEXT,
                    done_at     TEXT
                );

                CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
                CREATE INDEX IF NOT EXISTS idx_events_done_at ON events(done_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Insert a new event.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert(&self, event: &CareEvent) -> Result<(), DatabaseError> {
        insert_event(&self.conn, event)?;
        Ok(())
    }

    /// Overwrite an existing event.
    ///
    /// # Errors
    /// Returns `EventNotFound` if no event has the given id.
    pub fn update(&self, event: &CareEvent) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE events
             SET pet = ?2, event_type = ?3, date = ?4, repeat_rule = ?5, note = ?6, done_at = ?7
             WHERE id = ?1",
            params![
                event.id,
                event.pet.code(),
                event.event_type.code(),
                event.date.format("%Y-%m-%d").to_string(),
                event.repeat.code(),
                event.note,
                event.done_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::EventNotFound(event.id.clone()));
        }
        Ok(())
    }

    /// Look up one event.
    pub fn get(&self, id: &str) -> Result<Option<CareEvent>, DatabaseError> {
        Ok(fetch_event(&self.conn, id)?)
    }

    /// All events, ordered by due date.
    pub fn list(&self) -> Result<Vec<CareEvent>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, pet, event_type, date, repeat_rule, note, done_at
             FROM events ORDER BY date, id",
        )?;
        let rows = stmt.query_map([], row_to_event)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    /// Delete an event.
    ///
    /// # Errors
    /// Returns `EventNotFound` if no event has the given id.
    pub fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::EventNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Mark an event done and spawn its next occurrence.
    ///
    /// Sets `done_at` and, for repeating events, inserts exactly one
    /// follow-up with the same pet/type/rule/note, the next date and
    /// `done_at` unset; both writes land in one transaction. Completing an
    /// already-done event changes nothing and spawns nothing, so the
    /// follow-up fires at most once per completion.
    ///
    /// # Errors
    /// Returns `EventNotFound` if no event has the given id.
    pub fn complete(&mut self, id: &str) -> Result<CompletionOutcome, DatabaseError> {
        let tx = self.conn.transaction()?;

        let mut event = match fetch_event(&tx, id)? {
            Some(event) => event,
            None => return Err(DatabaseError::EventNotFound(id.to_string())),
        };
        if event.is_done() {
            return Ok(CompletionOutcome {
                completed: event,
                follow_up: None,
            });
        }

        let now = Utc::now();
        tx.execute(
            "UPDATE events SET done_at = ?2 WHERE id = ?1",
            params![id, now.to_rfc3339()],
        )?;
        event.done_at = Some(now);

        let follow_up = next_occurrence(event.date, event.repeat).map(|next_date| CareEvent {
            id: Uuid::new_v4().to_string(),
            date: next_date,
            done_at: None,
            ..event.clone()
        });
        if let Some(ref next) = follow_up {
            insert_event(&tx, next)?;
        }

        tx.commit()?;
        Ok(CompletionOutcome {
            completed: event,
            follow_up,
        })
    }

    /// Clear the done mark. Never retracts a spawned follow-up.
    ///
    /// # Errors
    /// Returns `EventNotFound` if no event has the given id.
    pub fn undo(&self, id: &str) -> Result<CareEvent, DatabaseError> {
        let mut event = match fetch_event(&self.conn, id)? {
            Some(event) => event,
            None => return Err(DatabaseError::EventNotFound(id.to_string())),
        };
        self.conn.execute(
            "UPDATE events SET done_at = NULL WHERE id = ?1",
            params![id],
        )?;
        event.done_at = None;
        Ok(event)
    }

    /// Move an event to a new due date.
    ///
    /// # Errors
    /// Returns `EventNotFound` if no event has the given id.
    pub fn reschedule(&self, id: &str, date: NaiveDate) -> Result<CareEvent, DatabaseError> {
        let mut event = match fetch_event(&self.conn, id)? {
            Some(event) => event,
            None => return Err(DatabaseError::EventNotFound(id.to_string())),
        };
        self.conn.execute(
            "UPDATE events SET date = ?2 WHERE id = ?1",
            params![id, date.format("%Y-%m-%d").to_string()],
        )?;
        event.date = date;
        Ok(event)
    }
}
