use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, info};

use huddle_types::models::Message;

use crate::MessageLog;
use crate::error::{Result, StoreError};
use crate::migrations;

/// Message log in SQLite, keyed by insertion sequence.
///
/// Appends are a single INSERT instead of a full-file rewrite.
pub struct SqliteLog {
    conn: Mutex<Connection>,
}

impl SqliteLog {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrations::run(&conn)?;

        info!("Message database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl MessageLog for SqliteLog {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn append(&mut self, message: Message) -> Result<()> {
        let conn = self.conn.get_mut().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO messages (id, user_id, user_name, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                message.id,
                message.user_id,
                message.user_name,
                message.content,
                message.created_at
            ],
        )?;
        debug!("Appended message {}", message.id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Message>> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, user_name, content, created_at FROM messages ORDER BY seq",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Message {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    user_name: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn message(id: &str, content: &str) -> Message {
        Message {
            id: id.into(),
            user_id: "u1".into(),
            user_name: "Alice".into(),
            content: content.into(),
            created_at: "2024-05-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        }
    }

    #[test]
    fn lists_in_insertion_order() {
        let mut log = SqliteLog::open_in_memory().unwrap();
        // IDs deliberately out of lexical order
        for id in ["zz", "aa", "mm"] {
            log.append(message(id, "x")).unwrap();
        }

        let ids: Vec<String> = log.list().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["zz", "aa", "mm"]);
    }

    #[test]
    fn round_trips_fields() {
        let mut log = SqliteLog::open_in_memory().unwrap();
        let msg = message("m1", "hello <b>");
        log.append(msg.clone()).unwrap();

        assert_eq!(log.list().unwrap(), vec![msg]);
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.db");

        let mut log = SqliteLog::open(&path).unwrap();
        log.append(message("m1", "one")).unwrap();
        log.append(message("m2", "two")).unwrap();
        drop(log);

        let reopened = SqliteLog::open(&path).unwrap();
        assert_eq!(reopened.list().unwrap().len(), 2);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut log = SqliteLog::open_in_memory().unwrap();
        log.append(message("m1", "one")).unwrap();
        assert!(matches!(
            log.append(message("m1", "again")),
            Err(StoreError::Sqlite(_))
        ));
    }
}
