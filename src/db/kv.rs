/// Key-value queries backing palette persistence.
use chrono::Local;
use rusqlite::Connection;

use crate::storage::{PaletteStorage, StorageError};

pub fn query_value(key: &str, conn: &Connection) -> Result<Option<String>, rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
    let mut rows = stmt.query([key])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

pub fn upsert_value(key: &str, value: &str, conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// SQLite-backed palette storage.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl PaletteStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(query_value(key, &self.conn)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        upsert_value(key, value, &self.conn)?;
        Ok(())
    }
}
