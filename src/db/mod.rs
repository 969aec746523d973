/// Database module with key-value queries and migrations.
mod kv;
mod migrations;

use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

pub use kv::SqliteStorage;

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(db_path)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
