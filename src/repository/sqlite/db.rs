//! Core database connection management, grounded on the teacher's
//! `db::db::Db` (connection resolution + migration-on-open).

use crate::config::EngineSettings;
use crate::repository::sqlite::migrations;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// A single SQLite connection guarded by a mutex. `rusqlite::Connection`
/// is `!Sync`; the core's services call into the repository from whatever
/// thread `tokio::task::spawn_blocking` hands them, so every access goes
/// through the lock rather than assuming single-threaded use like the
/// teacher's desktop-app `Db`.
pub struct SqliteDb {
    pub(crate) conn: Mutex<Connection>,
}

impl SqliteDb {
    /// Opens (or creates) the database at `settings.database_path`,
    /// enabling foreign keys and applying all pending migrations.
    pub fn open(settings: &EngineSettings) -> Result<Self> {
        Self::open_path(&settings.database_path)
    }

    pub fn open_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = Connection::open(path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations::init_with_migrations(&mut conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// An in-memory database, migrated, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations::init_with_migrations(&mut conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}
