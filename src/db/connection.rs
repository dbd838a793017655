use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

use crate::errors::AppResult;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Owns the single SQLite connection used for the lifetime of a job.
///
/// The handle is opened once in `main`, passed by reference into every
/// operation, and the connection is closed when the handle is dropped.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        let db = Self { conn };
        init_db(&db)?;
        debug!(path = %path.as_ref().display(), "database opened");
        Ok(db)
    }

    /// Fresh in-memory database with the production schema.
    #[cfg(test)]
    pub fn open_in_memory() -> AppResult<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        init_db(&db)?;
        Ok(db)
    }

    /// Provides the connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        f(&self.conn)
    }

    /// Provides a mutable connection to the closure, needed to open transactions.
    pub fn with_conn_mut<F, T>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        f(&mut self.conn)
    }
}

/// Apply the embedded schema. Every statement is `IF NOT EXISTS`, so this is
/// safe on every open.
pub fn init_db(db: &Database) -> AppResult<()> {
    db.with_conn(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    })
}
