//! Named-slot persistence contract and its SQLite implementation.
//!
//! # Responsibility
//! - Define the slot read/write interface consumed by the repository.
//! - Keep SQL details for slot storage inside the db boundary.
//!
//! # Invariants
//! - A slot holds at most one payload; writes replace it wholesale.
//! - Payloads are opaque text; serialization lives with the repository.

use crate::db::{DbError, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SlotResult<T> = Result<T, SlotError>;

/// Error surfaced by slot read/write operations.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    /// The backing store rejected the operation (quota, read-only volume,
    /// detached backend). Carries a human-readable reason.
    Unavailable(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "slot store unavailable: {reason}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value slots, one serialized collection per name.
///
/// Object-safe so tests can substitute in-memory or failure-injecting
/// implementations.
pub trait SlotStore {
    /// Reads a slot payload; `None` when the slot was never written.
    fn read_slot(&self, name: &str) -> SlotResult<Option<String>>;
    /// Writes a slot payload, replacing any previous value.
    fn write_slot(&self, name: &str, payload: &str) -> SlotResult<()>;
}

/// SQLite-backed slot store over the `slots` table.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    /// Wraps a connection prepared by [`crate::db::open_store`].
    ///
    /// Fails when the connection has not been migrated to the current
    /// schema, so data access never races schema setup.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let latest = super::migrations::latest_version();
        if version != latest {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: version,
                latest_supported: latest,
            });
        }
        Ok(Self { conn })
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn read_slot(&self, name: &str) -> SlotResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1;",
                [name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&self, name: &str, payload: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (name, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT (name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![name, payload],
        )?;
        Ok(())
    }
}
