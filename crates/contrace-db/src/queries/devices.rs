//! Device query functions.
//!
//! A device row is created implicitly the first time its hash appears in any
//! synchronized payload and is immutable afterwards.

use contrace_types::DeviceId;
use rusqlite::Connection;

use crate::{DbError, Result};

/// Insert a device hash, ignoring it if already present.
pub fn insert_ignore(conn: &Connection, hash: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO mobile_device (hash) VALUES (?1)",
        [hash],
    )?;
    Ok(())
}

/// Resolve a device hash to its row id.
pub fn id_for_hash(conn: &Connection, hash: &str) -> Result<DeviceId> {
    conn.query_row(
        "SELECT id FROM mobile_device WHERE hash = ?1",
        [hash],
        |row| row.get(0),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("device {hash}")),
        other => DbError::Sqlite(other),
    })
}
