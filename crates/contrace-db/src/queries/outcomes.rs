//! Test-outcome query functions.

use chrono::NaiveDate;
use contrace_types::{dates, DeviceId};
use rusqlite::Connection;

use crate::{DbError, Result};

/// Record a test collection event. The test hash is globally unique; a
/// duplicate insert is silently ignored and the first recording wins.
pub fn insert_ignore(
    conn: &Connection,
    test_hash: &str,
    date: NaiveDate,
    result: bool,
) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO test_outcome (test_hash, test_date, test_result)
         VALUES (?1, ?2, ?3)",
        rusqlite::params![test_hash, dates::store_format(date), result],
    )?;
    Ok(())
}

/// Link a device to a test it self-reported. A duplicate link is silently
/// ignored; a test hash with no recorded outcome is an error so the caller's
/// transaction rolls back and the device can retry after the outcome exists.
pub fn link_device(conn: &Connection, device_id: DeviceId, test_hash: &str) -> Result<()> {
    let outcome_id: i64 = conn
        .query_row(
            "SELECT id FROM test_outcome WHERE test_hash = ?1",
            [test_hash],
            |row| row.get(0),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DbError::NotFound(format!("test outcome {test_hash}"))
            }
            other => DbError::Sqlite(other),
        })?;

    conn.execute(
        "INSERT OR IGNORE INTO mobile_device_test_outcome (mobile_device_id, test_outcome_id)
         VALUES (?1, ?2)",
        rusqlite::params![device_id, outcome_id],
    )?;
    Ok(())
}
