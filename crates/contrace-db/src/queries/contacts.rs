//! Contact query functions.
//!
//! Contact rows are append-only. Each row is one directed observation made by
//! `person_one` that `person_two` was nearby; repeated observations between
//! the same pair on the same date stay separate rows until gathering queries
//! aggregate them.

use chrono::NaiveDate;
use contrace_types::{dates, ContactId, DeviceId, EXPOSURE_WINDOW_DAYS};
use rusqlite::Connection;

use crate::Result;

/// Append one contact observation.
pub fn insert(
    conn: &Connection,
    person_one: DeviceId,
    person_two: DeviceId,
    date: NaiveDate,
    duration: u32,
) -> Result<()> {
    conn.execute(
        "INSERT INTO contact (contact_date, contact_duration, person_one_id, person_two_id, contact_notified)
         VALUES (?1, ?2, ?3, ?4, 0)",
        rusqlite::params![dates::store_format(date), duration, person_one, person_two],
    )?;
    Ok(())
}

/// Contact rows recorded by `initiator` with a device linked to a positive
/// test whose collection date lies within the exposure window of the contact
/// date, and which have not yet been used to notify the initiator.
pub fn unnotified_exposures(conn: &Connection, initiator: DeviceId) -> Result<Vec<ContactId>> {
    let mut stmt = conn.prepare(
        "SELECT c.id
         FROM contact c
         JOIN mobile_device_test_outcome l ON l.mobile_device_id = c.person_two_id
         JOIN test_outcome t ON t.id = l.test_outcome_id
         WHERE c.person_one_id = ?1
           AND t.test_result = 1
           AND c.contact_notified = 0
           AND ABS(JULIANDAY(c.contact_date) - JULIANDAY(t.test_date)) <= ?2
         ORDER BY c.id",
    )?;

    let ids = stmt
        .query_map(
            rusqlite::params![initiator, EXPOSURE_WINDOW_DAYS],
            |row| row.get(0),
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(ids)
}

/// Mark contact rows as having justified an at-risk notification. One-way:
/// nothing ever clears the flag.
pub fn mark_notified(conn: &Connection, ids: &[ContactId]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("UPDATE contact SET contact_notified = 1 WHERE id IN ({placeholders})");
    conn.execute(&sql, rusqlite::params_from_iter(ids.iter()))?;
    Ok(())
}

/// Directed pairs whose summed contact duration on `date` reaches `min_time`
/// minutes, ordered by (person_one, person_two).
pub fn qualifying_pairs(
    conn: &Connection,
    date: NaiveDate,
    min_time: u32,
) -> Result<Vec<(DeviceId, DeviceId)>> {
    let mut stmt = conn.prepare(
        "SELECT person_one_id, person_two_id
         FROM contact
         WHERE contact_date = ?1
         GROUP BY person_one_id, person_two_id
         HAVING SUM(contact_duration) >= ?2
         ORDER BY person_one_id, person_two_id",
    )?;

    let pairs = stmt
        .query_map(
            rusqlite::params![dates::store_format(date), min_time],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(pairs)
}
