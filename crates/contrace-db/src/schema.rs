//! SQL schema definitions.

/// Complete schema for the Contrace v1 central store.
///
/// `mobile_device` rows are immutable once present; the only mutable column
/// anywhere is `contact.contact_notified`, which transitions 0 -> 1 at most
/// once. Contact rows are append-only and never deduplicated; gathering
/// queries aggregate repeated observations via SUM.
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS mobile_device (
    id INTEGER PRIMARY KEY,
    hash TEXT UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS test_outcome (
    id INTEGER PRIMARY KEY,
    test_hash TEXT UNIQUE NOT NULL,
    test_date TEXT NOT NULL,
    test_result INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS mobile_device_test_outcome (
    id INTEGER PRIMARY KEY,
    mobile_device_id INTEGER NOT NULL REFERENCES mobile_device(id),
    test_outcome_id INTEGER NOT NULL REFERENCES test_outcome(id),
    UNIQUE (mobile_device_id, test_outcome_id)
);

CREATE TABLE IF NOT EXISTS contact (
    id INTEGER PRIMARY KEY,
    contact_date TEXT NOT NULL,
    contact_duration INTEGER NOT NULL,
    person_one_id INTEGER NOT NULL REFERENCES mobile_device(id),
    person_two_id INTEGER NOT NULL REFERENCES mobile_device(id),
    contact_notified INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_contact_date ON contact(contact_date);
CREATE INDEX IF NOT EXISTS idx_contact_exposure ON contact(person_one_id, contact_notified);
"#;
