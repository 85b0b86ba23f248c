//! # contrace-authority
//!
//! The central health authority. Owns the persistent store and exposes the
//! three centralized operations: ingest a device's synchronized ledger,
//! record a test outcome, and count gatherings for a date.
//!
//! The authority is an explicit constructed service, shared by reference
//! between callers. It holds only configuration; every write-bearing
//! operation opens its own store connection and transaction and leans on
//! SQLite's isolation for concurrent callers.

pub mod config;
pub mod error;
pub mod gatherings;

use std::path::PathBuf;

use chrono::NaiveDate;
use contrace_db::queries::{contacts, devices, outcomes};
use contrace_types::{dates, payload::LedgerPayload};
use rusqlite::Connection;

pub use crate::config::{ConfigError, StoreConfig};
pub use crate::error::{AuthorityError, Result};

/// The central contact-tracing service.
pub struct HealthAuthority {
    db_path: PathBuf,
}

impl HealthAuthority {
    /// Validate the store configuration, bootstrap the schema, and return the
    /// service. The bootstrap connection is dropped immediately; operations
    /// open their own.
    pub fn connect(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let db_path = config.db_path();
        contrace_db::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "health authority connected");
        Ok(Self { db_path })
    }

    fn open_store(&self) -> Result<Connection> {
        Ok(contrace_db::open(&self.db_path)?)
    }

    /// Ingest a device's synchronized ledger.
    ///
    /// Persists the payload's devices, test links, and contact observations
    /// in one transaction, then reports whether the initiator has an
    /// unnotified qualifying exposure, marking those contact rows notified
    /// in the same transaction so each exposure is reported exactly once.
    ///
    /// A blank payload is the valid "nothing to report" case and returns
    /// `false` without touching the store.
    pub fn ingest_ledger(&self, initiator: &str, payload: &str) -> Result<bool> {
        if initiator.trim().is_empty() {
            return Err(AuthorityError::InvalidArgument(
                "initiator hash must not be empty".into(),
            ));
        }
        if payload.trim().is_empty() {
            return Ok(false);
        }

        let parsed = LedgerPayload::from_json(payload)?;

        let mut conn = self.open_store()?;
        let tx = conn.transaction()?;

        devices::insert_ignore(&tx, initiator)?;
        for contact in &parsed.contacts {
            devices::insert_ignore(&tx, &contact.individual)?;
        }
        let initiator_id = devices::id_for_hash(&tx, initiator)?;

        for test_hash in &parsed.test_hashes {
            outcomes::link_device(&tx, initiator_id, test_hash)?;
        }

        for contact in &parsed.contacts {
            let date = offset_date(contact.date)?;
            let contacted_id = devices::id_for_hash(&tx, &contact.individual)?;
            contacts::insert(&tx, initiator_id, contacted_id, date, contact.duration)?;
        }

        let exposed = contacts::unnotified_exposures(&tx, initiator_id)?;
        contacts::mark_notified(&tx, &exposed)?;

        tx.commit()?;

        tracing::debug!(
            initiator,
            contacts = parsed.contacts.len(),
            tests = parsed.test_hashes.len(),
            exposures = exposed.len(),
            "ledger ingested"
        );
        Ok(!exposed.is_empty())
    }

    /// Record that a test identified by `test_hash` had a collection taken on
    /// day `date` with the given result. The first recording wins; repeats
    /// are silently ignored.
    pub fn record_test_result(&self, test_hash: &str, date: u32, result: bool) -> Result<bool> {
        if test_hash.trim().is_empty() {
            return Err(AuthorityError::InvalidArgument(
                "test hash must not be empty".into(),
            ));
        }
        let test_date = offset_date(date)?;

        let conn = self.open_store()?;
        outcomes::insert_ignore(&conn, test_hash, test_date, result)?;
        Ok(true)
    }

    /// Count gatherings on `date`: groups of at least `min_size` individuals
    /// transitively connected by pairs with `min_time` minutes of contact,
    /// whose observed-edge density reaches `density`.
    pub fn find_gatherings(
        &self,
        date: u32,
        min_size: u32,
        min_time: u32,
        density: f64,
    ) -> Result<u32> {
        if min_size < 2 {
            return Err(AuthorityError::InvalidArgument(format!(
                "min_size must be at least 2, got {min_size}"
            )));
        }
        if min_time < 1 {
            return Err(AuthorityError::InvalidArgument(format!(
                "min_time must be at least 1, got {min_time}"
            )));
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(AuthorityError::InvalidArgument(format!(
                "density must be within [0, 1], got {density}"
            )));
        }
        let gathering_date = offset_date(date)?;

        let conn = self.open_store()?;
        let pairs = contacts::qualifying_pairs(&conn, gathering_date, min_time)?;
        Ok(gatherings::count_gatherings(&pairs, min_size, density))
    }
}

fn offset_date(offset: u32) -> Result<NaiveDate> {
    dates::date_from_offset(offset).ok_or_else(|| {
        AuthorityError::InvalidArgument(format!("day offset {offset} is out of range"))
    })
}
