//! The device-local ledger file.
//!
//! One JSON file per device, named by the device identity. Every append
//! rewrites the file before the call returns; the file is the durability
//! backstop between syncs. After a successful sync the file is deleted and
//! recreated empty; it is never partially cleared.

use std::path::PathBuf;

use contrace_types::payload::{ContactRecord, LedgerPayload};

use crate::DeviceError;

/// A device's local, pre-sync record of contacts and self-reported tests.
pub struct Ledger {
    path: PathBuf,
    payload: LedgerPayload,
}

impl Ledger {
    /// Open the ledger file, creating it empty if absent.
    pub fn open(path: PathBuf) -> Result<Self, DeviceError> {
        let payload = if path.exists() {
            LedgerPayload::from_json(&std::fs::read_to_string(&path)?)?
        } else {
            LedgerPayload::default()
        };
        let ledger = Self { path, payload };
        ledger.persist()?;
        Ok(ledger)
    }

    /// Current contents.
    pub fn payload(&self) -> &LedgerPayload {
        &self.payload
    }

    /// Append one contact observation and persist.
    pub fn record_contact(&mut self, record: ContactRecord) -> Result<(), DeviceError> {
        self.payload.contacts.push(record);
        self.persist()
    }

    /// Append a self-reported positive test and persist. Returns `false` if
    /// the hash is already in this ledger.
    pub fn record_test(&mut self, test_hash: &str) -> Result<bool, DeviceError> {
        if self.payload.test_hashes.iter().any(|h| h == test_hash) {
            return Ok(false);
        }
        self.payload.test_hashes.push(test_hash.to_string());
        self.persist()?;
        Ok(true)
    }

    /// Delete the ledger file and recreate it empty.
    pub fn reset(&mut self) -> Result<(), DeviceError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        self.payload = LedgerPayload::default();
        self.persist()
    }

    fn persist(&self) -> Result<(), DeviceError> {
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.payload)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(individual: &str) -> ContactRecord {
        ContactRecord {
            individual: individual.into(),
            date: 10,
            duration: 30,
        }
    }

    #[test]
    fn test_open_creates_empty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ledger.json");
        let ledger = Ledger::open(path.clone()).expect("open");
        assert!(path.exists());
        assert!(ledger.payload().is_empty());
    }

    #[test]
    fn test_appends_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ledger.json");

        let mut ledger = Ledger::open(path.clone()).expect("open");
        ledger.record_contact(contact("dev-b")).expect("contact");
        ledger.record_test("t-1").expect("test");
        drop(ledger);

        // A fresh instance sees everything the first one persisted.
        let reopened = Ledger::open(path).expect("reopen");
        assert_eq!(reopened.payload().contacts.len(), 1);
        assert_eq!(reopened.payload().test_hashes, vec!["t-1".to_string()]);
    }

    #[test]
    fn test_duplicate_test_hash_refused_locally() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ledger = Ledger::open(dir.path().join("ledger.json")).expect("open");
        assert!(ledger.record_test("t-1").expect("first"));
        assert!(!ledger.record_test("t-1").expect("duplicate"));
        assert_eq!(ledger.payload().test_hashes.len(), 1);
    }

    #[test]
    fn test_reset_replaces_with_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ledger.json");
        let mut ledger = Ledger::open(path.clone()).expect("open");
        ledger.record_contact(contact("dev-b")).expect("contact");

        ledger.reset().expect("reset");
        assert!(ledger.payload().is_empty());

        let reopened = Ledger::open(path).expect("reopen");
        assert!(reopened.payload().is_empty());
    }

    #[test]
    fn test_contact_order_preserved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ledger = Ledger::open(dir.path().join("ledger.json")).expect("open");
        ledger.record_contact(contact("dev-b")).expect("contact");
        ledger.record_contact(contact("dev-c")).expect("contact");
        let individuals: Vec<_> = ledger
            .payload()
            .contacts
            .iter()
            .map(|c| c.individual.as_str())
            .collect();
        assert_eq!(individuals, vec!["dev-b", "dev-c"]);
    }
}
