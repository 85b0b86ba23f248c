//! The synchronization payload exchanged between a device and the authority.
//!
//! A device's local ledger serializes to exactly this structure: the positive
//! test identifiers the device self-reported since its last sync, and the
//! contacts it observed. Dates are day offsets (see [`crate::dates`]); the
//! wire format is JSON and round-trips losslessly.

use serde::{Deserialize, Serialize};

/// One observed proximity contact, as recorded by the reporting device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Identity hex of the contacted device.
    pub individual: String,
    /// Day offset of the contact.
    pub date: u32,
    /// Contact duration in minutes.
    pub duration: u32,
}

/// The full ledger payload submitted at synchronization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPayload {
    /// Positive test identifiers self-reported since the last sync.
    #[serde(default)]
    pub test_hashes: Vec<String>,
    /// Contacts observed since the last sync.
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
}

impl LedgerPayload {
    /// True when there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.test_hashes.is_empty() && self.contacts.is_empty()
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the JSON wire form.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
