//! # contrace-device
//!
//! The mobile device side of the protocol: a local, file-backed ledger of
//! observed contacts and self-reported positive tests, plus the client that
//! periodically synchronizes that ledger with the health authority.
//!
//! A device instance is single-threaded; the ledger file has plain
//! last-write-wins semantics and callers must not share one instance across
//! threads.

pub mod config;
pub mod ledger;

use std::sync::Arc;

use contrace_authority::HealthAuthority;
use contrace_crypto::identity;
use contrace_types::payload::ContactRecord;

pub use crate::config::{ConfigError, DeviceConfig};
pub use crate::ledger::Ledger;

/// Device error types.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// An argument violated its contract; nothing was recorded.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The authority rejected or failed the synchronization; the local
    /// ledger is untouched.
    #[error(transparent)]
    Authority(#[from] contrace_authority::AuthorityError),
}

pub type Result<T> = std::result::Result<T, DeviceError>;

/// One mobile device: identity, local ledger, and a handle to the authority.
pub struct MobileDevice {
    identity_hex: String,
    ledger: Ledger,
    authority: Arc<HealthAuthority>,
}

impl MobileDevice {
    /// Build a device from validated configuration. The identity is computed
    /// once and cached; the ledger file is created empty if absent.
    pub fn new(config: DeviceConfig, authority: Arc<HealthAuthority>) -> Result<Self> {
        config.validate()?;

        let identity_hex = identity::device_identity_hex(&config.address, &config.device_name);
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)?;
        let ledger = Ledger::open(data_dir.join(format!("{identity_hex}.json")))?;

        tracing::debug!(identity = %identity_hex, "mobile device ready");
        Ok(Self {
            identity_hex,
            ledger,
            authority,
        })
    }

    /// The device's stable identity in hex form.
    pub fn identity_hex(&self) -> &str {
        &self.identity_hex
    }

    /// Record that another device was nearby on day `date` for `duration`
    /// minutes. Returns `false` only for a contact with itself.
    pub fn record_contact(&mut self, individual: &str, date: u32, duration: u32) -> Result<bool> {
        if individual.trim().is_empty() {
            return Err(DeviceError::InvalidArgument(
                "individual hash must not be empty".into(),
            ));
        }
        if duration == 0 {
            return Err(DeviceError::InvalidArgument(
                "duration must be positive".into(),
            ));
        }
        if individual == self.identity_hex {
            return Ok(false);
        }

        self.ledger.record_contact(ContactRecord {
            individual: individual.to_string(),
            date,
            duration,
        })?;
        Ok(true)
    }

    /// Record a self-reported positive test. Returns `false` only when the
    /// hash is already in the local ledger.
    pub fn positive_test(&mut self, test_hash: &str) -> Result<bool> {
        if test_hash.trim().is_empty() {
            return Err(DeviceError::InvalidArgument(
                "test hash must not be empty".into(),
            ));
        }
        self.ledger.record_test(test_hash)
    }

    /// Submit the whole ledger to the authority; on success replace it with
    /// an empty one and forward the authority's at-risk verdict. On any
    /// error the ledger is preserved for retry.
    pub fn synchronize(&mut self) -> Result<bool> {
        let payload = self.ledger.payload().to_json()?;
        let at_risk = self
            .authority
            .ingest_ledger(&self.identity_hex, &payload)?;
        self.ledger.reset()?;

        tracing::debug!(identity = %self.identity_hex, at_risk, "ledger synchronized");
        Ok(at_risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrace_authority::StoreConfig;

    fn test_config(dir: &tempfile::TempDir, name: &str) -> DeviceConfig {
        DeviceConfig {
            address: "10.0.0.7:9000".into(),
            device_name: name.into(),
            data_dir: dir.path().display().to_string(),
        }
    }

    fn test_authority(dir: &tempfile::TempDir) -> Arc<HealthAuthority> {
        let config = StoreConfig::new(dir.path().join("central.db").display().to_string());
        Arc::new(HealthAuthority::connect(config).expect("connect"))
    }

    #[test]
    fn test_identity_stable_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let authority = test_authority(&dir);

        let first = MobileDevice::new(test_config(&dir, "handset"), Arc::clone(&authority))
            .expect("device");
        let second =
            MobileDevice::new(test_config(&dir, "handset"), authority).expect("device again");
        assert_eq!(first.identity_hex(), second.identity_hex());
        assert_eq!(first.identity_hex().len(), 64);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let authority = test_authority(&dir);
        let mut config = test_config(&dir, "handset");
        config.address = String::new();

        let result = MobileDevice::new(config, authority);
        assert!(matches!(result, Err(DeviceError::Config(_))));
    }

    #[test]
    fn test_record_contact_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let authority = test_authority(&dir);
        let mut device =
            MobileDevice::new(test_config(&dir, "handset"), authority).expect("device");

        assert!(matches!(
            device.record_contact(" ", 10, 30),
            Err(DeviceError::InvalidArgument(_))
        ));
        assert!(matches!(
            device.record_contact("dev-b", 10, 0),
            Err(DeviceError::InvalidArgument(_))
        ));
        assert!(device.record_contact("dev-b", 10, 30).expect("record"));
    }

    #[test]
    fn test_self_contact_refused_softly() {
        let dir = tempfile::tempdir().expect("tempdir");
        let authority = test_authority(&dir);
        let mut device =
            MobileDevice::new(test_config(&dir, "handset"), authority).expect("device");

        let own = device.identity_hex().to_string();
        assert!(!device.record_contact(&own, 10, 30).expect("self contact"));
        assert!(device.ledger.payload().is_empty());
    }

    #[test]
    fn test_positive_test_local_duplicate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let authority = test_authority(&dir);
        let mut device =
            MobileDevice::new(test_config(&dir, "handset"), authority).expect("device");

        assert!(device.positive_test("t-1").expect("first"));
        assert!(!device.positive_test("t-1").expect("duplicate"));
        assert!(matches!(
            device.positive_test("  "),
            Err(DeviceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_synchronize_clears_ledger() {
        let dir = tempfile::tempdir().expect("tempdir");
        let authority = test_authority(&dir);
        let mut device =
            MobileDevice::new(test_config(&dir, "handset"), authority).expect("device");

        device.record_contact("dev-b", 10, 30).expect("record");
        assert!(!device.synchronize().expect("sync"));
        assert!(device.ledger.payload().is_empty());
    }
}
