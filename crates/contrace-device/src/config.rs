//! Device configuration.
//!
//! A device's identity is derived entirely from these static values; loading
//! the same file on another host reproduces the same identity.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Static configuration of one mobile device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Network address of the device.
    pub address: String,
    /// Human-assigned device name.
    pub device_name: String,
    /// Directory holding the local ledger file. Empty = current directory.
    #[serde(default)]
    pub data_dir: String,
}

/// Errors raised while loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for configuration key \"{0}\"")]
    InvalidKey(&'static str),
}

impl DeviceConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: DeviceConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty identity values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.trim().is_empty() {
            return Err(ConfigError::InvalidKey("address"));
        }
        if self.device_name.trim().is_empty() {
            return Err(ConfigError::InvalidKey("device_name"));
        }
        Ok(())
    }

    /// Directory for the local ledger file.
    pub fn data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.data_dir)
        }
    }
}
