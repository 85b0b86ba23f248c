//! Store connection configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Connection parameters for the central store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub db_path: String,
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

impl StoreConfig {
    /// Build a configuration directly from a database path.
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty connection parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::InvalidKey("db_path"));
        }
        Ok(())
    }

    /// The database path as a filesystem path.
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "db_path = \"/var/lib/contrace/central.db\"\n")
            .expect("write config");

        let config = StoreConfig::load(&path).expect("load");
        assert_eq!(config.db_path, "/var/lib/contrace/central.db");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = StoreConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_missing_key_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "unrelated = 1\n").expect("write config");
        assert!(matches!(StoreConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_blank_path_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "db_path = \"  \"\n").expect("write config");
        assert!(matches!(
            StoreConfig::load(&path),
            Err(ConfigError::InvalidKey("db_path"))
        ));
    }
}
