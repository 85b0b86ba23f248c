//! Authority error types.
//!
//! Two classes: argument validation (detected before any I/O, never retried)
//! and infrastructural failure (configuration, store, payload transport),
//! which callers may retry.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// An argument violated its contract; nothing was read or written.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The synchronized payload could not be parsed.
    #[error("malformed ledger payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Db(#[from] contrace_db::DbError),

    #[error("store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, AuthorityError>;
