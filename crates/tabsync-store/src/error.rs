//! Error types for tabsync-store

use std::path::PathBuf;

/// Result type for tabsync-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabsync-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Invalid preference key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Expiry of {key:?} is out of range: {ttl} from now")]
    ExpiryOutOfRange { key: String, ttl: chrono::Duration },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
