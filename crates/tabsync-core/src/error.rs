//! Error types for tabsync-core
//!
//! Switching itself never fails; these cover the I/O edges around it.

use std::path::PathBuf;

/// Result type for tabsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error(transparent)]
    Markup(#[from] tabsync_dom::Error),

    #[error(transparent)]
    Store(#[from] tabsync_store::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
