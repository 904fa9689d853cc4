//! Error types for tabsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tabsync-core
    #[error(transparent)]
    Core(#[from] tabsync_core::Error),

    /// Error from tabsync-dom
    #[error(transparent)]
    Markup(#[from] tabsync_dom::Error),

    /// Error from tabsync-store
    #[error(transparent)]
    Store(#[from] tabsync_store::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
