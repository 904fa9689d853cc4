//! Error types for tabsync-dom

/// Result type for tabsync-dom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabsync-dom operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed markup at byte {position}: {message}")]
    Markup { position: u64, message: String },
}

impl Error {
    pub fn markup(position: u64, message: impl Into<String>) -> Self {
        Self::Markup {
            position,
            message: message.into(),
        }
    }
}
