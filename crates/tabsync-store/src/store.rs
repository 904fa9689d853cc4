//! The store contract and its JSON helpers

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Default lifetime of a persisted preference, in days
pub const DEFAULT_TTL_DAYS: i64 = 365;

/// Longest accepted lifetime, in days
pub const MAX_TTL_DAYS: i64 = 36_500;

/// Source of "now" for expiry decisions
pub type Clock = fn() -> DateTime<Utc>;

pub fn default_ttl() -> Duration {
    Duration::days(DEFAULT_TTL_DAYS)
}

/// Durable key→value persistence for a single client.
///
/// Entries expire passively: once past their expiry they read as absent.
/// A non-positive `ttl` removes the entry.
pub trait PreferenceStore {
    /// Read the raw value stored under `key`
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` for `ttl`
    fn write(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

/// Read and decode a JSON value.
///
/// Absent, expired or malformed values all come back as `None`.
pub fn read_json<T: DeserializeOwned>(store: &dyn PreferenceStore, key: &str) -> Option<T> {
    let raw = store.read(key)?;
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "ignoring undecodable preference value");
            None
        }
    }
}

/// Encode a value as JSON and store it
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn PreferenceStore,
    key: &str,
    value: &T,
    ttl: Duration,
) -> Result<()> {
    let encoded = serde_json::to_string(value)?;
    store.write(key, &encoded, ttl)
}

/// Expiry instant for an entry written at `now`
pub(crate) fn expiry(now: DateTime<Utc>, key: &str, ttl: Duration) -> Result<DateTime<Utc>> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| crate::Error::ExpiryOutOfRange {
            key: key.to_string(),
            ttl,
        })
}

/// Cookie-style key validation shared by every store
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(crate::Error::invalid_key(key, "key is empty"));
    }
    if key
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '=' | ';' | ','))
    {
        return Err(crate::Error::invalid_key(
            key,
            "key contains whitespace, control characters or one of '=', ';', ','",
        ));
    }
    Ok(())
}
