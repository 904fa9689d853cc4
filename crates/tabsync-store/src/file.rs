//! JSON-file backed store

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::write_atomic;
use crate::store::{Clock, PreferenceStore, expiry, validate_key};

/// A persisted entry as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    pub expires: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

/// Store persisted to a single JSON file.
///
/// Every write rewrites the file atomically. A missing or unreadable file is
/// treated as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    clock: Clock,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Utc::now)
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Live entries, sorted by key
    pub fn entries(&self) -> Vec<(String, StoredEntry)> {
        let now = (self.clock)();
        self.load()
            .entries
            .into_iter()
            .filter(|(_, e)| e.expires > now)
            .collect()
    }

    fn load(&self) -> StoreFile {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoreFile::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "preference file unreadable");
                return StoreFile::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "preference file corrupt, starting empty");
            StoreFile::default()
        })
    }
}

impl PreferenceStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let now = (self.clock)();
        self.load()
            .entries
            .remove(key)
            .filter(|e| e.expires > now)
            .map(|e| e.value)
    }

    fn write(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        validate_key(key)?;
        let now = (self.clock)();
        let mut file = self.load();
        file.entries.retain(|_, e| e.expires > now);
        if ttl > Duration::zero() {
            file.entries.insert(
                key.to_string(),
                StoredEntry {
                    value: value.to_string(),
                    expires: expiry(now, key, ttl)?,
                },
            );
        } else {
            file.entries.remove(key);
        }

        let content = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!(path = %self.path.display(), key, "preference written");
        Ok(())
    }
}
