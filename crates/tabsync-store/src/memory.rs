//! In-memory store

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::store::{Clock, PreferenceStore, expiry, validate_key};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires: DateTime<Utc>,
}

/// Store that lives as long as the process
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
    clock: Clock,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = (self.clock)();
        self.entries.values().filter(|e| e.expires > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;
        (entry.expires > (self.clock)()).then(|| entry.value.clone())
    }

    fn write(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        validate_key(key)?;
        if ttl <= Duration::zero() {
            self.entries.remove(key);
            return Ok(());
        }
        let expires = expiry((self.clock)(), key, ttl)?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires,
            },
        );
        Ok(())
    }
}
