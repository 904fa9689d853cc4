//! Engine configuration loaded from `tabsync.toml`

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::TextMetrics;
use tabsync_store::MAX_TTL_DAYS;

/// Default name of the persisted preference entry
pub const DEFAULT_COOKIE_NAME: &str = "groupsPref";

/// Default config file name looked up by the CLI
pub const CONFIG_FILE_NAME: &str = "tabsync.toml";

/// Engine configuration.
///
/// Every field has a default, so a partial (or empty) file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key the preference record is stored under
    pub cookie_name: String,
    /// Lifetime of the stored preference
    pub ttl_days: i64,
    /// Pixel height of one line of text, used for block height estimates
    pub line_height: u32,
    /// Extra pixels added to every measured header and body
    pub block_padding: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            ttl_days: tabsync_store::DEFAULT_TTL_DAYS,
            line_height: 20,
            block_padding: 0,
        }
    }
}

impl Config {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if !(0..=MAX_TTL_DAYS).contains(&config.ttl_days) {
            return Err(Error::ConfigParse {
                path: path.to_path_buf(),
                message: format!(
                    "ttl_days = {} is outside 0..={MAX_TTL_DAYS}",
                    config.ttl_days
                ),
            });
        }
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Lifetime of the stored preference. Day counts chrono cannot represent
    /// saturate, and the stores then reject the write.
    pub fn ttl(&self) -> Duration {
        match Duration::try_days(self.ttl_days) {
            Some(ttl) => ttl,
            None if self.ttl_days < 0 => Duration::zero(),
            None => Duration::MAX,
        }
    }

    pub fn text_metrics(&self) -> TextMetrics {
        TextMetrics::new(self.line_height, self.block_padding)
    }
}
