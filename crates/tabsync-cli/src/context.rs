//! Per-invocation context
//!
//! Resolves the config file and preference file from the global options and
//! loads pages into a running [`Controller`].

use std::path::{Path, PathBuf};

use tabsync_core::{Config, Controller};
use tabsync_core::config::CONFIG_FILE_NAME;
use tabsync_dom::Document;
use tabsync_store::FileStore;

use crate::error::{CliError, Result};

/// Directory under the user's data dir holding the preference file
const DATA_DIR_NAME: &str = "tabsync";
const STORE_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub store_path: PathBuf,
}

impl Context {
    /// Resolve config and store locations.
    ///
    /// An explicit config path must exist; the implicit `./tabsync.toml` may
    /// be absent.
    pub fn resolve(config: Option<&Path>, store: Option<&Path>) -> Result<Self> {
        let config = match config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(Path::new(CONFIG_FILE_NAME))?,
        };
        let store_path = match store {
            Some(path) => path.to_path_buf(),
            None => default_store_path()?,
        };
        tracing::debug!(store = %store_path.display(), "resolved preference file");
        Ok(Self { config, store_path })
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }

    /// Parse `page` and run the page-load pass against the preference file
    pub fn start(&self, page: &Path) -> Result<Controller> {
        let document = read_page(page)?;
        Ok(Controller::start(document, Box::new(self.store()), &self.config))
    }
}

fn default_store_path() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME).join(STORE_FILE_NAME))
        .ok_or_else(|| CliError::user("Cannot determine a data directory; pass --store"))
}

pub fn read_page(path: &Path) -> Result<Document> {
    let markup = std::fs::read_to_string(path).map_err(|e| tabsync_core::Error::io(path, e))?;
    Ok(Document::parse(&markup)?)
}

/// Write rendered markup to `output`, or stdout when `None`
pub fn write_page(document: &Document, output: Option<&Path>) -> Result<()> {
    let markup = document.render();
    match output {
        Some(path) => {
            std::fs::write(path, markup).map_err(|e| tabsync_core::Error::io(path, e))?;
        }
        None => println!("{markup}"),
    }
    Ok(())
}
