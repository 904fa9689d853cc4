//! [`TestSite`]: a temporary directory standing in for a published site and
//! its visitor's preference file.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory with helpers for pages, config and the preference
/// store.
pub struct TestSite {
    temp_dir: TempDir,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `html` to `name` under the root and return its path
    pub fn write_page(&self, name: &str, html: &str) -> PathBuf {
        self.write(name, html)
    }

    /// Write `tabsync.toml` and return its path
    pub fn write_config(&self, toml: &str) -> PathBuf {
        self.write("tabsync.toml", toml)
    }

    /// Location of the preference file; not created until something is saved
    pub fn store_path(&self) -> PathBuf {
        self.root().join("preferences.json")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        let full_path = self.root().join(name);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, name: &str, content: &str) {
        let file_content = self.read(name);
        assert!(
            file_content.contains(content),
            "Expected {name} to contain {content:?}, got:\n{file_content}"
        );
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}
