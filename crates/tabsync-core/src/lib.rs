//! Preference-synchronized content switching
//!
//! A rendered page declares categories of mutually exclusive variants
//! (supergroups such as "build" with groups sbt/maven/gradle) and repeats
//! content for each variant in many places: tab blocks, inline spans and
//! dropdowns. This crate discovers those declarations, keeps every block
//! showing the selected variant, and persists the selection per client.
//!
//! ```text
//! Controller::start ─▶ Catalog::scan ─▶ PreferenceRecord::load ─▶ Registry::scan ─▶ Engine::sync_all
//! Controller::handle ─▶ Engine::switch_to_group / switch_to_tab ─▶ store + registry
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod ids;
pub mod layout;
pub mod record;
pub mod registry;
pub mod version;

pub use catalog::{Catalog, Supergroup};
pub use config::Config;
pub use controller::{Controller, Event};
pub use engine::{Engine, Persistence, SwitchOutcome};
pub use error::{Error, Result};
pub use ids::{GroupId, SupergroupName};
pub use layout::{Layout, TextMetrics};
pub use record::{PreferenceRecord, Selection, StoredPreference};
pub use registry::{Dropdown, InlineSpan, Pane, PaneRef, Registry, TabBlock};
pub use version::{VersionData, VersionWarning};
