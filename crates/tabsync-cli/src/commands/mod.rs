//! Command implementations for tabsync-cli

pub mod catalog;
pub mod prefs;
pub mod render;
pub mod switch;
pub mod version;

pub use catalog::run_catalog;
pub use prefs::run_prefs;
pub use render::run_render;
pub use switch::{run_click, run_switch};
pub use version::run_version_check;
