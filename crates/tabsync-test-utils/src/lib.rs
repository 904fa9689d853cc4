//! Shared test utilities for the tabsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`page`]: [`PageBuilder`] and canned pages for the common scenarios
//! - [`site`]: [`TestSite`], a temporary directory holding pages, config and
//!   a preference file

pub mod page;
pub mod site;

pub use page::{PageBuilder, TabSpec};
pub use site::TestSite;
