//! Client-side preference persistence for tabsync
//!
//! A [`PreferenceStore`] is a small key→string map with per-entry expiry,
//! scoped to one client. Values handed to the switching engine are JSON, and
//! anything that fails to decode is treated as "no preference".

pub mod cookie;
pub mod error;
pub mod file;
pub mod io;
pub mod memory;
pub mod store;

pub use cookie::{Cookie, CookieJar};
pub use error::{Error, Result};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{Clock, DEFAULT_TTL_DAYS, MAX_TTL_DAYS, PreferenceStore, default_ttl, read_json, write_json};
