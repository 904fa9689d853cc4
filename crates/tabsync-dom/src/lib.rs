//! Markup tree for tabsync
//!
//! Provides an owned, arena-backed representation of a rendered page that can
//! be parsed from HTML, queried and mutated the way a browser script would,
//! and rendered back to markup.

pub mod document;
pub mod element;
pub mod error;
pub mod markup;
pub mod style;

pub use document::{Document, NodeData, NodeId};
pub use element::Element;
pub use error::{Error, Result};
