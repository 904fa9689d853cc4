//! Measurement of rendered extents
//!
//! Tab panes are hidden independently of each other, so a tab block's
//! container does not size itself; after every visibility change the
//! registry asks a [`Layout`] for the header and body extents and writes the
//! sum back as the container's `height`.

use tabsync_dom::{Document, NodeId};

/// Measures how tall a node renders
pub trait Layout {
    /// Rendered vertical extent of `node`, in pixels
    fn extent(&self, doc: &Document, node: NodeId) -> u32;
}

/// Estimates extents from line counts: `lines * line_height + padding`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    pub line_height: u32,
    pub padding: u32,
}

impl TextMetrics {
    pub fn new(line_height: u32, padding: u32) -> Self {
        Self {
            line_height,
            padding,
        }
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::new(20, 0)
    }
}

impl Layout for TextMetrics {
    fn extent(&self, doc: &Document, node: NodeId) -> u32 {
        let text = doc.text_content(node);
        let lines = text.trim_matches('\n').lines().count().max(1);
        let lines = u32::try_from(lines).unwrap_or(u32::MAX);
        lines
            .saturating_mul(self.line_height)
            .saturating_add(self.padding)
    }
}
