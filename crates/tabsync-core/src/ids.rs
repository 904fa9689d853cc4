//! Normalized identifiers for supergroups and groups

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Prefix shared by every group identifier
pub const GROUP_PREFIX: &str = "group-";

/// Classification classes carried by tagged content: `group-x` or `tab-group-x`
static GROUP_CLASS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:tab-)?group-(\S+)$").unwrap());

/// Trim, lower-case and join inner whitespace runs with `-`
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Name of a category of mutually exclusive variants, e.g. `build`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupergroupName(String);

impl SupergroupName {
    /// Normalize a declared name. Blank names yield `None`.
    pub fn new(name: &str) -> Option<Self> {
        let normalized = normalize_label(name);
        (!normalized.is_empty()).then_some(Self(normalized))
    }

    /// Name for an unnamed container, by 1-based position in the document
    pub fn unnamed(ordinal: usize) -> Self {
        Self(format!("supergroup-{ordinal}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SupergroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single variant, always of the form `group-<label>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Build from a human label such as `Maven` or `Scala 3`
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_label(label);
        (!normalized.is_empty()).then(|| Self(format!("{GROUP_PREFIX}{normalized}")))
    }

    /// Build from a classification class (`group-x` / `tab-group-x`)
    pub fn from_class(class: &str) -> Option<Self> {
        let caps = GROUP_CLASS_PATTERN.captures(class)?;
        let label = caps.get(1)?.as_str();
        Some(Self(format!("{GROUP_PREFIX}{}", label.to_lowercase())))
    }

    /// Accept any of the spellings users and markup produce: a class form or
    /// a bare label
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        Self::from_class(trimmed).or_else(|| Self::from_label(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the `group-` prefix
    pub fn label(&self) -> &str {
        self.0.strip_prefix(GROUP_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
