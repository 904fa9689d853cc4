//! The persisted preference record and the selection resolved from it
//!
//! Two encodings of the stored value exist in the wild:
//!
//! - the legacy priority list: `["group-java", "group-sbt"]`, most recent
//!   first, one list shared by every supergroup;
//! - the per-supergroup map: `{"language": "group-java", "build": "group-sbt"}`.
//!
//! Both are read; only the map is ever written.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tabsync_store::{PreferenceStore, read_json, write_json};

use crate::catalog::Catalog;
use crate::ids::{GroupId, SupergroupName};

/// Stored preference in any known encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredPreference {
    BySupergroup(BTreeMap<String, String>),
    Priority(Vec<String>),
}

/// Supergroup name → selected group, as persisted.
///
/// Entries for supergroups the current page does not declare are kept so
/// that writing from one page never forgets choices made on another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceRecord {
    selections: BTreeMap<String, String>,
}

impl PreferenceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Migrate a stored value into a record.
    ///
    /// A priority list is resolved per supergroup of `catalog`: the first
    /// listed group that belongs to it wins. Entries matching no supergroup
    /// are dropped.
    pub fn from_stored(stored: StoredPreference, catalog: &Catalog) -> Self {
        let mut record = Self::new();
        match stored {
            StoredPreference::BySupergroup(map) => {
                for (supergroup, group) in map {
                    match SupergroupName::new(&supergroup) {
                        Some(name) => {
                            record.selections.insert(name.as_str().to_string(), group);
                        }
                        None => tracing::debug!("dropping preference with blank supergroup"),
                    }
                }
            }
            StoredPreference::Priority(list) => {
                tracing::debug!(entries = list.len(), "migrating priority-list preference");
                for supergroup in catalog.iter() {
                    let chosen = list
                        .iter()
                        .filter_map(|entry| GroupId::parse(entry))
                        .find(|group| supergroup.contains(group));
                    if let Some(group) = chosen {
                        record.set(supergroup.name(), &group);
                    }
                }
            }
        }
        record
    }

    /// Read the record from `store`; anything absent or undecodable yields an
    /// empty record
    pub fn load(store: &dyn PreferenceStore, key: &str, catalog: &Catalog) -> Self {
        read_json::<StoredPreference>(store, key)
            .map(|stored| Self::from_stored(stored, catalog))
            .unwrap_or_default()
    }

    /// Persist the record in the per-supergroup encoding
    pub fn save(
        &self,
        store: &mut dyn PreferenceStore,
        key: &str,
        ttl: Duration,
    ) -> tabsync_store::Result<()> {
        write_json(store, key, &self.to_stored(), ttl)
    }

    pub fn get(&self, supergroup: &SupergroupName) -> Option<&str> {
        self.selections.get(supergroup.as_str()).map(String::as_str)
    }

    pub fn set(&mut self, supergroup: &SupergroupName, group: &GroupId) {
        self.selections
            .insert(supergroup.as_str().to_string(), group.as_str().to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn to_stored(&self) -> StoredPreference {
        StoredPreference::BySupergroup(self.selections.clone())
    }

    /// Resolve a total selection over `catalog`.
    ///
    /// Every supergroup gets its stored group when that group is one of its
    /// members, and its first declared group otherwise.
    pub fn resolve(&self, catalog: &Catalog) -> Selection {
        let mut selection = Selection::default();
        for supergroup in catalog.iter() {
            let stored = self.get(supergroup.name());
            let chosen = stored
                .and_then(GroupId::parse)
                .filter(|group| supergroup.contains(group));
            if chosen.is_none()
                && let Some(stored) = stored
            {
                tracing::debug!(
                    supergroup = %supergroup.name(),
                    stored,
                    "stored group is not a member, using default"
                );
            }
            let group = chosen.unwrap_or_else(|| supergroup.default_group().clone());
            selection.set(supergroup.name().clone(), group);
        }
        selection
    }
}

/// The selected group of every supergroup on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: BTreeMap<SupergroupName, GroupId>,
}

impl Selection {
    pub fn get(&self, supergroup: &SupergroupName) -> Option<&GroupId> {
        self.current.get(supergroup)
    }

    /// Whether `group` is the selection of any supergroup
    pub fn is_selected(&self, group: &GroupId) -> bool {
        self.current.values().any(|g| g == group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SupergroupName, &GroupId)> {
        self.current.iter()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub(crate) fn set(&mut self, supergroup: SupergroupName, group: GroupId) {
        self.current.insert(supergroup, group);
    }
}
