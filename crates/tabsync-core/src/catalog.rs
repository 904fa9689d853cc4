//! Discovery of supergroups and their groups
//!
//! A supergroup container is any element with class `supergroup`; its name
//! comes from the `name` attribute and its groups from descendant elements
//! with class `group`, in document order. A group label's identifier is its
//! `value` attribute when it has one (dropdown options), otherwise
//! `group-` + its normalized text.

use std::collections::HashMap;

use serde::Serialize;
use tabsync_dom::Document;

use crate::ids::{GroupId, SupergroupName};

pub const SUPERGROUP_CLASS: &str = "supergroup";
pub const GROUP_CLASS: &str = "group";

/// A category and its variants in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supergroup {
    name: SupergroupName,
    groups: Vec<GroupId>,
}

impl Supergroup {
    pub fn name(&self) -> &SupergroupName {
        &self.name
    }

    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn contains(&self, group: &GroupId) -> bool {
        self.groups.contains(group)
    }

    /// The first declared group. Supergroups are never empty.
    pub fn default_group(&self) -> &GroupId {
        &self.groups[0]
    }
}

/// Supergroup → ordered groups, plus the group → supergroup reverse index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    supergroups: Vec<Supergroup>,
    reverse: HashMap<GroupId, SupergroupName>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog from a rendered document
    pub fn scan(doc: &Document) -> Self {
        let mut catalog = Self::new();

        for (index, container) in doc.select_by_class(SUPERGROUP_CLASS).into_iter().enumerate() {
            let name = doc
                .attr(container, "name")
                .and_then(SupergroupName::new)
                .unwrap_or_else(|| SupergroupName::unnamed(index + 1));

            for label in doc.descendants(container) {
                if !doc.has_class(label, GROUP_CLASS) {
                    continue;
                }
                let group = match doc.attr(label, "value") {
                    Some(value) => GroupId::parse(value),
                    None => GroupId::from_label(&doc.text_content(label)),
                };
                match group {
                    Some(group) => {
                        catalog.declare(&name, group);
                    }
                    None => tracing::debug!(supergroup = %name, "skipping blank group label"),
                }
            }
        }

        tracing::debug!(supergroups = catalog.len(), "catalog built");
        catalog
    }

    /// Record `group` as a member of `supergroup`.
    ///
    /// A group belongs to one supergroup only: re-declaring it elsewhere is
    /// ignored. Returns true if the group was added.
    pub fn declare(&mut self, supergroup: &SupergroupName, group: GroupId) -> bool {
        if let Some(owner) = self.reverse.get(&group) {
            if owner != supergroup {
                tracing::warn!(
                    group = %group,
                    owner = %owner,
                    duplicate = %supergroup,
                    "group already belongs to another supergroup"
                );
            }
            return false;
        }

        self.reverse.insert(group.clone(), supergroup.clone());
        match self.supergroups.iter_mut().find(|s| s.name == *supergroup) {
            Some(existing) => existing.groups.push(group),
            None => self.supergroups.push(Supergroup {
                name: supergroup.clone(),
                groups: vec![group],
            }),
        }
        true
    }

    pub fn get(&self, name: &SupergroupName) -> Option<&Supergroup> {
        self.supergroups.iter().find(|s| s.name == *name)
    }

    pub fn supergroup_of(&self, group: &GroupId) -> Option<&SupergroupName> {
        self.reverse.get(group)
    }

    pub fn contains(&self, supergroup: &SupergroupName, group: &GroupId) -> bool {
        self.supergroup_of(group) == Some(supergroup)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Supergroup> {
        self.supergroups.iter()
    }

    pub fn len(&self) -> usize {
        self.supergroups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supergroups.is_empty()
    }
}
