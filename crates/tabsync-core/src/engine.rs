//! The switch engine
//!
//! Owns every piece of per-document state (document, catalog, registry,
//! selection, preference record, store) and is the only place that mutates
//! it after startup.

use chrono::Duration;
use tabsync_dom::Document;
use tabsync_store::PreferenceStore;

use crate::catalog::Catalog;
use crate::ids::{GroupId, SupergroupName};
use crate::layout::Layout;
use crate::record::{PreferenceRecord, Selection};
use crate::registry::{PaneRef, Registry};

/// Result of a switch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The request named something that does not exist; nothing changed
    Ignored,
    /// The request was valid but the target was already selected
    Unchanged,
    /// The selection moved
    Switched,
}

/// Where and for how long the preference record is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persistence {
    pub key: String,
    pub ttl: Duration,
}

pub struct Engine {
    document: Document,
    catalog: Catalog,
    registry: Registry,
    selection: Selection,
    record: PreferenceRecord,
    store: Box<dyn PreferenceStore>,
    layout: Box<dyn Layout>,
    persistence: Persistence,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("catalog", &self.catalog)
            .field("selection", &self.selection)
            .field("record", &self.record)
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

impl Engine {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        document: Document,
        catalog: Catalog,
        registry: Registry,
        selection: Selection,
        record: PreferenceRecord,
        store: Box<dyn PreferenceStore>,
        layout: Box<dyn Layout>,
        persistence: Persistence,
    ) -> Self {
        Self {
            document,
            catalog,
            registry,
            selection,
            record,
            store,
            layout,
            persistence,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn record(&self) -> &PreferenceRecord {
        &self.record
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn into_parts(self) -> (Document, Box<dyn PreferenceStore>) {
        (self.document, self.store)
    }

    /// Select `group` for `supergroup` everywhere on the page and persist it.
    ///
    /// Names are normalized first, so `"Build"`/`"Maven"` and
    /// `"build"`/`"group-maven"` are the same request. A supergroup that is
    /// not in the catalog, or a group that is not one of its members, is
    /// ignored without touching the store or the document.
    ///
    /// A valid request always rewrites the stored preference, so re-selecting
    /// the current group still renews its expiry.
    pub fn switch_to_group(&mut self, supergroup: &str, group: &str) -> SwitchOutcome {
        let Some(name) = SupergroupName::new(supergroup) else {
            tracing::debug!(supergroup, "ignoring switch for blank supergroup");
            return SwitchOutcome::Ignored;
        };
        let Some(members) = self.catalog.get(&name) else {
            tracing::debug!(supergroup = %name, "ignoring switch for unknown supergroup");
            return SwitchOutcome::Ignored;
        };
        let Some(group) = GroupId::parse(group).filter(|g| members.contains(g)) else {
            tracing::debug!(supergroup = %name, group, "ignoring switch to non-member group");
            return SwitchOutcome::Ignored;
        };

        let changed = self.selection.get(&name) != Some(&group);
        self.selection.set(name.clone(), group.clone());
        self.record.set(&name, &group);
        self.persist();
        self.sync(&name);

        if changed {
            tracing::info!(supergroup = %name, group = %group, "switched group");
            SwitchOutcome::Switched
        } else {
            SwitchOutcome::Unchanged
        }
    }

    /// Select one pane of one tab block, leaving the rest of the page and the
    /// store alone
    pub fn switch_to_tab(&mut self, at: PaneRef) -> SwitchOutcome {
        match self
            .registry
            .select_pane(&mut self.document, at, self.layout.as_ref())
        {
            None => {
                tracing::debug!(block = at.block, pane = at.pane, "ignoring switch to unknown pane");
                SwitchOutcome::Ignored
            }
            Some(false) => SwitchOutcome::Unchanged,
            Some(true) => {
                tracing::debug!(block = at.block, pane = at.pane, "switched tab");
                SwitchOutcome::Switched
            }
        }
    }

    /// Drive every block of `supergroup` to the current selection
    pub(crate) fn sync(&mut self, supergroup: &SupergroupName) {
        let Some(group) = self.selection.get(supergroup).cloned() else {
            return;
        };
        self.registry.show_group(
            &mut self.document,
            &self.catalog,
            supergroup,
            &group,
            self.layout.as_ref(),
        );
    }

    /// Drive every supergroup to its current selection
    pub(crate) fn sync_all(&mut self) {
        let names: Vec<SupergroupName> = self.selection.iter().map(|(n, _)| n.clone()).collect();
        for name in &names {
            self.sync(name);
        }
    }

    fn persist(&mut self) {
        let Persistence { key, ttl } = &self.persistence;
        if let Err(e) = self.record.save(self.store.as_mut(), key, *ttl) {
            tracing::warn!(key = %key, error = %e, "failed to persist preference, keeping in-memory selection");
        }
    }
}
