//! Startup pass and interaction dispatch

use tabsync_dom::{Document, NodeId};
use tabsync_store::PreferenceStore;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::{Engine, Persistence, SwitchOutcome};
use crate::layout::Layout;
use crate::record::PreferenceRecord;
use crate::registry::Registry;

/// A user interaction with the rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Click on a tab header, or on anything inside one
    TabClick { header: NodeId },
    /// A dropdown's value changed
    DropdownChange { control: NodeId, value: String },
}

/// Owns the engine for one document and routes events into it
#[derive(Debug)]
pub struct Controller {
    engine: Engine,
}

impl Controller {
    /// Run the startup pass with the configured text metrics
    pub fn start(document: Document, store: Box<dyn PreferenceStore>, config: &Config) -> Self {
        Self::start_with_layout(document, store, config, Box::new(config.text_metrics()))
    }

    /// Run the startup pass.
    ///
    /// Builds the catalog, reads the stored record, resolves a selection for
    /// every supergroup, indexes the blocks and brings every one of them in
    /// line with that selection. The store is only read.
    pub fn start_with_layout(
        mut document: Document,
        store: Box<dyn PreferenceStore>,
        config: &Config,
        layout: Box<dyn Layout>,
    ) -> Self {
        let catalog = Catalog::scan(&document);
        let record = PreferenceRecord::load(store.as_ref(), &config.cookie_name, &catalog);
        let selection = record.resolve(&catalog);
        let registry = Registry::scan(&mut document, &catalog, &selection, layout.as_ref());

        let persistence = Persistence {
            key: config.cookie_name.clone(),
            ttl: config.ttl(),
        };
        let mut engine = Engine::new(
            document,
            catalog,
            registry,
            selection,
            record,
            store,
            layout,
            persistence,
        );
        engine.sync_all();

        tracing::debug!(
            supergroups = engine.catalog().len(),
            blocks = engine.registry().blocks().len(),
            "startup complete"
        );
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn document(&self) -> &Document {
        self.engine.document()
    }

    pub fn into_parts(self) -> (Document, Box<dyn PreferenceStore>) {
        self.engine.into_parts()
    }

    pub fn handle(&mut self, event: Event) -> SwitchOutcome {
        match event {
            Event::TabClick { header } => self.tab_click(header),
            Event::DropdownChange { control, value } => self.dropdown_change(control, &value),
        }
    }

    fn tab_click(&mut self, target: NodeId) -> SwitchOutcome {
        let engine = &self.engine;
        let Some(at) = engine.registry().locate_header(engine.document(), target) else {
            tracing::debug!(node = target.index(), "click outside any tab header");
            return SwitchOutcome::Ignored;
        };

        let grouped = engine
            .registry()
            .pane(at)
            .and_then(|pane| pane.tag.as_ref())
            .and_then(|tag| Some((engine.catalog().supergroup_of(tag)?.clone(), tag.clone())));

        match grouped {
            Some((supergroup, group)) => self
                .engine
                .switch_to_group(supergroup.as_str(), group.as_str()),
            None => self.engine.switch_to_tab(at),
        }
    }

    fn dropdown_change(&mut self, control: NodeId, value: &str) -> SwitchOutcome {
        let Some(supergroup) = self
            .engine
            .registry()
            .dropdown(control)
            .map(|d| d.supergroup.clone())
        else {
            tracing::debug!(node = control.index(), "change on unregistered control");
            return SwitchOutcome::Ignored;
        };
        self.engine.switch_to_group(supergroup.as_str(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsync_store::MemoryStore;

    const PAGE: &str = concat!(
        r#"<div class="supergroup" name="build"><span class="group">sbt</span><span class="group">Maven</span></div>"#,
        r#"<select name="build"><option value="group-sbt">sbt</option><option value="group-maven">Maven</option></select>"#,
        r#"<dl><dt>sbt</dt><dd><pre class="group-sbt">a</pre></dd><dt>Maven</dt><dd><pre class="group-maven">b</pre></dd></dl>"#,
        r#"<dl><dt>One</dt><dd><pre>1</pre></dd><dt>Two</dt><dd><pre>2</pre></dd></dl>"#,
    );

    fn start(store: MemoryStore) -> Controller {
        Controller::start(
            Document::parse(PAGE).unwrap(),
            Box::new(store),
            &Config::default(),
        )
    }

    #[test]
    fn test_startup_never_writes() {
        let controller = start(MemoryStore::new());
        assert!(controller.engine().store().read("groupsPref").is_none());
        assert!(controller.engine().record().is_empty());
    }

    #[test]
    fn test_tagged_header_click_switches_group() {
        let mut controller = start(MemoryStore::new());
        let header = controller.engine().registry().blocks()[0].panes()[1].header;

        assert_eq!(
            controller.handle(Event::TabClick { header }),
            SwitchOutcome::Switched
        );
        assert_eq!(
            controller.engine().store().read("groupsPref").as_deref(),
            Some(r#"{"build":"group-maven"}"#)
        );
    }

    #[test]
    fn test_plain_header_click_does_not_persist() {
        let mut controller = start(MemoryStore::new());
        let header = controller.engine().registry().blocks()[1].panes()[1].header;

        assert_eq!(
            controller.handle(Event::TabClick { header }),
            SwitchOutcome::Switched
        );
        assert_eq!(controller.engine().registry().blocks()[1].current(), 1);
        assert!(controller.engine().store().read("groupsPref").is_none());
    }

    #[test]
    fn test_dropdown_change_and_unknown_targets() {
        let mut controller = start(MemoryStore::new());
        let control = controller.engine().registry().dropdowns()[0].node;
        let root = controller.document().root();

        assert_eq!(
            controller.handle(Event::DropdownChange {
                control,
                value: "group-maven".into()
            }),
            SwitchOutcome::Switched
        );
        assert_eq!(controller.engine().registry().blocks()[0].current(), 1);

        assert_eq!(
            controller.handle(Event::DropdownChange {
                control: root,
                value: "group-sbt".into()
            }),
            SwitchOutcome::Ignored
        );
        assert_eq!(
            controller.handle(Event::TabClick { header: root }),
            SwitchOutcome::Ignored
        );
    }
}
