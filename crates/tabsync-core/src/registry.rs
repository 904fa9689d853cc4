//! Discovery and state of switchable blocks
//!
//! Three kinds of block are indexed once per document:
//!
//! - tab blocks: a `dl` whose `dd` entries hold a `pre`, presented as
//!   header/body panes with exactly one pane current;
//! - inline spans: `span` elements tagged `group-<x>`;
//! - dropdowns: `select` elements whose options name catalog groups.

use tabsync_dom::{Document, Element, NodeId};

use crate::catalog::Catalog;
use crate::ids::{GroupId, SupergroupName};
use crate::layout::Layout;
use crate::record::Selection;

pub const TABBED_CLASS: &str = "tabbed";
pub const CURRENT_CLASS: &str = "current";
pub const FIRST_CLASS: &str = "first";
pub const LAST_CLASS: &str = "last";
pub const HAS_NOTE_CLASS: &str = "has-note";

/// One header/body pair of a tab block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    pub header: NodeId,
    pub body: NodeId,
    /// Group this pane's content belongs to; `None` for plain tabs
    pub tag: Option<GroupId>,
}

/// Position of a pane within the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneRef {
    pub block: usize,
    pub pane: usize,
}

/// Mutually exclusive panes with exactly one current
#[derive(Debug, Clone)]
pub struct TabBlock {
    container: NodeId,
    panes: Vec<Pane>,
    current: usize,
}

impl TabBlock {
    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    /// Index of the current pane
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_pane(&self) -> &Pane {
        &self.panes[self.current]
    }

    /// Index of the first pane tagged `group`
    pub fn pane_tagged(&self, group: &GroupId) -> Option<usize> {
        self.panes
            .iter()
            .position(|p| p.tag.as_ref() == Some(group))
    }

    /// Whether any pane carries a group of `supergroup`
    pub fn shows_supergroup(&self, supergroup: &SupergroupName, catalog: &Catalog) -> bool {
        self.panes.iter().any(|p| {
            p.tag
                .as_ref()
                .is_some_and(|t| catalog.contains(supergroup, t))
        })
    }

    /// Make pane `index` current.
    ///
    /// Selecting the current pane, or an index past the end, changes nothing
    /// and returns false.
    pub fn select(&mut self, doc: &mut Document, index: usize, layout: &dyn Layout) -> bool {
        if index == self.current || index >= self.panes.len() {
            return false;
        }

        let previous = &self.panes[self.current];
        doc.remove_class(previous.header, CURRENT_CLASS);
        doc.remove_class(previous.body, CURRENT_CLASS);
        doc.hide(previous.body);

        self.current = index;
        self.mark_current(doc);
        self.apply_height(doc, layout);
        true
    }

    fn mark_current(&self, doc: &mut Document) {
        let pane = self.current_pane();
        doc.add_class(pane.header, CURRENT_CLASS);
        doc.add_class(pane.body, CURRENT_CLASS);
        doc.show(pane.body);
    }

    /// Size the container to the current header plus body
    fn apply_height(&self, doc: &mut Document, layout: &dyn Layout) {
        let pane = self.current_pane();
        let height = layout
            .extent(doc, pane.header)
            .saturating_add(layout.extent(doc, pane.body));
        doc.set_style(self.container, "height", Some(&format!("{height}px")));
    }
}

/// A fragment shown only while its group is selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub node: NodeId,
    pub group: GroupId,
    pub supergroup: SupergroupName,
}

/// A `select` whose options are the groups of one supergroup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    pub node: NodeId,
    pub supergroup: SupergroupName,
    pub options: Vec<(NodeId, GroupId)>,
}

impl Dropdown {
    /// Mark the option for `group` selected and clear the others.
    ///
    /// Returns false, touching nothing, when no option matches.
    pub fn select(&self, doc: &mut Document, group: &GroupId) -> bool {
        if !self.options.iter().any(|(_, g)| g == group) {
            tracing::debug!(supergroup = %self.supergroup, group = %group, "dropdown has no option for group");
            return false;
        }
        for (option, g) in &self.options {
            if g == group {
                doc.set_attr(*option, "selected", "selected");
            } else {
                doc.remove_attr(*option, "selected");
            }
        }
        true
    }

    /// Group of the option currently marked selected
    pub fn selected(&self, doc: &Document) -> Option<&GroupId> {
        self.options
            .iter()
            .find(|(option, _)| doc.attr(*option, "selected").is_some())
            .map(|(_, g)| g)
    }
}

/// Every switchable block of one document
#[derive(Debug, Clone, Default)]
pub struct Registry {
    blocks: Vec<TabBlock>,
    spans: Vec<InlineSpan>,
    dropdowns: Vec<Dropdown>,
}

impl Registry {
    /// Index the document's blocks and put every tab block in its initial
    /// state.
    ///
    /// A block starts on its first pane whose tag is a selected group, or on
    /// its first pane when none is.
    pub fn scan(
        doc: &mut Document,
        catalog: &Catalog,
        selection: &Selection,
        layout: &dyn Layout,
    ) -> Self {
        let mut registry = Self::default();

        for container in tab_containers(doc) {
            let panes = collect_panes(doc, container);
            if panes.is_empty() {
                tracing::debug!(node = container.index(), "tab container without panes");
                continue;
            }
            let initial = panes
                .iter()
                .position(|p| p.tag.as_ref().is_some_and(|t| selection.is_selected(t)))
                .unwrap_or(0);
            registry
                .blocks
                .push(mount_block(doc, container, panes, initial, layout));
        }

        for node in doc.select_by_tag("span") {
            let Some(group) = doc
                .element(node)
                .and_then(|el| el.classes().find_map(GroupId::from_class))
            else {
                continue;
            };
            match catalog.supergroup_of(&group) {
                Some(supergroup) => registry.spans.push(InlineSpan {
                    node,
                    supergroup: supergroup.clone(),
                    group,
                }),
                None => tracing::debug!(group = %group, "span tagged with undeclared group"),
            }
        }

        for node in doc.select_by_tag("select") {
            if let Some(dropdown) = dropdown_for(doc, node, catalog) {
                registry.dropdowns.push(dropdown);
            }
        }

        tracing::debug!(
            blocks = registry.blocks.len(),
            spans = registry.spans.len(),
            dropdowns = registry.dropdowns.len(),
            "registry built"
        );
        registry
    }

    pub fn blocks(&self) -> &[TabBlock] {
        &self.blocks
    }

    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    pub fn dropdowns(&self) -> &[Dropdown] {
        &self.dropdowns
    }

    pub fn pane(&self, at: PaneRef) -> Option<&Pane> {
        self.blocks.get(at.block)?.panes.get(at.pane)
    }

    /// Resolve a click target (a header or anything inside one) to its pane
    pub fn locate_header(&self, doc: &Document, target: NodeId) -> Option<PaneRef> {
        let mut node = Some(target);
        while let Some(current) = node {
            for (b, block) in self.blocks.iter().enumerate() {
                if let Some(p) = block.panes.iter().position(|pane| pane.header == current) {
                    return Some(PaneRef { block: b, pane: p });
                }
            }
            node = doc.parent(current);
        }
        None
    }

    pub fn dropdown(&self, node: NodeId) -> Option<&Dropdown> {
        self.dropdowns.iter().find(|d| d.node == node)
    }

    /// Run the tab transition for one pane.
    ///
    /// `None` if `at` names no pane; otherwise whether anything changed.
    pub fn select_pane(
        &mut self,
        doc: &mut Document,
        at: PaneRef,
        layout: &dyn Layout,
    ) -> Option<bool> {
        let block = self.blocks.get_mut(at.block)?;
        if at.pane >= block.panes.len() {
            return None;
        }
        Some(block.select(doc, at.pane, layout))
    }

    /// Drive every block showing `supergroup` to `group`.
    ///
    /// Blocks lacking a pane, span or option for `group` are left as they
    /// are.
    pub fn show_group(
        &mut self,
        doc: &mut Document,
        catalog: &Catalog,
        supergroup: &SupergroupName,
        group: &GroupId,
        layout: &dyn Layout,
    ) {
        for dropdown in self.dropdowns.iter().filter(|d| d.supergroup == *supergroup) {
            dropdown.select(doc, group);
        }

        for span in self.spans.iter().filter(|s| s.supergroup == *supergroup) {
            if span.group == *group {
                doc.show(span.node);
            } else {
                doc.hide(span.node);
            }
        }

        for block in &mut self.blocks {
            if !block.shows_supergroup(supergroup, catalog) {
                continue;
            }
            match block.pane_tagged(group) {
                Some(index) => {
                    block.select(doc, index, layout);
                }
                None => tracing::debug!(
                    node = block.container.index(),
                    group = %group,
                    "tab block has no pane for group"
                ),
            }
        }
    }
}

/// `dl` elements with at least one `dd > pre`
fn tab_containers(doc: &Document) -> Vec<NodeId> {
    doc.select_by_tag("dl")
        .into_iter()
        .filter(|dl| {
            doc.element_children(*dl).into_iter().any(|dd| {
                doc.element(dd).is_some_and(|el| el.is("dd"))
                    && doc
                        .element_children(dd)
                        .into_iter()
                        .any(|c| doc.element(c).is_some_and(|el| el.is("pre")))
            })
        })
        .collect()
}

fn collect_panes(doc: &Document, container: NodeId) -> Vec<Pane> {
    let mut panes = Vec::new();
    for header in doc.element_children(container) {
        if !doc.element(header).is_some_and(|el| el.is("dt")) {
            continue;
        }
        let body = doc
            .next_element_sibling(header)
            .filter(|b| doc.element(*b).is_some_and(|el| el.is("dd")));
        match body {
            Some(body) => panes.push(Pane {
                header,
                body,
                tag: pane_tag(doc, body),
            }),
            None => tracing::debug!(node = header.index(), "tab header without body"),
        }
    }
    panes
}

/// First group classification on the body or inside it
fn pane_tag(doc: &Document, body: NodeId) -> Option<GroupId> {
    std::iter::once(body)
        .chain(doc.descendants(body))
        .find_map(|n| doc.element(n)?.classes().find_map(GroupId::from_class))
}

/// Build a dropdown from a `select` when its options name catalog groups.
///
/// The governed supergroup is the `name` attribute when that names a
/// catalog supergroup, otherwise the owner of the first recognized option.
/// Options of other supergroups are left out.
fn dropdown_for(doc: &Document, node: NodeId, catalog: &Catalog) -> Option<Dropdown> {
    let recognized: Vec<(NodeId, GroupId)> = doc
        .descendants(node)
        .into_iter()
        .filter(|n| doc.element(*n).is_some_and(|el| el.is("option")))
        .filter_map(|option| {
            let group = match doc.attr(option, "value") {
                Some(value) => GroupId::parse(value),
                None => GroupId::from_label(&doc.text_content(option)),
            }?;
            catalog.supergroup_of(&group)?;
            Some((option, group))
        })
        .collect();

    let (_, first) = recognized.first()?;
    let supergroup = doc
        .attr(node, "name")
        .and_then(SupergroupName::new)
        .filter(|name| catalog.get(name).is_some())
        .or_else(|| catalog.supergroup_of(first).cloned())?;

    let options: Vec<_> = recognized
        .into_iter()
        .filter(|(_, g)| catalog.contains(&supergroup, g))
        .collect();
    if options.is_empty() {
        tracing::debug!(supergroup = %supergroup, "dropdown has no options for its supergroup");
        return None;
    }

    Some(Dropdown {
        node,
        supergroup,
        options,
    })
}

/// Rewrite headers into tab anchors, hide every body and show the initial pane
fn mount_block(
    doc: &mut Document,
    container: NodeId,
    panes: Vec<Pane>,
    initial: usize,
    layout: &dyn Layout,
) -> TabBlock {
    doc.add_class(container, TABBED_CLASS);

    for (index, pane) in panes.iter().enumerate() {
        let label = doc.text_content(pane.header);
        doc.clear_children(pane.header);
        let anchor = doc.append_element(
            pane.header,
            Element::new("a").with_attr("href", format!("#tab{index}")),
        );
        doc.append_text(anchor, label.trim());

        doc.remove_class(pane.header, CURRENT_CLASS);
        doc.remove_class(pane.body, CURRENT_CLASS);
        doc.hide(pane.body);

        let has_note = doc
            .descendants(pane.body)
            .into_iter()
            .any(|n| doc.element(n).is_some_and(|el| el.is("blockquote")));
        if has_note {
            doc.add_class(pane.body, HAS_NOTE_CLASS);
        }
    }

    if let (Some(first), Some(last)) = (panes.first(), panes.last()) {
        doc.add_class(first.header, FIRST_CLASS);
        doc.add_class(last.header, LAST_CLASS);
    }

    let block = TabBlock {
        container,
        panes,
        current: initial,
    };
    block.mark_current(doc);
    block.apply_height(doc, layout);
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextMetrics;
    use crate::record::PreferenceRecord;
    use pretty_assertions::assert_eq;

    const PLAIN: &str = "<dl><dt>One</dt><dd><pre>1</pre></dd><dt>Two</dt><dd><pre>2\n2</pre><blockquote>note</blockquote></dd><dt>Dangling</dt></dl>";

    fn mount(source: &str) -> (Document, Registry) {
        let mut doc = Document::parse(source).unwrap();
        let catalog = Catalog::scan(&doc);
        let selection = PreferenceRecord::new().resolve(&catalog);
        let registry = Registry::scan(&mut doc, &catalog, &selection, &TextMetrics::default());
        (doc, registry)
    }

    #[test]
    fn test_mount_plain_block() {
        let (doc, registry) = mount(PLAIN);
        assert_eq!(registry.blocks().len(), 1);
        let block = &registry.blocks()[0];
        assert_eq!(block.panes().len(), 2);
        assert_eq!(block.current(), 0);
        assert!(block.panes().iter().all(|p| p.tag.is_none()));

        assert_eq!(
            doc.render(),
            concat!(
                r#"<dl class="tabbed" style="height: 40px;">"#,
                r##"<dt class="first current"><a href="#tab0">One</a></dt>"##,
                r#"<dd class="current"><pre>1</pre></dd>"#,
                r##"<dt class="last"><a href="#tab1">Two</a></dt>"##,
                r#"<dd style="display: none;" class="has-note"><pre>2"#,
                "\n",
                r#"2</pre><blockquote>note</blockquote></dd>"#,
                "<dt>Dangling</dt></dl>"
            )
        );
    }

    #[test]
    fn test_header_entities_are_escaped_once() {
        let (doc, _) = mount(
            "<dl><dt>Tom &amp; Jerry&nbsp;x</dt><dd><pre>1</pre></dd><dt>&lt;b&gt;</dt><dd><pre>2</pre></dd></dl>",
        );
        let html = doc.render();
        assert!(html.contains("<a href=\"#tab0\">Tom &amp; Jerry\u{a0}x</a>"), "{html}");
        assert!(html.contains("<a href=\"#tab1\">&lt;b&gt;</a>"), "{html}");
        assert!(!html.contains("&amp;amp;"));
        assert!(!html.contains("&amp;nbsp;"));
    }

    #[test]
    fn test_select_transition_and_idempotence() {
        let (mut doc, mut registry) = mount(PLAIN);
        let layout = TextMetrics::default();
        let at = PaneRef { block: 0, pane: 1 };

        assert_eq!(registry.select_pane(&mut doc, at, &layout), Some(true));
        let after_first = doc.render();
        assert_eq!(registry.select_pane(&mut doc, at, &layout), Some(false));
        assert_eq!(doc.render(), after_first);

        let block = &registry.blocks()[0];
        let [one, two] = [&block.panes()[0], &block.panes()[1]];
        assert!(!doc.has_class(one.header, CURRENT_CLASS));
        assert!(doc.is_hidden(one.body));
        assert!(doc.has_class(two.header, CURRENT_CLASS));
        assert!(!doc.is_hidden(two.body));
        // header line plus "2", "2note"
        assert_eq!(doc.style(block.container(), "height").as_deref(), Some("60px"));
    }

    #[test]
    fn test_select_out_of_range_is_rejected() {
        let (mut doc, mut registry) = mount(PLAIN);
        let layout = TextMetrics::default();
        assert_eq!(
            registry.select_pane(&mut doc, PaneRef { block: 0, pane: 5 }, &layout),
            None
        );
        assert_eq!(
            registry.select_pane(&mut doc, PaneRef { block: 3, pane: 0 }, &layout),
            None
        );
    }

    #[test]
    fn test_locate_header_from_anchor() {
        let (doc, registry) = mount(PLAIN);
        let header = registry.blocks()[0].panes()[1].header;
        let anchor = doc.element_children(header)[0];
        assert_eq!(
            registry.locate_header(&doc, anchor),
            Some(PaneRef { block: 0, pane: 1 })
        );
        let body = registry.blocks()[0].panes()[1].body;
        assert_eq!(registry.locate_header(&doc, body), None);
    }

    #[test]
    fn test_dl_without_code_is_not_a_tab_block() {
        let (doc, registry) = mount("<dl><dt>Term</dt><dd>Definition</dd></dl>");
        assert!(registry.blocks().is_empty());
        assert_eq!(doc.render(), "<dl><dt>Term</dt><dd>Definition</dd></dl>");
    }

    #[test]
    fn test_pane_tags_and_initial_selection() {
        let (doc, registry) = mount(concat!(
            r#"<div class="supergroup" name="lang"><span class="group">Scala</span><span class="group">Java</span></div>"#,
            r#"<dl><dt>Java</dt><dd><pre class="prettyprint group-java">j</pre></dd>"#,
            r#"<dt>Scala</dt><dd class="tab-group-scala"><pre>s</pre></dd></dl>"#,
        ));
        let block = &registry.blocks()[0];
        let tags: Vec<_> = block
            .panes()
            .iter()
            .map(|p| p.tag.as_ref().map(GroupId::as_str))
            .collect();
        assert_eq!(tags, [Some("group-java"), Some("group-scala")]);
        // default for "lang" is scala, the second pane
        assert_eq!(block.current(), 1);
        assert!(doc.is_hidden(block.panes()[0].body));
    }
}
