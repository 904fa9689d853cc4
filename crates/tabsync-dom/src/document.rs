//! Arena-backed document tree

use std::borrow::Cow;

use quick_xml::escape::{escape, resolve_html5_entity, unescape_with};

use crate::element::Element;
use crate::error::Result;
use crate::markup;

/// Handle to a node in a [`Document`].
///
/// Handles stay valid for the lifetime of the document; detached nodes remain
/// in the arena but are no longer reachable from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The synthetic root
    Root,
    Element(Element),
    /// Text in escaped source form
    Text(String),
    Comment(String),
    /// Doctype, processing instructions, CDATA: rendered verbatim
    Raw(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// An owned markup tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parse rendered HTML
    pub fn parse(source: &str) -> Result<Self> {
        markup::parse(source)
    }

    /// Serialize the tree back to markup
    pub fn render(&self) -> String {
        markup::render(self)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|n| &n.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    /// All element descendants of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.element(next).is_some() {
                out.push(next);
            }
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every element in the document in document order
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|s| *s == id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|s| self.element(*s).is_some())
    }

    /// Concatenated, entity-decoded text of `id` and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(id, &mut raw);
        decode_entities(&raw)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(NodeData::Text(text)) = self.data(id) {
            out.push_str(text);
        }
        for child in self.children(id) {
            self.collect_text(*child, out);
        }
    }

    pub fn find_by_id(&self, html_id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(html_id))
    }

    pub fn select_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|n| self.element(*n).is_some_and(|el| el.is(tag)))
            .collect()
    }

    pub fn select_by_class(&self, class: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id).is_some_and(|el| el.remove_attr(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|el| el.add_class(class))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|el| el.remove_class(class))
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.element(id)?.style(property)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: Option<&str>) {
        if let Some(el) = self.element_mut(id) {
            el.set_style(property, value);
        }
    }

    pub fn hide(&mut self, id: NodeId) {
        self.set_style(id, "display", Some("none"));
    }

    pub fn show(&mut self, id: NodeId) {
        self.set_style(id, "display", None);
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(Element::is_hidden)
    }

    /// Append a new element under `parent` and return its handle
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.insert_child(parent, None, NodeData::Element(element))
    }

    /// Insert a new element as the first child of `parent`
    pub fn prepend_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.insert_child(parent, Some(0), NodeData::Element(element))
    }

    /// Append plain text (escaped on insertion) under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let escaped: Cow<'_, str> = escape(text);
        self.insert_child(parent, None, NodeData::Text(escaped.into_owned()))
    }

    /// Detach every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let detached = std::mem::take(&mut node.children);
        for child in detached {
            self.nodes[child.0].parent = None;
        }
    }

    /// Append a node of any kind; used by the parser
    pub(crate) fn push_node(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        self.insert_child(parent, None, data)
    }

    /// Append raw (already escaped) text, merging with a trailing text node
    pub(crate) fn push_raw_text(&mut self, parent: NodeId, raw: &str) {
        if let Some(last) = self.nodes[parent.0].children.last().copied()
            && let NodeData::Text(existing) = &mut self.nodes[last.0].data
        {
            existing.push_str(raw);
            return;
        }
        self.insert_child(parent, None, NodeData::Text(raw.to_string()));
    }

    fn insert_child(&mut self, parent: NodeId, at: Option<usize>, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        let siblings = &mut self.nodes[parent.0].children;
        match at {
            Some(pos) => siblings.insert(pos.min(siblings.len()), id),
            None => siblings.push(id),
        }
        id
    }
}

/// Resolve HTML character references. A reference that does not resolve,
/// or a bare `&`, is kept literally.
fn decode_entities(raw: &str) -> String {
    if let Ok(text) = unescape_with(raw, resolve_html5_entity) {
        return text.into_owned();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').and_then(|end| {
            unescape_with(&tail[..=end], resolve_html5_entity)
                .ok()
                .map(|text| (text.into_owned(), end + 1))
        });
        match decoded {
            Some((text, consumed)) => {
                out.push_str(&text);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::parse(
            r#"<dl><dt>Scala</dt><dd><pre class="group-scala">val x = 1 &amp;&amp; 2</pre></dd><dt>Java</dt><dd><pre class="group-java">int x;</pre></dd></dl>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = sample();
        let tags: Vec<_> = doc
            .elements()
            .into_iter()
            .map(|n| doc.element(n).unwrap().tag().to_string())
            .collect();
        assert_eq!(tags, ["dl", "dt", "dd", "pre", "dt", "dd", "pre"]);
    }

    #[test]
    fn test_next_element_sibling() {
        let doc = sample();
        let dts = doc.select_by_tag("dt");
        let dd = doc.next_element_sibling(dts[0]).unwrap();
        assert!(doc.element(dd).unwrap().is("dd"));
        let last_dd = doc.select_by_tag("dd")[1];
        assert_eq!(doc.next_element_sibling(last_dd), None);
    }

    #[test]
    fn test_text_content_is_unescaped() {
        let doc = sample();
        let pre = doc.select_by_class("group-scala")[0];
        assert_eq!(doc.text_content(pre), "val x = 1 && 2");
    }

    #[test]
    fn test_text_content_resolves_html_entities() {
        let doc = Document::parse("<dt>Tom &amp; Jerry&nbsp;x &#233;t&eacute;</dt>").unwrap();
        let dt = doc.select_by_tag("dt")[0];
        assert_eq!(doc.text_content(dt), "Tom & Jerry\u{a0}x \u{e9}t\u{e9}");
    }

    #[test]
    fn test_unknown_reference_and_bare_ampersand_stay_literal() {
        let doc = Document::parse("<p>a &bogus; b &nbsp;c</p>").unwrap();
        let p = doc.select_by_tag("p")[0];
        assert_eq!(decode_entities("a & b &lt; c"), "a & b < c");
        assert_eq!(doc.text_content(p), "a &bogus; b \u{a0}c");
    }

    #[test]
    fn test_hide_and_show() {
        let mut doc = sample();
        let dd = doc.select_by_tag("dd")[0];
        doc.hide(dd);
        assert!(doc.is_hidden(dd));
        doc.show(dd);
        assert!(!doc.is_hidden(dd));
        assert_eq!(doc.attr(dd, "style"), None);
    }

    #[test]
    fn test_clear_children_and_append() {
        let mut doc = sample();
        let dt = doc.select_by_tag("dt")[0];
        doc.clear_children(dt);
        let a = doc.append_element(dt, Element::new("a").with_attr("href", "#tab0"));
        doc.append_text(a, "Scala <2>");
        assert_eq!(doc.text_content(dt), "Scala <2>");
        assert!(doc.render().contains(r##"<dt><a href="#tab0">Scala &lt;2&gt;</a></dt>"##));
    }

    #[test]
    fn test_prepend_element() {
        let mut doc = Document::parse(r#"<div id="banner"><p>old</p></div>"#).unwrap();
        let banner = doc.find_by_id("banner").unwrap();
        doc.prepend_element(banner, Element::new("hr"));
        assert_eq!(doc.render(), r#"<div id="banner"><hr><p>old</p></div>"#);
    }
}
