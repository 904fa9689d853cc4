//! Lenient HTML parsing and rendering
//!
//! Parsing rides on quick-xml's pull reader with the strict XML checks
//! relaxed: void elements never open a scope, `script`/`style` bodies are
//! taken verbatim, and stray end tags close up to the nearest open element of
//! the same name (or are dropped when nothing matches).

use std::fmt::Write as _;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::document::{Document, NodeData, NodeId};
use crate::element::Element;
use crate::error::{Error, Result};

/// Elements that never have content in HTML
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Parse rendered markup into a [`Document`]
pub fn parse(source: &str) -> Result<Document> {
    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut doc = Document::new();
    let root = doc.root();
    let mut open: Vec<NodeId> = vec![root];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::markup(reader.error_position() as u64, e.to_string()))?;
        let parent = open.last().copied().unwrap_or(root);

        match event {
            Event::Start(start) => {
                let element = element_from(&start, reader.buffer_position() as u64)?;
                let tag = element.tag().to_string();
                let id = doc.push_node(parent, NodeData::Element(element));
                if is_void(&tag) {
                    continue;
                }
                if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                    let body = reader
                        .read_text(start.name())
                        .map_err(|e| Error::markup(reader.buffer_position() as u64, e.to_string()))?;
                    if !body.is_empty() {
                        doc.push_raw_text(id, &body);
                    }
                    continue;
                }
                open.push(id);
            }
            Event::Empty(start) => {
                let mut element = element_from(&start, reader.buffer_position() as u64)?;
                element.self_closing = true;
                doc.push_node(parent, NodeData::Element(element));
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                match open
                    .iter()
                    .rposition(|n| doc.element(*n).is_some_and(|el| el.is(&name)))
                {
                    Some(pos) => open.truncate(pos),
                    None => tracing::debug!(tag = %name, "dropping unmatched end tag"),
                }
            }
            Event::Text(text) => doc.push_raw_text(parent, &String::from_utf8_lossy(&text)),
            Event::Eof => break,
            other => {
                let body = String::from_utf8_lossy(&other).into_owned();
                match other {
                    Event::Comment(_) => {
                        doc.push_node(parent, NodeData::Comment(body));
                    }
                    Event::CData(_) => {
                        doc.push_node(parent, NodeData::Raw(format!("<![CDATA[{body}]]>")));
                    }
                    Event::Decl(_) | Event::PI(_) => {
                        doc.push_node(parent, NodeData::Raw(format!("<?{body}?>")));
                    }
                    Event::DocType(_) => {
                        doc.push_node(parent, NodeData::Raw(format!("<!DOCTYPE {}>", body.trim())));
                    }
                    // Entity and character references arrive as their own events
                    _ => doc.push_raw_text(parent, &format!("&{body};")),
                }
            }
        }
    }

    Ok(doc)
}

fn element_from(start: &BytesStart<'_>, position: u64) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.html_attributes() {
        let attr = attr.map_err(|e| Error::markup(position, e.to_string()))?;
        element.push_raw_attr(
            String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase(),
            String::from_utf8_lossy(&attr.value).into_owned(),
        );
    }
    Ok(element)
}

/// Serialize a [`Document`] back to markup
pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    for child in doc.children(doc.root()) {
        render_node(doc, *child, &mut out);
    }
    out
}

fn render_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.data(id) {
        Some(NodeData::Element(el)) => {
            let children = doc.children(id);
            out.push('<');
            out.push_str(el.tag());
            for (name, value) in el.attrs() {
                let _ = write!(out, " {name}=\"{}\"", value.replace('"', "&quot;"));
            }
            if el.self_closing && children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            if is_void(el.tag()) && children.is_empty() {
                return;
            }
            for child in children {
                render_node(doc, *child, out);
            }
            let _ = write!(out, "</{}>", el.tag());
        }
        Some(NodeData::Text(text)) | Some(NodeData::Raw(text)) => out.push_str(text),
        Some(NodeData::Comment(text)) => {
            let _ = write!(out, "<!--{text}-->");
        }
        Some(NodeData::Root) => {
            for child in doc.children(id) {
                render_node(doc, *child, out);
            }
        }
        None => {}
    }
}
