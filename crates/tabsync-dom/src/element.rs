//! Element nodes: tag, attributes, classes and inline style

use crate::style::{format_style, parse_style};

/// An element node.
///
/// Attribute values are kept in their escaped source form so untouched
/// attributes render back exactly as they were parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    /// Written as `<tag/>` in the source
    pub(crate) self_closing: bool,
}

impl Element {
    /// Create an element with the given tag (lower-cased) and no attributes
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            self_closing: false,
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_ascii_lowercase(), value)),
        }
    }

    /// Remove an attribute. Returns true if it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.attrs.len() != before
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {class}", existing.trim())
            }
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let remaining = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", remaining);
        }
        true
    }

    /// Value of an inline style property
    pub fn style(&self, property: &str) -> Option<String> {
        let property = property.to_ascii_lowercase();
        parse_style(self.attr("style")?)
            .into_iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }

    /// Set or clear (`None`) an inline style property.
    ///
    /// The `style` attribute is dropped once it holds no declarations.
    pub fn set_style(&mut self, property: &str, value: Option<&str>) {
        let property = property.to_ascii_lowercase();
        let mut decls = self.attr("style").map(parse_style).unwrap_or_default();
        match value {
            Some(value) => match decls.iter_mut().find(|(p, _)| *p == property) {
                Some((_, v)) => *v = value.to_string(),
                None => decls.push((property, value.to_string())),
            },
            None => decls.retain(|(p, _)| *p != property),
        }
        if decls.is_empty() {
            self.remove_attr("style");
        } else {
            self.set_attr("style", format_style(&decls));
        }
    }

    /// Hidden elements carry `display: none`
    pub fn is_hidden(&self) -> bool {
        self.style("display").is_some_and(|v| v == "none")
    }

    pub(crate) fn push_raw_attr(&mut self, name: String, value: String) {
        self.attrs.push((name, value));
    }
}
