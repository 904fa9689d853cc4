//! [`PageBuilder`] for rendered pages carrying switchable content.
//!
//! Pages are assembled from the same markup the documentation generator
//! emits, so tests exercise the real discovery rules.

use tabsync_dom::Document;

/// One header/body pair of a tab block
#[derive(Debug, Clone)]
pub struct TabSpec {
    header: String,
    class: Option<String>,
    body: String,
    note: Option<String>,
}

impl TabSpec {
    /// A pane with no group classification
    pub fn plain(header: &str, body: &str) -> Self {
        Self {
            header: header.to_string(),
            class: None,
            body: body.to_string(),
            note: None,
        }
    }

    /// A pane whose `pre` carries `class` (e.g. `group-maven`)
    pub fn tagged(header: &str, class: &str, body: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            ..Self::plain(header, body)
        }
    }

    /// Add a `blockquote` note after the code
    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }
}

/// Builds a page body piece by piece.
///
/// # Example
///
/// ```rust
/// use tabsync_test_utils::{PageBuilder, TabSpec};
///
/// let html = PageBuilder::new()
///     .supergroup("build", &["sbt", "Maven"])
///     .tabs(&[
///         TabSpec::tagged("sbt", "group-sbt", "libraryDependencies += x"),
///         TabSpec::tagged("Maven", "group-maven", "<dependency/>"),
///     ])
///     .build();
/// assert!(html.contains("class=\"supergroup\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageBuilder {
    parts: Vec<String>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a supergroup with text labels
    pub fn supergroup(mut self, name: &str, labels: &[&str]) -> Self {
        let groups: String = labels
            .iter()
            .map(|label| format!(r#"<span class="group">{}</span>"#, escape(label)))
            .collect();
        self.parts.push(format!(
            r#"<div class="supergroup" name="{}">{groups}</div>"#,
            escape(name)
        ));
        self
    }

    /// Declare a supergroup as a dropdown, one `(value, label)` per option
    pub fn dropdown_supergroup(mut self, name: &str, options: &[(&str, &str)]) -> Self {
        let options: String = options
            .iter()
            .map(|(value, label)| {
                format!(
                    r#"<option class="group" value="{}">{}</option>"#,
                    escape(value),
                    escape(label)
                )
            })
            .collect();
        self.parts.push(format!(
            r#"<select class="supergroup" name="{}">{options}</select>"#,
            escape(name)
        ));
        self
    }

    /// A dropdown that only mirrors a supergroup declared elsewhere
    pub fn dropdown(mut self, options: &[(&str, &str)]) -> Self {
        let options: String = options
            .iter()
            .map(|(value, label)| {
                format!(r#"<option value="{}">{}</option>"#, escape(value), escape(label))
            })
            .collect();
        self.parts.push(format!("<select>{options}</select>"));
        self
    }

    pub fn tabs(mut self, panes: &[TabSpec]) -> Self {
        let mut block = String::from("<dl>");
        for pane in panes {
            block.push_str(&format!("<dt>{}</dt><dd>", escape(&pane.header)));
            match &pane.class {
                Some(class) => block.push_str(&format!(r#"<pre class="{}">"#, escape(class))),
                None => block.push_str("<pre>"),
            }
            block.push_str(&escape(&pane.body));
            block.push_str("</pre>");
            if let Some(note) = &pane.note {
                block.push_str(&format!("<blockquote>{}</blockquote>", escape(note)));
            }
            block.push_str("</dd>");
        }
        block.push_str("</dl>");
        self.parts.push(block);
        self
    }

    /// Inline text shown only while `group` is selected
    pub fn span(mut self, group: &str, text: &str) -> Self {
        self.parts.push(format!(
            r#"<p><span class="{}">{}</span></p>"#,
            escape(group),
            escape(text)
        ));
        self
    }

    /// The `#version-warning` slot the version banner goes into
    pub fn version_slot(mut self) -> Self {
        self.parts.push(r#"<div id="version-warning"></div>"#.to_string());
        self
    }

    /// Arbitrary markup, inserted verbatim
    pub fn raw(mut self, markup: &str) -> Self {
        self.parts.push(markup.to_string());
        self
    }

    pub fn build(&self) -> String {
        format!("<html><body>{}</body></html>", self.parts.join("\n"))
    }

    pub fn document(&self) -> Document {
        Document::parse(&self.build()).unwrap()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The "build" scenario: sbt/maven declared once, two tagged tab blocks, an
/// inline span per tool and a mirroring dropdown.
pub fn build_tools_page() -> PageBuilder {
    PageBuilder::new()
        .supergroup("build", &["sbt", "Maven"])
        .tabs(&[
            TabSpec::tagged("sbt", "prettyprint group-sbt", "libraryDependencies += \"a\""),
            TabSpec::tagged("Maven", "prettyprint group-maven", "<dependency>\n  <artifactId>a</artifactId>\n</dependency>"),
        ])
        .span("group-sbt", "Run sbt compile.")
        .span("group-maven", "Run mvn compile.")
        .tabs(&[
            TabSpec::tagged("sbt", "group-sbt", "sbt test"),
            TabSpec::tagged("Maven", "group-maven", "mvn test"),
        ])
        .dropdown(&[("group-sbt", "sbt"), ("group-maven", "Maven")])
}

/// Two supergroups sharing one page
pub fn languages_and_build_page() -> PageBuilder {
    build_tools_page()
        .supergroup("language", &["Scala", "Java"])
        .tabs(&[
            TabSpec::tagged("Scala", "group-scala", "val x = 1"),
            TabSpec::tagged("Java", "group-java", "int x = 1;"),
        ])
        .span("group-java", "Java users read this.")
}

/// A single tab block with no group tags
pub fn plain_tabs_page() -> PageBuilder {
    PageBuilder::new().tabs(&[
        TabSpec::plain("First", "one"),
        TabSpec::plain("Second", "two\nlines").with_note("careful"),
        TabSpec::plain("Third", "three"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_escapes_bodies() {
        let html = PageBuilder::new()
            .tabs(&[TabSpec::plain("A", "<b>")])
            .build();
        assert!(html.contains("<pre>&lt;b&gt;</pre>"));
    }

    #[test]
    fn test_canned_pages_parse() {
        for page in [build_tools_page(), languages_and_build_page(), plain_tabs_page()] {
            let doc = page.document();
            assert!(!doc.select_by_tag("dl").is_empty());
        }
    }
}
