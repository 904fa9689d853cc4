//! Tests for markup parsing and rendering

use pretty_assertions::assert_eq;
use rstest::rstest;
use tabsync_dom::{Document, Element, NodeData};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Build &amp; Run</title></head>
<body>
<!-- generated -->
<select class="supergroup" name="Build"><option class="group" value="group-sbt" selected>sbt</option><option class="group" value="group-maven">Maven</option></select>
<dl>
<dt>sbt</dt>
<dd><pre class="prettyprint group-sbt">libraryDependencies += "x" % "y" % "1.0"</pre></dd>
<dt>Maven</dt>
<dd><pre class="prettyprint group-maven">&lt;dependency/&gt;</pre></dd>
</dl>
<p>Run with <span class="group-sbt">sbt run</span><span class="group-maven">mvn exec:java</span>.</p>
</body>
</html>"#;

#[test]
fn test_untouched_page_renders_verbatim_modulo_valueless_attributes() {
    let doc = Document::parse(PAGE).unwrap();
    let expected = PAGE.replace(" selected>", " selected=\"\">");
    assert_eq!(doc.render(), expected);
}

#[test]
fn test_doctype_and_comment_are_preserved() {
    let doc = Document::parse(PAGE).unwrap();
    let kinds: Vec<_> = doc
        .children(doc.root())
        .iter()
        .filter_map(|c| match doc.data(*c) {
            Some(NodeData::Raw(raw)) => Some(raw.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, ["<!DOCTYPE html>"]);
    assert!(doc.render().contains("<!-- generated -->"));
}

#[rstest]
#[case("span", 2)]
#[case("dt", 2)]
#[case("option", 2)]
#[case("meta", 1)]
fn test_select_by_tag_counts(#[case] tag: &str, #[case] expected: usize) {
    let doc = Document::parse(PAGE).unwrap();
    assert_eq!(doc.select_by_tag(tag).len(), expected);
}

#[test]
fn test_attributes_and_text() {
    let doc = Document::parse(PAGE).unwrap();
    let select = doc.select_by_class("supergroup")[0];
    assert_eq!(doc.attr(select, "name"), Some("Build"));

    let maven_pre = doc.select_by_class("group-maven")[0];
    assert_eq!(doc.text_content(maven_pre), "<dependency/>");

    let title = doc.select_by_tag("title")[0];
    assert_eq!(doc.text_content(title), "Build & Run");
}

#[test]
fn test_mutations_show_up_in_render() {
    let mut doc = Document::parse("<dl><dt>A</dt><dd><pre>a</pre></dd></dl>").unwrap();
    let dl = doc.select_by_tag("dl")[0];
    let dd = doc.select_by_tag("dd")[0];
    doc.add_class(dl, "tabbed");
    doc.set_style(dl, "height", Some("40px"));
    doc.hide(dd);
    assert_eq!(
        doc.render(),
        r#"<dl class="tabbed" style="height: 40px;"><dt>A</dt><dd style="display: none;"><pre>a</pre></dd></dl>"#
    );
}

#[test]
fn test_self_closing_elements_render_self_closed() {
    let doc = Document::parse(r#"<div><img src="a.png"/></div>"#).unwrap();
    assert_eq!(doc.render(), r#"<div><img src="a.png"/></div>"#);
}

#[test]
fn test_new_document_builds_from_scratch() {
    let mut doc = Document::new();
    let root = doc.root();
    let div = doc.append_element(root, Element::new("div").with_attr("id", "version-warning"));
    doc.append_text(div, "hi");
    assert_eq!(doc.render(), r#"<div id="version-warning">hi</div>"#);
    assert_eq!(doc.find_by_id("version-warning"), Some(div));
}
