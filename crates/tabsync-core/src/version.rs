//! Outdated-documentation warning
//!
//! The published site exposes `paradox.json` next to its index, holding the
//! current release. A page built for any other version gets a banner
//! pointing at the project. Fetching the file is left to the caller.

use serde::{Deserialize, Serialize};
use tabsync_dom::{Document, Element};

/// File holding the current version, relative to the project url
pub const VERSION_DATA_FILE: &str = "paradox.json";

/// Element the warning banner is prepended into
pub const WARNING_CONTAINER_ID: &str = "version-warning";

/// Published version metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionData {
    pub version: String,
}

/// Strip an `http:` or `https:` scheme, keeping the protocol-relative `//host/...`
pub fn scheme_less(url: &str) -> &str {
    url.strip_prefix("https:")
        .or_else(|| url.strip_prefix("http:"))
        .unwrap_or(url)
}

/// Where the version data for `project_url` is published
pub fn version_data_url(project_url: &str) -> String {
    format!(
        "{}/{VERSION_DATA_FILE}",
        scheme_less(project_url).trim_end_matches('/')
    )
}

pub fn parse_version_data(json: &str) -> serde_json::Result<VersionData> {
    serde_json::from_str(json)
}

/// A page built for a version other than the published one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionWarning {
    pub this_version: String,
    pub current_version: String,
    pub project_url: String,
}

/// Compare the page's version against the published one
pub fn check(this_version: &str, data: &VersionData, project_url: &str) -> Option<VersionWarning> {
    if this_version == data.version {
        return None;
    }
    tracing::info!(
        this = this_version,
        current = %data.version,
        "documentation is not for the current version"
    );
    Some(VersionWarning {
        this_version: this_version.to_string(),
        current_version: data.version.clone(),
        project_url: project_url.to_string(),
    })
}

/// Prepend the banner into `#version-warning`.
///
/// Returns false, leaving the document unchanged, when the page has no such
/// element.
pub fn inject_warning(doc: &mut Document, warning: &VersionWarning) -> bool {
    let Some(container) = doc.find_by_id(WARNING_CONTAINER_ID) else {
        tracing::debug!("page has no version warning container");
        return false;
    };

    let banner = doc.prepend_element(
        container,
        Element::new("div")
            .with_attr("id", "floaty-warning")
            .with_attr("class", "warning"),
    );
    let paragraph = doc.append_element(banner, Element::new("p"));
    let emphasis = doc.append_element(
        paragraph,
        Element::new("span").with_attr("style", "font-weight: bold"),
    );
    doc.append_text(
        emphasis,
        &format!(
            "This documentation regards version {}, however the current version is ",
            warning.this_version
        ),
    );
    let link = doc.append_element(
        emphasis,
        Element::new("a").with_attr("href", warning.project_url.as_str()),
    );
    doc.append_text(link, &warning.current_version);
    doc.append_text(emphasis, ".");
    true
}
