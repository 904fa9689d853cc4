//! Multi-page lifecycle scenarios: one visitor, several pages, one store

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tabsync_core::version::{VersionData, check, inject_warning};
use tabsync_core::{Config, Controller, GroupId, SupergroupName};
use tabsync_store::{CookieJar, FileStore, PreferenceStore};
use tabsync_test_utils::page::build_tools_page;
use tabsync_test_utils::{PageBuilder, TabSpec, TestSite};

fn languages_only_page() -> PageBuilder {
    PageBuilder::new()
        .supergroup("language", &["Scala", "Java"])
        .tabs(&[
            TabSpec::tagged("Scala", "group-scala", "println(1)"),
            TabSpec::tagged("Java", "group-java", "System.out.println(1);"),
        ])
}

fn selected(controller: &Controller, supergroup: &str) -> Option<String> {
    controller
        .engine()
        .selection()
        .get(&SupergroupName::new(supergroup).unwrap())
        .map(|g| g.as_str().to_string())
}

fn new_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn eighteen_months_later() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 7, 1, 0, 0, 0).unwrap()
}

#[test]
fn test_choices_made_on_different_pages_accumulate() {
    let config = Config::default();

    let mut build = Controller::start(build_tools_page().document(), Box::new(CookieJar::new()), &config);
    build.engine_mut().switch_to_group("build", "maven");
    let (_, jar) = build.into_parts();

    let mut languages = Controller::start(languages_only_page().document(), jar, &config);
    assert_eq!(selected(&languages, "language").as_deref(), Some("group-scala"));
    languages.engine_mut().switch_to_group("language", "java");
    let (_, jar) = languages.into_parts();

    assert_eq!(
        jar.read("groupsPref").as_deref(),
        Some(r#"{"build":"group-maven","language":"group-java"}"#)
    );

    let build_again = Controller::start(build_tools_page().document(), jar, &config);
    assert_eq!(selected(&build_again, "build").as_deref(), Some("group-maven"));
    let blocks = build_again.engine().registry().blocks();
    assert!(blocks.iter().all(|b| b.current() == 1));
}

#[test]
fn test_cookie_jar_keeps_the_map_encoding() {
    let mut controller = Controller::start(
        build_tools_page().document(),
        Box::new(CookieJar::with_clock(new_year)),
        &Config::default(),
    );
    controller.engine_mut().switch_to_group("build", "maven");
    let (_, jar) = controller.into_parts();

    assert_eq!(
        jar.read("groupsPref").as_deref(),
        Some(r#"{"build":"group-maven"}"#)
    );
}

#[test]
fn test_expired_preference_falls_back_to_defaults() {
    let site = TestSite::new();
    let path = site.store_path();
    let config = Config::default();

    let mut first = Controller::start(
        build_tools_page().document(),
        Box::new(FileStore::with_clock(&path, new_year)),
        &config,
    );
    first.engine_mut().switch_to_group("build", "maven");
    drop(first);

    let later = Controller::start(
        build_tools_page().document(),
        Box::new(FileStore::with_clock(&path, eighteen_months_later)),
        &config,
    );
    assert_eq!(selected(&later, "build").as_deref(), Some("group-sbt"));
    assert!(later.engine().record().is_empty());
}

#[test]
fn test_short_ttl_from_config() {
    let site = TestSite::new();
    let config_path = site.write_config("ttl_days = 30\n");
    let config = Config::load(&config_path).unwrap();
    let path = site.store_path();

    let mut first = Controller::start(
        build_tools_page().document(),
        Box::new(FileStore::with_clock(&path, new_year)),
        &config,
    );
    first.engine_mut().switch_to_group("build", "maven");
    drop(first);

    let entries = FileStore::with_clock(&path, new_year).entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1.expires, new_year() + chrono::Duration::days(30));
}

#[test]
fn test_version_banner_and_switching_are_independent() {
    let page = build_tools_page().version_slot();
    let mut controller = Controller::start(page.document(), Box::new(CookieJar::new()), &Config::default());
    controller.engine_mut().switch_to_group("build", "maven");
    let (mut document, _) = controller.into_parts();

    let data = VersionData {
        version: "0.9.0".into(),
    };
    let warning = check("0.8.0", &data, "https://example.org").unwrap();
    assert!(inject_warning(&mut document, &warning));

    let banner = document.find_by_id("floaty-warning").unwrap();
    assert!(document.text_content(banner).contains("regards version 0.8.0"));
    let maven = GroupId::parse("maven").unwrap();
    let maven_pre = document
        .select_by_class(maven.as_str())
        .into_iter()
        .find(|n| document.element(*n).is_some_and(|e| e.is("pre")))
        .unwrap();
    let maven_body = document.parent(maven_pre).unwrap();
    assert!(!document.is_hidden(maven_body));
}
