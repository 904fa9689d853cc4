//! Catalog listing

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tabsync_core::Controller;

use crate::context::Context;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct CatalogReport<'a> {
    supergroups: Vec<SupergroupReport<'a>>,
    tab_blocks: usize,
    inline_spans: usize,
    dropdowns: usize,
}

#[derive(Debug, Serialize)]
struct SupergroupReport<'a> {
    name: &'a str,
    groups: Vec<&'a str>,
    selected: Option<&'a str>,
}

fn report(controller: &Controller) -> CatalogReport<'_> {
    let engine = controller.engine();
    let supergroups = engine
        .catalog()
        .iter()
        .map(|s| SupergroupReport {
            name: s.name().as_str(),
            groups: s.groups().iter().map(|g| g.as_str()).collect(),
            selected: engine.selection().get(s.name()).map(|g| g.as_str()),
        })
        .collect();
    CatalogReport {
        supergroups,
        tab_blocks: engine.registry().blocks().len(),
        inline_spans: engine.registry().spans().len(),
        dropdowns: engine.registry().dropdowns().len(),
    }
}

pub fn run_catalog(context: &Context, page: &Path, json: bool) -> Result<()> {
    let controller = context.start(page)?;
    let report = report(&controller);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.supergroups.is_empty() {
        println!("{}", "No supergroups declared.".dimmed());
    }
    for supergroup in &report.supergroups {
        let groups: Vec<String> = supergroup
            .groups
            .iter()
            .map(|g| {
                if Some(*g) == supergroup.selected {
                    format!("{}*", g.green().bold())
                } else {
                    g.to_string()
                }
            })
            .collect();
        println!("{}: {}", supergroup.name.cyan().bold(), groups.join(", "));
    }
    println!(
        "{} {} tab blocks, {} inline spans, {} dropdowns",
        "Blocks:".dimmed(),
        report.tab_blocks,
        report.inline_spans,
        report.dropdowns
    );
    Ok(())
}
