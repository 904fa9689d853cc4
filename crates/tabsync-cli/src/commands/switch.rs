//! Group switches and tab clicks

use std::path::Path;

use colored::Colorize;
use tabsync_core::{Event, SwitchOutcome};

use crate::context::{Context, write_page};
use crate::error::{CliError, Result};

pub fn run_switch(
    context: &Context,
    page: &Path,
    supergroup: &str,
    group: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut controller = context.start(page)?;

    match controller.engine_mut().switch_to_group(supergroup, group) {
        SwitchOutcome::Ignored => {
            return Err(CliError::user(format!(
                "'{group}' is not a group of supergroup '{supergroup}' on this page"
            )));
        }
        SwitchOutcome::Unchanged => {
            eprintln!("{} {supergroup} already shows {group}", "Unchanged:".yellow());
        }
        SwitchOutcome::Switched => {
            eprintln!("{} {supergroup} now shows {group}", "Switched:".green().bold());
        }
    }

    write_page(controller.document(), output)
}

pub fn run_click(
    context: &Context,
    page: &Path,
    block: usize,
    pane: usize,
    output: Option<&Path>,
) -> Result<()> {
    let mut controller = context.start(page)?;

    let header = controller
        .engine()
        .registry()
        .blocks()
        .get(block)
        .and_then(|b| b.panes().get(pane))
        .map(|p| p.header)
        .ok_or_else(|| CliError::user(format!("No pane {pane} in tab block {block}")))?;

    match controller.handle(Event::TabClick { header }) {
        SwitchOutcome::Ignored => {
            return Err(CliError::user(format!("Pane {pane} of block {block} cannot be selected")));
        }
        SwitchOutcome::Unchanged => {
            eprintln!("{} pane {pane} of block {block} is already current", "Unchanged:".yellow());
        }
        SwitchOutcome::Switched => {
            eprintln!("{} pane {pane} of block {block}", "Selected:".green().bold());
        }
    }

    write_page(controller.document(), output)
}
