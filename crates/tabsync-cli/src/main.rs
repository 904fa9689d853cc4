//! tabsync CLI
//!
//! Runs the switching engine over rendered pages, with a file standing in
//! for the browser's cookie jar.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = Context::resolve(cli.config.as_deref(), cli.store.as_deref())?;
    execute_command(&context, cli.command)
}

/// Log to stderr; `RUST_LOG` wins unless `--verbose` is given
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(context: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render { page, output } => commands::run_render(context, &page, output.as_deref()),
        Commands::Catalog { page, json } => commands::run_catalog(context, &page, json),
        Commands::Switch {
            page,
            supergroup,
            group,
            output,
        } => commands::run_switch(context, &page, &supergroup, &group, output.as_deref()),
        Commands::Click {
            page,
            block,
            pane,
            output,
        } => commands::run_click(context, &page, block, pane, output.as_deref()),
        Commands::Prefs { json } => commands::run_prefs(context, json),
        Commands::VersionCheck {
            page,
            this_version,
            data,
            project_url,
            output,
        } => commands::run_version_check(
            &page,
            &this_version,
            &data,
            &project_url,
            output.as_deref(),
        ),
    }
}
