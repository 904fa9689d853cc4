//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tabsync - Keep variant tabs of rendered documentation in sync
#[derive(Parser, Debug)]
#[command(name = "tabsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./tabsync.toml when present)
    #[arg(long, global = true, env = "TABSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Preference file standing in for the browser's cookie jar
    #[arg(long, global = true, env = "TABSYNC_STORE")]
    pub store: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the page-load pass and write the resulting markup
    Render {
        /// Rendered HTML page
        page: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the supergroups a page declares and their current selection
    Catalog {
        /// Rendered HTML page
        page: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Select a group everywhere on the page and remember the choice
    ///
    /// Examples:
    ///   tabsync switch index.html build maven
    ///   tabsync switch index.html language group-java -o out.html
    Switch {
        /// Rendered HTML page
        page: PathBuf,

        /// Supergroup name, e.g. "build"
        supergroup: String,

        /// Group as a label ("Maven") or identifier ("group-maven")
        group: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Simulate a click on one tab header
    Click {
        /// Rendered HTML page
        page: PathBuf,

        /// Tab block index, in document order
        #[arg(long)]
        block: usize,

        /// Pane index within the block
        #[arg(long)]
        pane: usize,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the stored preference
    Prefs {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Add the outdated-version banner when the page is not for the current release
    VersionCheck {
        /// Rendered HTML page
        page: PathBuf,

        /// Version the page was built for
        #[arg(long = "this")]
        this_version: String,

        /// Downloaded version data (paradox.json)
        #[arg(long)]
        data: PathBuf,

        /// Project url the banner links to
        #[arg(long)]
        project_url: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switch() {
        let cli = Cli::parse_from(["tabsync", "switch", "index.html", "build", "Maven", "-o", "out.html"]);
        assert_eq!(
            cli.command,
            Commands::Switch {
                page: PathBuf::from("index.html"),
                supergroup: "build".into(),
                group: "Maven".into(),
                output: Some(PathBuf::from("out.html")),
            }
        );
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from(["tabsync", "prefs", "--json", "--store", "p.json", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.store, Some(PathBuf::from("p.json")));
        assert_eq!(cli.command, Commands::Prefs { json: true });
    }

    #[test]
    fn test_version_check_flags() {
        let cli = Cli::parse_from([
            "tabsync",
            "version-check",
            "index.html",
            "--this",
            "1.0",
            "--data",
            "paradox.json",
            "--project-url",
            "https://example.org",
        ]);
        assert!(matches!(
            cli.command,
            Commands::VersionCheck { ref this_version, .. } if this_version == "1.0"
        ));
    }

    #[test]
    fn test_click_requires_indices() {
        assert!(Cli::try_parse_from(["tabsync", "click", "index.html", "--block", "0"]).is_err());
    }
}
