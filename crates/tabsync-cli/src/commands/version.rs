//! Outdated-version banner

use std::path::Path;

use colored::Colorize;
use tabsync_core::version::{check, inject_warning, parse_version_data, version_data_url};

use crate::context::{read_page, write_page};
use crate::error::Result;

pub fn run_version_check(
    page: &Path,
    this_version: &str,
    data: &Path,
    project_url: &str,
    output: Option<&Path>,
) -> Result<()> {
    tracing::debug!(url = %version_data_url(project_url), "version data location");
    let raw = std::fs::read_to_string(data).map_err(|e| tabsync_core::Error::io(data, e))?;
    let version_data = parse_version_data(&raw)?;

    let mut document = read_page(page)?;
    match check(this_version, &version_data, project_url) {
        Some(warning) => {
            if inject_warning(&mut document, &warning) {
                eprintln!(
                    "{} page is for {this_version}, current release is {}",
                    "Outdated:".yellow().bold(),
                    warning.current_version
                );
            } else {
                eprintln!(
                    "{} page is outdated but has no #version-warning element",
                    "warning:".yellow().bold()
                );
            }
        }
        None => eprintln!("{} {this_version} is the current release", "Current:".green()),
    }

    write_page(&document, output)
}
