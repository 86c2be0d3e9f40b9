//! Check command implementation.

use anyhow::{Context, Result};
use monolint::{lint_with_config, Configuration};
use std::path::Path;

use crate::OutputFormat;

/// Runs the check command.
pub fn run(path: &Path, format: OutputFormat, config: Configuration, verbose: bool) -> Result<()> {
    tracing::info!("Checking {}", path.display());

    let report = lint_with_config(path, config, verbose).context("Lint failed")?;

    super::output::print(&report, format)?;

    if report.has_invalid() {
        std::process::exit(1);
    }

    Ok(())
}
