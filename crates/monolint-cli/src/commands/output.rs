//! Shared output formatting for lint reports.

use anyhow::Result;
use monolint::{FindingDiagnostic, LintReport};

use crate::OutputFormat;

/// Print a lint report in the specified format.
pub fn print(report: &LintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &LintReport) {
    let (valid, invalid) = report.count_by_validity();

    for result in &report.results {
        if result.valid {
            println!("\x1b[32mok\x1b[0m {}", result.resource.display());
        } else {
            let report = miette::Report::new(FindingDiagnostic::from(result));
            println!("{report:?}");
        }
    }

    let summary_color = if invalid > 0 { "\x1b[31m" } else { "\x1b[32m" };

    println!(
        "{}Found {} invalid, {} valid finding(s) in {} module(s)\x1b[0m",
        summary_color, invalid, valid, report.modules_checked
    );
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &LintReport) {
    for result in &report.results {
        println!("{result}");
    }
}
