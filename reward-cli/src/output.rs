//! Output Formatting
//!
//! Run summaries in JSON or plain text. Summaries go to stdout; logs and
//! errors go to stderr.

use reward_bridge::RunReport;
use reward_core::{ReshapeStats, SchemaVariant};
use serde::Serialize;
use std::path::Path;

use crate::commands::OutputFormat;

/// Print as JSON
fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error formatting JSON: {}", e),
    }
}

/// Format a label/value row
fn row(key: &str, value: impl std::fmt::Display) -> String {
    format!("{:<12} {}", format!("{}:", key), value)
}

/// Plain-text lines describing reshape counts
pub fn stats_lines(stats: &ReshapeStats) -> Vec<String> {
    vec![
        row("Months", stats.months),
        row("Files", stats.files),
        row("Recipients", stats.recipients),
        row("Claims", stats.claims),
    ]
}

/// Print the summary of a publishing run
pub fn print_run_report(report: &RunReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Plain => {
            println!("Regroup Complete");
            println!("================");
            println!("{}", row("Variant", report.variant));
            println!("{}", row("Repository", &report.repo));
            println!("{}", row("Branch", &report.receipt.branch));
            println!("{}", row("Path", &report.receipt.path));
            println!("{}", row("Parent", &report.receipt.parent_sha));
            println!("{}", row("Commit", &report.receipt.commit_sha));
            println!();
            for line in stats_lines(&report.stats) {
                println!("{}", line);
            }
        }
    }
}

#[derive(Serialize)]
struct PreviewSummary<'a> {
    variant: SchemaVariant,
    output: String,
    stats: &'a ReshapeStats,
}

/// Print the summary of a preview written to a file
pub fn print_preview_summary(
    variant: SchemaVariant,
    stats: &ReshapeStats,
    path: &Path,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => print_json(&PreviewSummary {
            variant,
            output: path.display().to_string(),
            stats,
        }),
        OutputFormat::Plain => {
            println!("Preview Written");
            println!("===============");
            println!("{}", row("Variant", variant));
            println!("{}", row("Output", path.display()));
            println!();
            for line in stats_lines(stats) {
                println!("{}", line);
            }
        }
    }
}
