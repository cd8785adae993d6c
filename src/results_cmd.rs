//! CLI command handler for `results`.
//!
//! Prints a summary table with one row per log root. Missing roots are
//! warned about individually and never abort the batch.

use std::path::PathBuf;

use crate::ViewerResult;
use crate::stats::csv::CsvExporter;
use crate::stats::{RootSummary, summarize_roots};

const NAME_HEADER: &str = "Log Root";

fn print_table(summaries: &[RootSummary]) {
    let name_width = summaries
        .iter()
        .map(|s| s.display_name.len())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(NAME_HEADER.len());

    println!(
        "{:<name_width$}  {:>6} {:>8} {:>7} {:>6} {:>7} {:>7} {:>6} {:>6} {:>9} {:>11} {:>7}",
        NAME_HEADER,
        "Total",
        "Finished",
        "Success",
        "SR%",
        "Std SR%",
        "MCP SR%",
        "UI SR%",
        "UIQ",
        "Avg Steps",
        "Avg Queries",
        "Avg MCP",
    );

    for summary in summaries {
        let s = &summary.stats;
        println!(
            "{:<name_width$}  {:>6} {:>8} {:>7} {:>6.1} {:>7.1} {:>7.1} {:>6.1} {:>6.3} {:>9.1} {:>11.2} {:>7.2}",
            summary.display_name,
            s.total,
            s.finished,
            s.success,
            s.success_rate,
            s.standard_success_rate,
            s.mcp_success_rate,
            s.user_interaction_success_rate,
            s.uiq,
            s.avg_steps,
            s.avg_queries,
            s.avg_mcp_calls,
        );
    }
}

/// Run the `results` command over one or more log roots.
pub fn run(log_dirs: Vec<PathBuf>, csv_output: Option<PathBuf>) -> ViewerResult<()> {
    let batch = summarize_roots(&log_dirs)?;

    for missing in &batch.missing {
        eprintln!("Warning: {} does not exist, skipping.", missing.display());
    }

    print_table(&batch.summaries);

    // Every skipped unit is enumerated, never silently dropped.
    for summary in &batch.summaries {
        for skipped in &summary.skipped {
            eprintln!(
                "Warning: skipped malformed task log in {}: {}",
                summary.display_name, skipped.reason
            );
        }
    }

    if let Some(path) = csv_output {
        CsvExporter::new().export(&batch.summaries, &path)?;
        eprintln!("Wrote CSV summary to: {}", path.display());
    }

    Ok(())
}
