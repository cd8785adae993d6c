//! CLI command handler for `export`.
//!
//! Scans one log root, enumerates its routes, and writes the static site.

use std::path::PathBuf;

use crate::ViewerResult;
use crate::export::crawler::export_site;
use crate::export::routes::RoutePlan;
use crate::ingest::scanner::scan_log_root;
use crate::render::HtmlRenderer;

/// Run the `export` command.
///
/// A missing log root is fatal here (there is nothing to export); a failed
/// render of a single route is not, and is reported at the end.
pub fn run(log_dir: PathBuf, output: PathBuf) -> ViewerResult<()> {
    eprintln!("Scanning log root: {}", log_dir.display());
    let scanned = scan_log_root(&log_dir)?;
    eprintln!(
        "Found {} task(s), {} skipped",
        scanned.records.len(),
        scanned.skipped.len()
    );
    for skipped in &scanned.skipped {
        eprintln!(
            "Warning: skipping malformed task log {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }

    let plan = RoutePlan::build(&scanned);
    eprintln!("Enumerated {} route(s)", plan.routes.len());

    let renderer = HtmlRenderer::new(&scanned, &plan);
    let summary = export_site(&plan, &renderer, &output)?;

    eprintln!(
        "Wrote {} page(s) and {} asset(s) to: {}",
        summary.pages_written,
        summary.assets_written,
        output.display()
    );
    if !summary.failures.is_empty() {
        eprintln!("{} route(s) failed to render:", summary.failures.len());
        for failure in &summary.failures {
            eprintln!("  {}: {}", failure.url, failure.reason);
        }
    }
    eprintln!("Export complete.");
    Ok(())
}
