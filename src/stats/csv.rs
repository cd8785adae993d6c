//! CSV export for per-root summary statistics.

use std::io::Write;
use std::path::Path;

use crate::ViewerError;
use crate::stats::RootSummary;

/// CSV column headers in deterministic order.
pub const CSV_HEADERS: &[&str] = &[
    "log_root",
    "total",
    "finished",
    "success",
    "success_rate",
    "standard_success_rate",
    "mcp_success_rate",
    "user_interaction_success_rate",
    "uiq",
    "avg_steps",
    "avg_queries",
    "avg_mcp_calls",
    "skipped_logs",
];

/// CSV exporter for root summaries.
///
/// One row per log root, matching the results table columns, with a flat
/// structure and deterministic column order for easy comparison.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        CsvExporter
    }

    /// Export summaries to a CSV file.
    pub fn export(&self, summaries: &[RootSummary], output: &Path) -> Result<(), ViewerError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ViewerError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let file = std::fs::File::create(output)
            .map_err(|e| ViewerError::Message(format!("failed to create file: {e}")))?;

        self.export_to_writer(summaries, file)
    }

    /// Export summaries to any writer implementing `Write`.
    pub fn export_to_writer<W: Write>(
        &self,
        summaries: &[RootSummary],
        writer: W,
    ) -> Result<(), ViewerError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(CSV_HEADERS)
            .map_err(|e| ViewerError::Message(format!("failed to write CSV headers: {e}")))?;

        for summary in summaries {
            let s = &summary.stats;
            let row = vec![
                summary.display_name.clone(),
                s.total.to_string(),
                s.finished.to_string(),
                s.success.to_string(),
                format!("{:.1}", s.success_rate),
                format!("{:.1}", s.standard_success_rate),
                format!("{:.1}", s.mcp_success_rate),
                format!("{:.1}", s.user_interaction_success_rate),
                format!("{:.3}", s.uiq),
                format!("{:.1}", s.avg_steps),
                format!("{:.2}", s.avg_queries),
                format!("{:.2}", s.avg_mcp_calls),
                summary.skipped.len().to_string(),
            ];
            csv_writer
                .write_record(&row)
                .map_err(|e| ViewerError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ViewerError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }
}
