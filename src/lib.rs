pub mod core;
pub mod export;
pub mod export_cmd;
pub mod ingest;
pub mod render;
pub mod results_cmd;
pub mod stats;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// The log root directory does not exist or is not a directory.
    #[error("log root not found: {0}")]
    LogRootNotFound(PathBuf),

    /// A single task log could not be minimally parsed.
    #[error("malformed task log {path}: {reason}")]
    MalformedLog { path: PathBuf, reason: String },

    /// Rendering one route failed; scoped to that route only.
    #[error("render failed for {url}: {reason}")]
    RenderFailure { url: String, reason: String },

    /// Writing to the export tree failed; fatal for the whole export.
    #[error("export write failed at {path}: {reason}")]
    ExportWrite { path: PathBuf, reason: String },

    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type ViewerResult<T> = Result<T, ViewerError>;

pub use crate::core::record::{Categories, TaskRecord, TaskStatus};
pub use crate::export::crawler::{ExportSummary, export_site};
pub use crate::export::routes::{Route, RoutePlan, ViewKind};
pub use crate::ingest::scanner::{ScannedRoot, scan_log_root};
pub use crate::render::{HtmlRenderer, RenderPage, RenderedPage};
pub use crate::stats::{AggregateStats, aggregate};
