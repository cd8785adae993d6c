//! Log ingestion: per-task parsing and log-root scanning.

pub mod parser;
pub mod scanner;

pub use parser::parse_task_log;
pub use scanner::{ScannedRoot, SkippedLog, scan_log_root};
