//! Log-root scanner: discovers task logs under a directory and parses them.
//!
//! A single corrupt task log must not abort the scan of the remaining root:
//! malformed logs are warned about, excluded from the record collection, and
//! collected in `skipped` so callers can enumerate them in a final summary.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::record::TaskRecord;
use crate::ingest::parser::parse_task_log;
use crate::{ViewerError, ViewerResult};

/// One task log that failed to parse during a scan.
#[derive(Debug, Clone)]
pub struct SkippedLog {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning one log root: a read-only view over on-disk state at
/// scan time. Re-scanning re-reads from disk.
#[derive(Debug, Clone)]
pub struct ScannedRoot {
    pub root: PathBuf,
    pub display_name: String,
    pub records: Vec<TaskRecord>,
    pub skipped: Vec<SkippedLog>,
}

/// Resolve a directory entry to a task log file path, if it looks like one.
///
/// Two layouts are accepted: `<task_dir>/result.json` and a bare
/// `<name>.json` file directly under the root.
fn task_log_path(entry: &Path) -> Option<PathBuf> {
    if entry.is_dir() {
        let candidate = entry.join("result.json");
        if candidate.is_file() {
            return Some(candidate);
        }
        return None;
    }
    if entry.extension().is_some_and(|ext| ext == "json") {
        return Some(entry.to_path_buf());
    }
    None
}

fn display_name(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| root.display().to_string())
}

/// Scan a log root, yielding every parseable `TaskRecord` under it.
///
/// Entries are visited in file-name order, so the result ordering is stable
/// across scans of unchanged filesystem state.
///
/// # Errors
/// Returns `LogRootNotFound` if the path does not exist or is not a
/// directory. An empty directory is a valid root with zero records.
pub fn scan_log_root(root: &Path) -> ViewerResult<ScannedRoot> {
    if !root.is_dir() {
        return Err(ViewerError::LogRootNotFound(root.to_path_buf()));
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|e| ViewerError::Message(format!("failed to read {}: {e}", root.display())))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for entry in entries {
        let Some(log_path) = task_log_path(&entry) else {
            debug!(path = %entry.display(), "skipping non-task entry");
            continue;
        };

        match parse_task_log(&log_path) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(path = %log_path.display(), error = %e, "skipping malformed task log");
                skipped.push(SkippedLog {
                    path: log_path,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ScannedRoot {
        root: root.to_path_buf(),
        display_name: display_name(root),
        records,
        skipped,
    })
}
