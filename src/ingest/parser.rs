//! Parser for a single task's trajectory log.
//!
//! A task log is a JSON object with `task_id` as the only required field.
//! Partial logs are a first-class case: a log without a terminal status
//! parses to `TaskStatus::Unfinished` rather than failing.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::record::{Categories, TaskRecord, TaskStatus};
use crate::{ViewerError, ViewerResult};

/// On-disk shape of one task log. Everything except `task_id` is optional
/// so in-progress logs still parse.
#[derive(Debug, Deserialize)]
struct RawTaskLog {
    task_id: Option<String>,
    status: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    step_count: u64,
    #[serde(default)]
    query_count: u64,
    #[serde(default)]
    mcp_call_count: u64,
    ui_interaction_quality: Option<f64>,
}

fn malformed(path: &Path, reason: impl Into<String>) -> ViewerError {
    ViewerError::MalformedLog {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn parse_status(raw: Option<&str>, path: &Path) -> TaskStatus {
    match raw {
        Some("success") => TaskStatus::Success,
        Some("failure") | Some("failed") => TaskStatus::Failure,
        None => TaskStatus::Unfinished,
        Some(other) => {
            warn!(
                path = %path.display(),
                status = other,
                "unrecognized status, treating task as unfinished"
            );
            TaskStatus::Unfinished
        }
    }
}

fn parse_categories(tags: &[String], path: &Path) -> Categories {
    let mut categories = Categories::default();
    for tag in tags {
        match tag.as_str() {
            "mcp" => categories.mcp = true,
            "ui_interaction" | "ui-interaction" => categories.ui_interaction = true,
            // "standard" is the implied default, not a stored flag
            "standard" => {}
            other => {
                warn!(path = %path.display(), tag = other, "ignoring unknown category tag");
            }
        }
    }
    categories
}

/// Parse one task log file into a `TaskRecord`.
///
/// # Errors
/// Returns `MalformedLog` if the file cannot be read, is not valid JSON,
/// or lacks the required `task_id` field.
pub fn parse_task_log(path: &Path) -> ViewerResult<TaskRecord> {
    let contents =
        fs::read_to_string(path).map_err(|e| malformed(path, format!("unreadable: {e}")))?;

    let raw: RawTaskLog = serde_json::from_str(&contents)
        .map_err(|e| malformed(path, format!("invalid JSON: {e}")))?;

    let task_id = raw
        .task_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| malformed(path, "missing required field: task_id"))?;

    let status = parse_status(raw.status.as_deref(), path);
    let categories = parse_categories(&raw.categories, path);

    // UIQ is only meaningful for ui-interaction tasks; dropping it here keeps
    // the aggregate mean restricted to eligible records.
    let ui_interaction_quality = if categories.ui_interaction {
        raw.ui_interaction_quality
    } else {
        if raw.ui_interaction_quality.is_some() {
            debug!(
                path = %path.display(),
                "ui_interaction_quality present on a task not tagged ui-interaction, ignoring"
            );
        }
        None
    };

    Ok(TaskRecord {
        task_id,
        status,
        categories,
        step_count: raw.step_count,
        query_count: raw.query_count,
        mcp_call_count: raw.mcp_call_count,
        ui_interaction_quality,
    })
}
