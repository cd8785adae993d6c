//! Statistics aggregation over task record collections.
//!
//! `aggregate` is a pure function; it never fails. Empty or all-unfinished
//! inputs degrade to zero rates with the counts still visible, so reporting
//! on a sparse root is diagnosable rather than an error.

pub mod csv;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::record::{TaskRecord, TaskStatus};
use crate::ingest::scanner::{SkippedLog, scan_log_root};
use crate::{ViewerError, ViewerResult};

/// Derived, stateless summary over a task record collection.
///
/// Rates are percentages in [0,100], each computed over its own denominator.
/// Means over steps/queries/mcp calls cover finished records only, so
/// truncated runs do not skew them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total: usize,
    pub finished: usize,
    pub success: usize,
    pub success_rate: f64,
    pub standard_success_rate: f64,
    pub mcp_success_rate: f64,
    pub user_interaction_success_rate: f64,
    /// Mean ui_interaction_quality over records carrying the score.
    pub uiq: f64,
    pub avg_steps: f64,
    pub avg_queries: f64,
    pub avg_mcp_calls: f64,
}

/// 100 * numerator / denominator, reporting 0.0 for an empty denominator.
fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        100.0 * numerator as f64 / denominator as f64
    }
}

/// Mean of the values, 0.0 when there are none.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0_f64, 0_usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Rate of successes among records selected by `member`.
fn category_rate(records: &[TaskRecord], member: impl Fn(&TaskRecord) -> bool) -> f64 {
    let denominator = records.iter().filter(|r| member(r)).count();
    let successes = records
        .iter()
        .filter(|r| member(r) && r.status == TaskStatus::Success)
        .count();
    rate(successes, denominator)
}

/// Reduce a task record collection to one `AggregateStats`.
pub fn aggregate(records: &[TaskRecord]) -> AggregateStats {
    let total = records.len();
    let finished = records.iter().filter(|r| r.status.is_finished()).count();
    let success = records
        .iter()
        .filter(|r| r.status == TaskStatus::Success)
        .count();

    let finished_records = || records.iter().filter(|r| r.status.is_finished());

    AggregateStats {
        total,
        finished,
        success,
        success_rate: rate(success, total),
        standard_success_rate: category_rate(records, |r| r.categories.is_standard()),
        mcp_success_rate: category_rate(records, |r| r.categories.mcp),
        user_interaction_success_rate: category_rate(records, |r| r.categories.ui_interaction),
        uiq: mean(records.iter().filter_map(|r| r.ui_interaction_quality)),
        avg_steps: mean(finished_records().map(|r| r.step_count as f64)),
        avg_queries: mean(finished_records().map(|r| r.query_count as f64)),
        avg_mcp_calls: mean(finished_records().map(|r| r.mcp_call_count as f64)),
    }
}

/// Per-root summary for the reporting surface.
#[derive(Debug, Clone)]
pub struct RootSummary {
    pub root: PathBuf,
    pub display_name: String,
    pub stats: AggregateStats,
    pub skipped: Vec<SkippedLog>,
}

/// Batch summary over several log roots.
#[derive(Debug, Clone, Default)]
pub struct RootSummaries {
    pub summaries: Vec<RootSummary>,
    /// Roots that did not exist; reported individually, never aborting
    /// the rest of the batch.
    pub missing: Vec<PathBuf>,
}

/// Summarize one or more log roots, skipping missing ones with a warning.
pub fn summarize_roots(roots: &[PathBuf]) -> ViewerResult<RootSummaries> {
    let mut result = RootSummaries::default();

    for root in roots {
        match scan_log_root(root) {
            Ok(scanned) => {
                result.summaries.push(RootSummary {
                    root: scanned.root.clone(),
                    display_name: scanned.display_name.clone(),
                    stats: aggregate(&scanned.records),
                    skipped: scanned.skipped,
                });
            }
            Err(ViewerError::LogRootNotFound(path)) => {
                warn!(root = %path.display(), "log root does not exist, skipping");
                result.missing.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Categories;

    fn record(task_id: &str, status: TaskStatus) -> TaskRecord {
        TaskRecord {
            task_id: task_id.to_string(),
            status,
            categories: Categories::default(),
            step_count: 0,
            query_count: 0,
            mcp_call_count: 0,
            ui_interaction_quality: None,
        }
    }

    #[test]
    fn test_empty_collection_is_all_zeros() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.finished, 0);
        assert_eq!(stats.success, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.standard_success_rate, 0.0);
        assert_eq!(stats.mcp_success_rate, 0.0);
        assert_eq!(stats.user_interaction_success_rate, 0.0);
        assert_eq!(stats.uiq, 0.0);
        assert_eq!(stats.avg_steps, 0.0);
    }

    #[test]
    fn test_counts_are_ordered() {
        let records = vec![
            record("a", TaskStatus::Success),
            record("b", TaskStatus::Failure),
            record("c", TaskStatus::Unfinished),
        ];
        let stats = aggregate(&records);
        assert!(stats.success <= stats.finished);
        assert!(stats.finished <= stats.total);
        assert!(stats.success_rate >= 0.0 && stats.success_rate <= 100.0);
    }

    #[test]
    fn test_unfinished_excluded_from_finished_and_averages() {
        let mut unfinished = record("u", TaskStatus::Unfinished);
        unfinished.step_count = 1000;
        let mut done = record("d", TaskStatus::Success);
        done.step_count = 10;

        let stats = aggregate(&[unfinished, done]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.finished, 1);
        assert_eq!(stats.avg_steps, 10.0);
    }

    #[test]
    fn test_spec_scenario_two_standard_one_unfinished_mcp() {
        // 2 success/standard, 1 unfinished/mcp
        let mut mcp = record("m", TaskStatus::Unfinished);
        mcp.categories.mcp = true;
        let records = vec![
            record("s1", TaskStatus::Success),
            record("s2", TaskStatus::Success),
            mcp,
        ];

        let stats = aggregate(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.finished, 2);
        assert_eq!(stats.success, 2);
        assert!((stats.success_rate - 66.666).abs() < 0.01);
        assert_eq!(stats.standard_success_rate, 100.0);
        // mcp task is unfinished: denominator 1, numerator 0
        assert_eq!(stats.mcp_success_rate, 0.0);
    }

    #[test]
    fn test_record_counts_in_multiple_category_rates() {
        let mut both = record("b", TaskStatus::Success);
        both.categories.mcp = true;
        both.categories.ui_interaction = true;

        let stats = aggregate(&[both]);
        assert_eq!(stats.mcp_success_rate, 100.0);
        assert_eq!(stats.user_interaction_success_rate, 100.0);
        assert_eq!(stats.standard_success_rate, 0.0);
    }

    #[test]
    fn test_uiq_mean_over_eligible_records_only() {
        let mut ui1 = record("u1", TaskStatus::Success);
        ui1.categories.ui_interaction = true;
        ui1.ui_interaction_quality = Some(0.8);
        let mut ui2 = record("u2", TaskStatus::Failure);
        ui2.categories.ui_interaction = true;
        ui2.ui_interaction_quality = Some(0.4);
        let plain = record("p", TaskStatus::Success);

        let stats = aggregate(&[ui1, ui2, plain]);
        assert!((stats.uiq - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_all_unfinished_degrades_to_zero_averages() {
        let records = vec![
            record("a", TaskStatus::Unfinished),
            record("b", TaskStatus::Unfinished),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.finished, 0);
        assert_eq!(stats.avg_steps, 0.0);
        assert_eq!(stats.avg_queries, 0.0);
        assert_eq!(stats.avg_mcp_calls, 0.0);
    }

    #[test]
    fn test_mcp_tag_with_zero_calls_in_denominator() {
        let mut tagged = record("t", TaskStatus::Failure);
        tagged.categories.mcp = true;
        // mcp_call_count stays 0: membership is the declared tag
        let stats = aggregate(&[tagged]);
        assert_eq!(stats.mcp_success_rate, 0.0);

        let mut tagged_ok = record("t2", TaskStatus::Success);
        tagged_ok.categories.mcp = true;
        let stats = aggregate(&[tagged_ok]);
        assert_eq!(stats.mcp_success_rate, 100.0);
    }
}
