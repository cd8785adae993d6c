//! Batch reporting tests: per-root stats, missing-root tolerance, and scan
//! idempotence.

use std::fs;
use std::path::Path;

use traj_viewer::stats::summarize_roots;
use traj_viewer::{aggregate, scan_log_root};

fn write_task(root: &Path, task_id: &str, contents: &str) {
    let dir = root.join(task_id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("result.json"), contents).unwrap();
}

#[test]
fn test_spec_scenario_rates() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("logs");
    fs::create_dir_all(&root).unwrap();
    write_task(&root, "s1", r#"{"task_id":"s1","status":"success"}"#);
    write_task(&root, "s2", r#"{"task_id":"s2","status":"success"}"#);
    write_task(&root, "m1", r#"{"task_id":"m1","categories":["mcp"]}"#);

    let scanned = scan_log_root(&root).unwrap();
    let stats = aggregate(&scanned.records);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.finished, 2);
    assert_eq!(stats.success, 2);
    assert!((stats.success_rate - 66.7).abs() < 0.1);
    assert_eq!(stats.standard_success_rate, 100.0);
    assert_eq!(stats.mcp_success_rate, 0.0);
}

#[test]
fn test_malformed_log_excluded_from_counts() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("logs");
    fs::create_dir_all(&root).unwrap();
    for i in 0..5 {
        write_task(
            &root,
            &format!("t{i}"),
            &format!(r#"{{"task_id":"t{i}","status":"success"}}"#),
        );
    }
    write_task(&root, "zz_corrupt", "not json at all");

    let scanned = scan_log_root(&root).unwrap();
    let stats = aggregate(&scanned.records);

    assert_eq!(stats.total, 5, "malformed log must not count toward total");
    assert_eq!(stats.success, 5);
    assert_eq!(scanned.skipped.len(), 1, "skip must be reported separately");
}

#[test]
fn test_missing_root_does_not_abort_batch() {
    let temp = tempfile::tempdir().unwrap();
    let good = temp.path().join("good");
    fs::create_dir_all(&good).unwrap();
    write_task(&good, "t1", r#"{"task_id":"t1","status":"success"}"#);
    let missing = temp.path().join("does_not_exist");

    let batch = summarize_roots(&[missing.clone(), good]).unwrap();
    assert_eq!(batch.summaries.len(), 1);
    assert_eq!(batch.summaries[0].stats.total, 1);
    assert_eq!(batch.missing, vec![missing]);
}

#[test]
fn test_rescan_produces_identical_stats() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("logs");
    fs::create_dir_all(&root).unwrap();
    write_task(&root, "a", r#"{"task_id":"a","status":"success","step_count":3}"#);
    write_task(
        &root,
        "b",
        r#"{"task_id":"b","categories":["ui_interaction"],"ui_interaction_quality":0.5}"#,
    );

    let first = aggregate(&scan_log_root(&root).unwrap().records);
    let second = aggregate(&scan_log_root(&root).unwrap().records);
    assert_eq!(first, second);
}

#[test]
fn test_empty_root_reports_zeros() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("empty");
    fs::create_dir_all(&root).unwrap();

    let batch = summarize_roots(&[root]).unwrap();
    let stats = &batch.summaries[0].stats;
    assert_eq!(stats.total, 0);
    assert_eq!(stats.success_rate, 0.0);
    assert_eq!(stats.uiq, 0.0);
}
