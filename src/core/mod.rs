//! Core types for traj-viewer.
//!
//! This module contains the canonical `TaskRecord` schema produced by log ingestion.

pub mod record;

// Re-export key types for convenience
pub use record::{Categories, TaskRecord, TaskStatus};
