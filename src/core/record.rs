//! TaskRecord - canonical parsed form of one agent task execution.

use serde::{Deserialize, Serialize};

/// Terminal status of a task, or its absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Success,
    Failure,
    /// The log was truncated or never wrote a terminal marker.
    /// Counts toward `total` but never toward `finished`/`success`.
    Unfinished,
}

impl TaskStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, TaskStatus::Unfinished)
    }
}

/// Capability-path flags for a task. Non-exclusive: a task may be both
/// mcp and ui-interaction. Membership is a declared tag on the record,
/// independent of whether the corresponding call count is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub mcp: bool,
    #[serde(default)]
    pub ui_interaction: bool,
}

impl Categories {
    /// A task is "standard" when it exercises neither capability path.
    pub fn is_standard(&self) -> bool {
        !self.mcp && !self.ui_interaction
    }
}

/// One agent task execution, as parsed from its trajectory log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Unique identifier within a log root.
    pub task_id: String,

    pub status: TaskStatus,

    pub categories: Categories,

    /// Number of agent reasoning/action steps taken.
    pub step_count: u64,

    /// Number of external queries issued.
    pub query_count: u64,

    /// Number of tool/protocol calls issued.
    pub mcp_call_count: u64,

    /// Interaction-quality score in [0,1]. Present only for tasks whose
    /// categories include ui-interaction, so the UIQ mean is not diluted
    /// by ineligible tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_interaction_quality: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_finished() {
        assert!(TaskStatus::Success.is_finished());
        assert!(TaskStatus::Failure.is_finished());
        assert!(!TaskStatus::Unfinished.is_finished());
    }

    #[test]
    fn test_categories_standard() {
        assert!(Categories::default().is_standard());
        assert!(
            !Categories {
                mcp: true,
                ui_interaction: false
            }
            .is_standard()
        );
        assert!(
            !Categories {
                mcp: false,
                ui_interaction: true
            }
            .is_standard()
        );
    }

    #[test]
    fn test_record_serialization_skips_absent_uiq() {
        let record = TaskRecord {
            task_id: "t1".to_string(),
            status: TaskStatus::Success,
            categories: Categories::default(),
            step_count: 3,
            query_count: 0,
            mcp_call_count: 0,
            ui_interaction_quality: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("ui_interaction_quality"));

        let parsed: TaskRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
