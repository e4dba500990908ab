//! Approver work-item model for procurement-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskUrgency {
    Normal,
    High,
}

impl TaskUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskUrgency::Normal => "normal",
            TaskUrgency::High => "high",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "high" => TaskUrgency::High,
            _ => TaskUrgency::Normal,
        }
    }
}

/// Work item for the resolved approver, created alongside the
/// approval transaction. `read_utc` is NULL until the approver opens
/// it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub task_id: Uuid,
    pub document_id: Uuid,
    pub process_id: Uuid,
    pub step_id: Uuid,
    pub assignee_id: Uuid,
    pub urgency: String,
    pub read_utc: Option<DateTime<Utc>>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub document_id: Uuid,
    pub process_id: Uuid,
    pub step_id: Uuid,
    pub assignee_id: Uuid,
    pub urgency: TaskUrgency,
}
