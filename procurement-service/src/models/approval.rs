//! Approval workflow models for procurement-service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Named, ordered workflow definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalProcess {
    pub process_id: Uuid,
    pub title: String,
    pub steps: Vec<ApprovalStep>,
}

/// One stage of an approval process.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApprovalStep {
    pub step_id: Uuid,
    pub process_id: Uuid,
    pub order_index: i32,
    pub description: String,
}

/// Mapping from (step, requester) to the approver who acts at that
/// step for that requester.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StepAssignment {
    pub assignment_id: Uuid,
    pub step_id: Uuid,
    pub requester_id: Uuid,
    pub approver_id: Uuid,
}

/// Approval transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "approved" => ApprovalStatus::Approved,
            "rejected" => ApprovalStatus::Rejected,
            _ => ApprovalStatus::Pending,
        }
    }
}

/// Tracking record created once per finalized document, append-only
/// from the pipeline's view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApprovalTransaction {
    pub transaction_id: Uuid,
    pub document_id: Uuid,
    pub requester_id: Uuid,
    pub approver_id: Uuid,
    pub step_order: i32,
    pub step_description: String,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating an approval transaction.
#[derive(Debug, Clone)]
pub struct NewApprovalTransaction {
    pub document_id: Uuid,
    pub requester_id: Uuid,
    pub approver_id: Uuid,
    pub step_order: i32,
    pub step_description: String,
}
