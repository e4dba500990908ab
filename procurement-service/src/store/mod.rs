//! Store collaborators consumed by the finalization pipeline.
//!
//! The pipeline owns no persistence of its own; everything it reads
//! and writes goes through these seams. All lookups are re-resolved
//! from the source of truth on every attempt (no in-process caches),
//! trading a little latency for correctness under concurrent
//! configuration changes.

mod postgres;

pub use postgres::Database;

use crate::models::{
    BudgetAllocation, BudgetCoordinate, FiscalPeriod, LineAmounts, LineItemInput,
    NewApprovalTransaction, NewTask, Totals,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use service_core::error::AppError;
use uuid::Uuid;

/// Fiscal period lookup.
#[async_trait]
pub trait FiscalPeriodStore: Send + Sync {
    /// All periods whose half-open range contains `date`.
    async fn find_containing(&self, date: NaiveDate) -> Result<Vec<FiscalPeriod>, AppError>;
}

/// Budget allocation lookup.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// The allocation at the exact coordinate, if one is configured.
    async fn find_allocation(
        &self,
        coordinate: &BudgetCoordinate,
    ) -> Result<Option<BudgetAllocation>, AppError>;
}

/// Approval process and assignment lookup.
#[async_trait]
pub trait ApprovalStore: Send + Sync {
    /// Process by exact title, with its steps ordered by
    /// `order_index`.
    async fn find_process_by_title(
        &self,
        title: &str,
    ) -> Result<Option<crate::models::ApprovalProcess>, AppError>;

    /// Approver assigned to `(step, requester)`, if any.
    async fn find_approver(
        &self,
        step_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Option<Uuid>, AppError>;
}

/// One line of the financial snapshot: the submitted input plus the
/// computed amounts.
#[derive(Debug, Clone)]
pub struct LineSnapshot {
    pub input: LineItemInput,
    pub amounts: LineAmounts,
}

/// Everything the Persisting stage writes as one unit.
#[derive(Debug, Clone)]
pub struct FinalizationSnapshot {
    pub document_id: Uuid,
    pub fiscal_period_id: Uuid,
    pub totals: Totals,
    pub lines: Vec<LineSnapshot>,
    pub transaction: NewApprovalTransaction,
    pub task: NewTask,
}

/// Identifiers of the records a successful finalization created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizationRecord {
    pub document_id: Uuid,
    pub transaction_id: Uuid,
    pub task_id: Uuid,
}

/// Document snapshot writer.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write the financial snapshot, the approval transaction, and
    /// the approver task, and move the document to
    /// `pending_approval`, atomically. Either every record exists
    /// afterwards or none does.
    async fn persist_finalization(
        &self,
        snapshot: &FinalizationSnapshot,
    ) -> Result<FinalizationRecord, AppError>;
}
