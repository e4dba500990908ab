//! Data models for procurement-service.

mod approval;
mod budget;
mod document;
mod fiscal_period;
mod line_item;
mod task;

pub use approval::{
    ApprovalProcess, ApprovalStatus, ApprovalStep, ApprovalTransaction, NewApprovalTransaction,
    StepAssignment,
};
pub use budget::{BudgetAllocation, BudgetCoordinate};
pub use document::{DocumentKind, DocumentStatus, DraftDocument};
pub use fiscal_period::FiscalPeriod;
pub use line_item::{LineAmounts, LineItem, LineItemInput, Totals};
pub use task::{NewTask, Task, TaskUrgency};
