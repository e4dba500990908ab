//! Typed failure taxonomy for the finalization pipeline.

use crate::models::FiscalPeriod;
use chrono::NaiveDate;
use service_core::error::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Pipeline stage in which a finalization attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Routing,
    Persisting,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Routing => "routing",
            Stage::Persisting => "persisting",
        }
    }
}

/// Failure of a finalization attempt. Every variant leaves the
/// document in `Draft`.
#[derive(Debug, Error)]
pub enum FinalizeError {
    /// Negative quantity, unit price, discount, or VAT rate.
    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// A document cannot be finalized without line items.
    #[error("document has no line items")]
    MissingLineItems,

    /// No configured fiscal period contains the document date.
    #[error("no fiscal period contains {date}")]
    NoFiscalPeriod { date: NaiveDate },

    /// More than one fiscal period contains the document date; the
    /// caller must pick one and resubmit.
    #[error("{} fiscal periods contain the document date", candidates.len())]
    AmbiguousFiscalPeriod { candidates: Vec<FiscalPeriod> },

    /// No usable budget allocation exists at the document's
    /// coordinate.
    #[error("budget unavailable: {reason}")]
    BudgetUnavailable { reason: String },

    /// The approval process is missing or has zero steps. Fatal and
    /// non-retryable until an administrator fixes the configuration.
    #[error("approval process '{title}' is not configured")]
    ProcessNotConfigured { title: String },

    /// No step assignment exists for this requester at the first
    /// step. Fatal; a document with no reachable approver must never
    /// become pending.
    #[error("no approver assigned for requester {requester_id} at step {step_order}")]
    ApproverNotAssigned { requester_id: Uuid, step_order: i32 },

    /// Store fault. Nothing was committed (the atomic write rolls
    /// back fully), so the whole attempt is safe to retry.
    #[error("persistence failure: {0}")]
    Persistence(#[from] AppError),
}

impl FinalizeError {
    /// Short stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FinalizeError::InvalidAmount { .. } => "invalid_amount",
            FinalizeError::MissingLineItems => "missing_line_items",
            FinalizeError::NoFiscalPeriod { .. } => "no_fiscal_period",
            FinalizeError::AmbiguousFiscalPeriod { .. } => "ambiguous_fiscal_period",
            FinalizeError::BudgetUnavailable { .. } => "budget_unavailable",
            FinalizeError::ProcessNotConfigured { .. } => "process_not_configured",
            FinalizeError::ApproverNotAssigned { .. } => "approver_not_assigned",
            FinalizeError::Persistence(_) => "persistence",
        }
    }
}

impl FinalizeError {
    /// Stage the attempt failed in.
    pub fn stage(&self) -> Stage {
        match self {
            FinalizeError::InvalidAmount { .. }
            | FinalizeError::MissingLineItems
            | FinalizeError::NoFiscalPeriod { .. }
            | FinalizeError::AmbiguousFiscalPeriod { .. }
            | FinalizeError::BudgetUnavailable { .. } => Stage::Validating,
            FinalizeError::ProcessNotConfigured { .. }
            | FinalizeError::ApproverNotAssigned { .. } => Stage::Routing,
            FinalizeError::Persistence(_) => Stage::Persisting,
        }
    }

    /// Whether the submitting user can fix the condition and
    /// resubmit. Routing failures are administrator-fixable, not
    /// user-correctable.
    pub fn is_correctable(&self) -> bool {
        matches!(
            self,
            FinalizeError::InvalidAmount { .. }
                | FinalizeError::MissingLineItems
                | FinalizeError::NoFiscalPeriod { .. }
                | FinalizeError::AmbiguousFiscalPeriod { .. }
                | FinalizeError::BudgetUnavailable { .. }
        )
    }

    /// Actionable message for the submitting user. Configuration
    /// defects direct the user to an administrator without leaking
    /// internal identifiers.
    pub fn user_message(&self) -> String {
        match self {
            FinalizeError::InvalidAmount { reason } => {
                format!("Check the entered amounts: {}", reason)
            }
            FinalizeError::MissingLineItems => {
                "Add at least one line item before submitting".to_string()
            }
            FinalizeError::NoFiscalPeriod { date } => {
                format!("The document date {} is outside every fiscal period", date)
            }
            FinalizeError::AmbiguousFiscalPeriod { candidates } => format!(
                "Select one of these {} fiscal periods: {}",
                candidates.len(),
                candidates
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            FinalizeError::BudgetUnavailable { reason } => {
                format!("No budget is set up for this document: {}", reason)
            }
            FinalizeError::ProcessNotConfigured { .. }
            | FinalizeError::ApproverNotAssigned { .. } => {
                "The approval workflow for this document is not configured; contact an administrator"
                    .to_string()
            }
            FinalizeError::Persistence(_) => {
                "Submission could not be saved; nothing was recorded, please retry".to_string()
            }
        }
    }
}
