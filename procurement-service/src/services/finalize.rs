//! Finalization orchestrator.
//!
//! Composes the monetary calculator, period resolver, budget
//! validator, and approval router, then persists the outcome as one
//! atomic write. Stages run strictly in order Validating -> Routing
//! -> Persisting; a later stage never runs after an earlier failure,
//! and every failure leaves the document in `Draft`.

use crate::config::ApprovalConfig;
use crate::error::FinalizeError;
use crate::models::{
    BudgetCoordinate, DraftDocument, FiscalPeriod, NewApprovalTransaction, NewTask, TaskUrgency,
    Totals,
};
use crate::services::metrics::{FINALIZATIONS_TOTAL, FINALIZATION_FAILURES, FINALIZE_DURATION};
use crate::services::{budget, periods, routing, totals};
use crate::store::{
    ApprovalStore, BudgetStore, DocumentStore, FinalizationSnapshot, FiscalPeriodStore,
    LineSnapshot,
};
use chrono::NaiveDate;
use service_core::error::AppError;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Result of a successful finalization.
#[derive(Debug, Clone)]
pub struct FinalizationOutcome {
    pub document_id: Uuid,
    pub transaction_id: Uuid,
    pub task_id: Uuid,
    pub fiscal_period: FiscalPeriod,
    pub approver_id: Uuid,
    pub totals: Totals,
}

/// The finalization pipeline. Holds no mutable state; every attempt
/// re-resolves periods, budgets, and assignments from the store so
/// concurrent configuration changes are always observed.
#[derive(Clone)]
pub struct FinalizationPipeline {
    periods: Arc<dyn FiscalPeriodStore>,
    budgets: Arc<dyn BudgetStore>,
    approvals: Arc<dyn ApprovalStore>,
    documents: Arc<dyn DocumentStore>,
    approval_config: ApprovalConfig,
}

impl FinalizationPipeline {
    pub fn new(
        periods: Arc<dyn FiscalPeriodStore>,
        budgets: Arc<dyn BudgetStore>,
        approvals: Arc<dyn ApprovalStore>,
        documents: Arc<dyn DocumentStore>,
        approval_config: ApprovalConfig,
    ) -> Self {
        Self {
            periods,
            budgets,
            approvals,
            documents,
            approval_config,
        }
    }

    /// Standalone period resolution, exposed so a caller can render a
    /// selection UI when the document date is ambiguous.
    pub async fn resolve_fiscal_periods(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<FiscalPeriod>, AppError> {
        periods::resolve_periods(self.periods.as_ref(), date).await
    }

    /// Finalize a draft document: validate money and period/budget,
    /// route to the first approver, and persist the snapshot,
    /// approval transaction, and task atomically.
    ///
    /// `selected_period` carries the caller's explicit choice after
    /// an `AmbiguousFiscalPeriod` failure; it must be one of the
    /// candidate periods for the document date.
    #[instrument(
        skip(self, draft),
        fields(document_id = %draft.document_id, kind = draft.kind.as_str())
    )]
    pub async fn finalize(
        &self,
        draft: &DraftDocument,
        submitted_by: Uuid,
        selected_period: Option<Uuid>,
    ) -> Result<FinalizationOutcome, FinalizeError> {
        let timer = FINALIZE_DURATION
            .with_label_values(&[draft.kind.as_str()])
            .start_timer();

        let result = self.run(draft, submitted_by, selected_period).await;

        timer.observe_duration();
        match &result {
            Ok(outcome) => {
                FINALIZATIONS_TOTAL
                    .with_label_values(&[draft.kind.as_str(), "finalized"])
                    .inc();
                info!(
                    transaction_id = %outcome.transaction_id,
                    task_id = %outcome.task_id,
                    approver_id = %outcome.approver_id,
                    total = %outcome.totals.total,
                    "Document finalized"
                );
            }
            Err(e) => {
                FINALIZATIONS_TOTAL
                    .with_label_values(&[draft.kind.as_str(), "failed"])
                    .inc();
                FINALIZATION_FAILURES
                    .with_label_values(&[e.stage().as_str(), e.kind()])
                    .inc();
                warn!(
                    stage = e.stage().as_str(),
                    error = e.kind(),
                    correctable = e.is_correctable(),
                    "Finalization failed"
                );
            }
        }

        result
    }

    async fn run(
        &self,
        draft: &DraftDocument,
        submitted_by: Uuid,
        selected_period: Option<Uuid>,
    ) -> Result<FinalizationOutcome, FinalizeError> {
        // Validating
        if draft.line_items.is_empty() {
            return Err(FinalizeError::MissingLineItems);
        }

        let document_totals =
            totals::compute_totals(&draft.line_items, draft.discount, draft.vat_rate)?;
        let line_amounts =
            totals::distribute_discount(&draft.line_items, draft.discount, draft.vat_rate)?;

        let candidates =
            periods::resolve_periods(self.periods.as_ref(), draft.document_date).await?;
        let fiscal_period =
            periods::select_period(draft.document_date, candidates, selected_period)?;

        let coordinate = BudgetCoordinate {
            fiscal_period_id: fiscal_period.fiscal_period_id,
            cost_center_id: draft.cost_center_id,
            sub_cost_center_id: draft.sub_cost_center_id,
            account_code_id: draft.account_code_id,
        };
        budget::check_budget(self.budgets.as_ref(), &coordinate).await?;

        // Routing
        let process_title = self.approval_config.process_title(draft.kind);
        let routed =
            routing::resolve_approver(self.approvals.as_ref(), process_title, submitted_by)
                .await?;

        // Persisting
        let snapshot = FinalizationSnapshot {
            document_id: draft.document_id,
            fiscal_period_id: fiscal_period.fiscal_period_id,
            totals: document_totals,
            lines: draft
                .line_items
                .iter()
                .cloned()
                .zip(line_amounts)
                .map(|(input, amounts)| LineSnapshot { input, amounts })
                .collect(),
            transaction: NewApprovalTransaction {
                document_id: draft.document_id,
                requester_id: submitted_by,
                approver_id: routed.approver_id,
                step_order: routed.step_order,
                step_description: routed.step_description.clone(),
            },
            task: NewTask {
                document_id: draft.document_id,
                process_id: routed.process_id,
                step_id: routed.step_id,
                assignee_id: routed.approver_id,
                urgency: TaskUrgency::Normal,
            },
        };

        let record = self.documents.persist_finalization(&snapshot).await?;

        Ok(FinalizationOutcome {
            document_id: record.document_id,
            transaction_id: record.transaction_id,
            task_id: record.task_id,
            fiscal_period,
            approver_id: routed.approver_id,
            totals: document_totals,
        })
    }
}
