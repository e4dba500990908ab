//! Common test utilities for procurement-service integration tests.
//!
//! The pipeline's store collaborators are implemented in memory with
//! staged-commit semantics so the atomicity guarantee is assertable
//! without a live database: `persist_finalization` stages every
//! record and commits them together, and an injected fault between
//! the transaction and task writes must leave nothing behind.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use procurement_service::config::ApprovalConfig;
use procurement_service::models::{
    ApprovalProcess, ApprovalStatus, ApprovalStep, ApprovalTransaction, BudgetAllocation,
    BudgetCoordinate, DocumentKind, DocumentStatus, DraftDocument, FiscalPeriod, LineItemInput,
    StepAssignment, Task,
};
use procurement_service::services::FinalizationPipeline;
use procurement_service::store::{
    ApprovalStore, BudgetStore, DocumentStore, FinalizationRecord, FinalizationSnapshot,
    FiscalPeriodStore,
};
use rust_decimal::Decimal;
use service_core::error::AppError;
use std::sync::{Arc, Mutex, Once};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,procurement_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Where to inject a store fault during `persist_finalization`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistFault {
    None,
    /// Fail after the approval transaction is staged but before the
    /// task write.
    BetweenTransactionAndTask,
}

#[derive(Default)]
struct Inner {
    periods: Vec<FiscalPeriod>,
    budgets: Vec<BudgetAllocation>,
    processes: Vec<ApprovalProcess>,
    assignments: Vec<StepAssignment>,
    statuses: std::collections::HashMap<Uuid, DocumentStatus>,
    snapshots: Vec<FinalizationSnapshot>,
    transactions: Vec<ApprovalTransaction>,
    tasks: Vec<Task>,
    fault: Option<PersistFault>,
}

/// In-memory store implementing every pipeline collaborator.
#[derive(Default)]
pub struct TestStore {
    inner: Mutex<Inner>,
}

impl TestStore {
    pub fn new() -> Arc<Self> {
        init_tracing();
        Arc::new(Self::default())
    }

    pub fn add_period(&self, name: &str, start: &str, end: &str) -> FiscalPeriod {
        let period = FiscalPeriod {
            fiscal_period_id: Uuid::new_v4(),
            name: name.to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
        };
        self.inner.lock().unwrap().periods.push(period.clone());
        period
    }

    pub fn add_budget(&self, coordinate: BudgetCoordinate, usable: bool) -> BudgetAllocation {
        let allocation = BudgetAllocation {
            allocation_id: Uuid::new_v4(),
            fiscal_period_id: coordinate.fiscal_period_id,
            cost_center_id: coordinate.cost_center_id,
            sub_cost_center_id: coordinate.sub_cost_center_id,
            account_code_id: coordinate.account_code_id,
            amount: Decimal::new(100_000, 0),
            usable,
        };
        self.inner.lock().unwrap().budgets.push(allocation.clone());
        allocation
    }

    pub fn add_process(&self, title: &str, steps: &[(i32, &str)]) -> ApprovalProcess {
        let process_id = Uuid::new_v4();
        let process = ApprovalProcess {
            process_id,
            title: title.to_string(),
            steps: steps
                .iter()
                .map(|(order_index, description)| ApprovalStep {
                    step_id: Uuid::new_v4(),
                    process_id,
                    order_index: *order_index,
                    description: description.to_string(),
                })
                .collect(),
        };
        self.inner.lock().unwrap().processes.push(process.clone());
        process
    }

    pub fn assign_approver(&self, step_id: Uuid, requester_id: Uuid, approver_id: Uuid) {
        self.inner.lock().unwrap().assignments.push(StepAssignment {
            assignment_id: Uuid::new_v4(),
            step_id,
            requester_id,
            approver_id,
        });
    }

    /// Seed a draft document the pipeline may finalize.
    pub fn seed_draft(&self, document_id: Uuid) {
        self.inner
            .lock()
            .unwrap()
            .statuses
            .insert(document_id, DocumentStatus::Draft);
    }

    pub fn inject_persist_fault(&self, fault: PersistFault) {
        self.inner.lock().unwrap().fault = Some(fault);
    }

    pub fn document_status(&self, document_id: Uuid) -> Option<DocumentStatus> {
        self.inner.lock().unwrap().statuses.get(&document_id).copied()
    }

    pub fn transactions(&self) -> Vec<ApprovalTransaction> {
        self.inner.lock().unwrap().transactions.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.inner.lock().unwrap().tasks.clone()
    }

    pub fn snapshots(&self) -> Vec<FinalizationSnapshot> {
        self.inner.lock().unwrap().snapshots.clone()
    }
}

#[async_trait]
impl FiscalPeriodStore for TestStore {
    async fn find_containing(&self, date: NaiveDate) -> Result<Vec<FiscalPeriod>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .periods
            .iter()
            .filter(|p| p.contains(date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BudgetStore for TestStore {
    async fn find_allocation(
        &self,
        coordinate: &BudgetCoordinate,
    ) -> Result<Option<BudgetAllocation>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .budgets
            .iter()
            .find(|b| {
                b.fiscal_period_id == coordinate.fiscal_period_id
                    && b.cost_center_id == coordinate.cost_center_id
                    && b.sub_cost_center_id == coordinate.sub_cost_center_id
                    && b.account_code_id == coordinate.account_code_id
            })
            .cloned())
    }
}

#[async_trait]
impl ApprovalStore for TestStore {
    async fn find_process_by_title(
        &self,
        title: &str,
    ) -> Result<Option<ApprovalProcess>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .processes
            .iter()
            .find(|p| p.title == title)
            .cloned())
    }

    async fn find_approver(
        &self,
        step_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Option<Uuid>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .assignments
            .iter()
            .find(|a| a.step_id == step_id && a.requester_id == requester_id)
            .map(|a| a.approver_id))
    }
}

#[async_trait]
impl DocumentStore for TestStore {
    async fn persist_finalization(
        &self,
        snapshot: &FinalizationSnapshot,
    ) -> Result<FinalizationRecord, AppError> {
        let mut inner = self.inner.lock().unwrap();

        match inner.statuses.get(&snapshot.document_id) {
            Some(DocumentStatus::Draft) => {}
            _ => {
                return Err(AppError::Conflict(anyhow::anyhow!(
                    "Document is not in draft status"
                )))
            }
        }

        // Stage every record first; nothing lands until the end.
        let transaction = ApprovalTransaction {
            transaction_id: Uuid::new_v4(),
            document_id: snapshot.transaction.document_id,
            requester_id: snapshot.transaction.requester_id,
            approver_id: snapshot.transaction.approver_id,
            step_order: snapshot.transaction.step_order,
            step_description: snapshot.transaction.step_description.clone(),
            status: ApprovalStatus::Pending.as_str().to_string(),
            created_utc: Utc::now(),
        };

        if inner.fault == Some(PersistFault::BetweenTransactionAndTask) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "injected fault between transaction and task writes"
            )));
        }

        let task = Task {
            task_id: Uuid::new_v4(),
            document_id: snapshot.task.document_id,
            process_id: snapshot.task.process_id,
            step_id: snapshot.task.step_id,
            assignee_id: snapshot.task.assignee_id,
            urgency: snapshot.task.urgency.as_str().to_string(),
            read_utc: None,
            created_utc: Utc::now(),
        };

        let record = FinalizationRecord {
            document_id: snapshot.document_id,
            transaction_id: transaction.transaction_id,
            task_id: task.task_id,
        };

        // Commit point.
        inner.snapshots.push(snapshot.clone());
        inner.transactions.push(transaction);
        inner.tasks.push(task);
        inner
            .statuses
            .insert(snapshot.document_id, DocumentStatus::PendingApproval);

        Ok(record)
    }
}

/// Build a pipeline over the shared test store with default process
/// titles.
pub fn pipeline(store: &Arc<TestStore>) -> FinalizationPipeline {
    FinalizationPipeline::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        ApprovalConfig::default(),
    )
}

/// Line item helper.
pub fn item(quantity: &str, unit_price: &str) -> LineItemInput {
    LineItemInput {
        description: "Test item".to_string(),
        quantity: quantity.parse().unwrap(),
        unit_price: unit_price.parse().unwrap(),
        tax_rate_override: None,
        sort_order: 0,
    }
}

/// Draft invoice helper: dated 2025-02-10, discount 20, VAT 15%.
pub fn draft_invoice(store: &TestStore, line_items: Vec<LineItemInput>) -> DraftDocument {
    let document_id = Uuid::new_v4();
    store.seed_draft(document_id);
    DraftDocument {
        document_id,
        kind: DocumentKind::Invoice,
        document_date: "2025-02-10".parse().unwrap(),
        discount: Decimal::new(20, 0),
        vat_rate: Decimal::new(15, 0),
        cost_center_id: Uuid::new_v4(),
        sub_cost_center_id: Uuid::new_v4(),
        account_code_id: Uuid::new_v4(),
        line_items,
    }
}

/// Seed period + budget + single-step process + assignment so a
/// draft finalizes cleanly, returning the requester and approver
/// ids.
pub fn seed_happy_path(store: &TestStore, draft: &DraftDocument) -> (Uuid, Uuid) {
    let period = store.add_period("FY2025", "2025-01-01", "2026-01-01");
    store.add_budget(
        BudgetCoordinate {
            fiscal_period_id: period.fiscal_period_id,
            cost_center_id: draft.cost_center_id,
            sub_cost_center_id: draft.sub_cost_center_id,
            account_code_id: draft.account_code_id,
        },
        true,
    );

    let title = ApprovalConfig::default()
        .process_title(draft.kind)
        .to_string();
    let process = store.add_process(&title, &[(1, "Finance manager review")]);

    let requester = Uuid::new_v4();
    let approver = Uuid::new_v4();
    store.assign_approver(process.steps[0].step_id, requester, approver);

    (requester, approver)
}
