//! Postgres store for procurement-service.

use crate::models::{
    ApprovalProcess, ApprovalStatus, ApprovalStep, BudgetAllocation, BudgetCoordinate,
    DocumentStatus, FiscalPeriod,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::store::{
    ApprovalStore, BudgetStore, DocumentStore, FinalizationRecord, FinalizationSnapshot,
    FiscalPeriodStore,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "procurement-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl FiscalPeriodStore for Database {
    #[instrument(skip(self), fields(date = %date))]
    async fn find_containing(&self, date: NaiveDate) -> Result<Vec<FiscalPeriod>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_containing_periods"])
            .start_timer();

        let periods = sqlx::query_as::<_, FiscalPeriod>(
            r#"
            SELECT fiscal_period_id, name, start_date, end_date
            FROM fiscal_periods
            WHERE start_date <= $1 AND $1 < end_date
            ORDER BY start_date, fiscal_period_id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to find fiscal periods: {}", e))
        })?;

        timer.observe_duration();

        Ok(periods)
    }
}

#[async_trait]
impl BudgetStore for Database {
    #[instrument(skip(self), fields(fiscal_period_id = %coordinate.fiscal_period_id))]
    async fn find_allocation(
        &self,
        coordinate: &BudgetCoordinate,
    ) -> Result<Option<BudgetAllocation>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_allocation"])
            .start_timer();

        let allocation = sqlx::query_as::<_, BudgetAllocation>(
            r#"
            SELECT allocation_id, fiscal_period_id, cost_center_id, sub_cost_center_id,
                account_code_id, amount, usable
            FROM budget_allocations
            WHERE fiscal_period_id = $1
              AND cost_center_id = $2
              AND sub_cost_center_id = $3
              AND account_code_id = $4
            "#,
        )
        .bind(coordinate.fiscal_period_id)
        .bind(coordinate.cost_center_id)
        .bind(coordinate.sub_cost_center_id)
        .bind(coordinate.account_code_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to find budget allocation: {}", e))
        })?;

        timer.observe_duration();

        Ok(allocation)
    }
}

#[async_trait]
impl ApprovalStore for Database {
    #[instrument(skip(self), fields(title = %title))]
    async fn find_process_by_title(
        &self,
        title: &str,
    ) -> Result<Option<ApprovalProcess>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_process_by_title"])
            .start_timer();

        let row: Option<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT process_id, title
            FROM approval_processes
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to find approval process: {}", e))
        })?;

        let Some((process_id, title)) = row else {
            timer.observe_duration();
            return Ok(None);
        };

        let steps = sqlx::query_as::<_, ApprovalStep>(
            r#"
            SELECT step_id, process_id, order_index, description
            FROM approval_steps
            WHERE process_id = $1
            ORDER BY order_index
            "#,
        )
        .bind(process_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to load approval steps: {}", e))
        })?;

        timer.observe_duration();

        Ok(Some(ApprovalProcess {
            process_id,
            title,
            steps,
        }))
    }

    #[instrument(skip(self), fields(step_id = %step_id, requester_id = %requester_id))]
    async fn find_approver(
        &self,
        step_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Option<Uuid>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_approver"])
            .start_timer();

        let approver: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT approver_id
            FROM step_assignments
            WHERE step_id = $1 AND requester_id = $2
            "#,
        )
        .bind(step_id)
        .bind(requester_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to find approver: {}", e))
        })?;

        timer.observe_duration();

        Ok(approver)
    }
}

#[async_trait]
impl DocumentStore for Database {
    /// Single transaction boundary of the pipeline: snapshot, line
    /// items, approval transaction, and task commit together or not
    /// at all.
    #[instrument(skip(self, snapshot), fields(document_id = %snapshot.document_id))]
    async fn persist_finalization(
        &self,
        snapshot: &FinalizationSnapshot,
    ) -> Result<FinalizationRecord, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["persist_finalization"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE documents
            SET subtotal = $2,
                discounted_subtotal = $3,
                vat_amount = $4,
                total = $5,
                fiscal_period_id = $6,
                status = $7,
                finalized_utc = NOW()
            WHERE document_id = $1 AND status = $8
            "#,
        )
        .bind(snapshot.document_id)
        .bind(snapshot.totals.subtotal)
        .bind(snapshot.totals.discounted_subtotal)
        .bind(snapshot.totals.vat_amount)
        .bind(snapshot.totals.total)
        .bind(snapshot.fiscal_period_id)
        .bind(DocumentStatus::PendingApproval.as_str())
        .bind(DocumentStatus::Draft.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to write snapshot: {}", e))
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Document is not in draft status"
            )));
        }

        // Replace any previously staged line rows with the snapshot.
        sqlx::query("DELETE FROM document_line_items WHERE document_id = $1")
            .bind(snapshot.document_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to clear line items: {}", e))
            })?;

        for line in &snapshot.lines {
            sqlx::query(
                r#"
                INSERT INTO document_line_items (
                    line_item_id, document_id, description, quantity, unit_price,
                    tax_rate_override, subtotal, discounted_amount, vat_amount, total, sort_order
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(snapshot.document_id)
            .bind(&line.input.description)
            .bind(line.input.quantity)
            .bind(line.input.unit_price)
            .bind(line.input.tax_rate_override)
            .bind(line.amounts.subtotal)
            .bind(line.amounts.discounted_amount)
            .bind(line.amounts.vat_amount)
            .bind(line.amounts.total)
            .bind(line.input.sort_order)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to write line item: {}", e))
            })?;
        }

        let transaction_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO approval_transactions (
                transaction_id, document_id, requester_id, approver_id,
                step_order, step_description, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction_id)
        .bind(snapshot.transaction.document_id)
        .bind(snapshot.transaction.requester_id)
        .bind(snapshot.transaction.approver_id)
        .bind(snapshot.transaction.step_order)
        .bind(&snapshot.transaction.step_description)
        .bind(ApprovalStatus::Pending.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Failed to write approval transaction: {}",
                e
            ))
        })?;

        let task_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO tasks (
                task_id, document_id, process_id, step_id, assignee_id, urgency, read_utc
            )
            VALUES ($1, $2, $3, $4, $5, $6, NULL)
            "#,
        )
        .bind(task_id)
        .bind(snapshot.task.document_id)
        .bind(snapshot.task.process_id)
        .bind(snapshot.task.step_id)
        .bind(snapshot.task.assignee_id)
        .bind(snapshot.task.urgency.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to write task: {}", e)))?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit finalization: {}", e))
        })?;

        timer.observe_duration();

        info!(
            document_id = %snapshot.document_id,
            transaction_id = %transaction_id,
            task_id = %task_id,
            "Finalization persisted"
        );

        Ok(FinalizationRecord {
            document_id: snapshot.document_id,
            transaction_id,
            task_id,
        })
    }
}
