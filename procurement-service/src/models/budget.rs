//! Budget allocation model for procurement-service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Exact lookup key for a budget allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCoordinate {
    pub fiscal_period_id: Uuid,
    pub cost_center_id: Uuid,
    pub sub_cost_center_id: Uuid,
    pub account_code_id: Uuid,
}

/// Configured budget line, read-only from the pipeline's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BudgetAllocation {
    pub allocation_id: Uuid,
    pub fiscal_period_id: Uuid,
    pub cost_center_id: Uuid,
    pub sub_cost_center_id: Uuid,
    pub account_code_id: Uuid,
    pub amount: Decimal,
    pub usable: bool,
}
