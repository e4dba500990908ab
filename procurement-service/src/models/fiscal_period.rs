//! Fiscal period model for procurement-service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Accounting fiscal period with a half-open date range
/// `[start_date, end_date)`.
///
/// Periods MAY overlap in the configured data; the resolver reports
/// every containing period and leaves the choice to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FiscalPeriod {
    pub fiscal_period_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FiscalPeriod {
    /// Whether `date` falls inside the half-open range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }
}
