//! Fiscal period resolution.

use crate::error::FinalizeError;
use crate::models::FiscalPeriod;
use crate::store::FiscalPeriodStore;
use chrono::NaiveDate;
use service_core::error::AppError;
use uuid::Uuid;

/// All fiscal periods containing `date`. Pure query; zero, one, or
/// many results are all legitimate outcomes and classification is the
/// caller's business.
pub async fn resolve_periods(
    store: &dyn FiscalPeriodStore,
    date: NaiveDate,
) -> Result<Vec<FiscalPeriod>, AppError> {
    store.find_containing(date).await
}

/// Pick the single period a finalization attempt runs against.
///
/// Zero candidates is a user-correctable condition (the date is
/// outside every period). Multiple candidates require an explicit
/// `selected` id from the caller; no tie-breaking happens here
/// because the winning-period policy belongs to the caller, not the
/// resolver. A `selected` id that is not among the candidates is
/// treated the same as no containing period.
pub fn select_period(
    date: NaiveDate,
    candidates: Vec<FiscalPeriod>,
    selected: Option<Uuid>,
) -> Result<FiscalPeriod, FinalizeError> {
    if let Some(id) = selected {
        return candidates
            .into_iter()
            .find(|p| p.fiscal_period_id == id)
            .ok_or(FinalizeError::NoFiscalPeriod { date });
    }

    match candidates.len() {
        0 => Err(FinalizeError::NoFiscalPeriod { date }),
        1 => Ok(candidates.into_iter().next().unwrap()),
        _ => Err(FinalizeError::AmbiguousFiscalPeriod { candidates }),
    }
}
