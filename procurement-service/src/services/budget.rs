//! Budget validation.

use crate::error::FinalizeError;
use crate::models::{BudgetAllocation, BudgetCoordinate};
use crate::store::BudgetStore;

/// Confirm a usable budget allocation exists at the exact coordinate.
///
/// Existence check only: no amount is deducted or reserved. Invoice
/// issuance does not consume budget the way a purchase commitment
/// would, and that asymmetry is deliberate — do not unify this with
/// reservation-style checks elsewhere without a product decision.
pub async fn check_budget(
    store: &dyn BudgetStore,
    coordinate: &BudgetCoordinate,
) -> Result<BudgetAllocation, FinalizeError> {
    let allocation = store.find_allocation(coordinate).await?;

    match allocation {
        None => Err(FinalizeError::BudgetUnavailable {
            reason: "no budget allocation is configured for this cost center and account"
                .to_string(),
        }),
        Some(a) if !a.usable => Err(FinalizeError::BudgetUnavailable {
            reason: "the budget allocation for this cost center and account is not usable"
                .to_string(),
        }),
        Some(a) => Ok(a),
    }
}
