//! Monetary calculator for procurement documents.
//!
//! Pure functions; every other pipeline stage builds on these. All
//! arithmetic is `rust_decimal` fixed-point so repeated recomputation
//! (draft edit, live preview, submit) yields bit-identical amounts.

use crate::error::FinalizeError;
use crate::models::{LineAmounts, LineItemInput, Totals};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn validate_inputs(
    line_items: &[LineItemInput],
    discount: Decimal,
    vat_rate: Decimal,
) -> Result<(), FinalizeError> {
    for item in line_items {
        if item.quantity.is_sign_negative() {
            return Err(FinalizeError::InvalidAmount {
                reason: format!("negative quantity on '{}'", item.description),
            });
        }
        if item.unit_price.is_sign_negative() {
            return Err(FinalizeError::InvalidAmount {
                reason: format!("negative unit price on '{}'", item.description),
            });
        }
        if let Some(rate) = item.tax_rate_override {
            if rate.is_sign_negative() {
                return Err(FinalizeError::InvalidAmount {
                    reason: format!("negative tax rate on '{}'", item.description),
                });
            }
        }
    }
    if discount.is_sign_negative() {
        return Err(FinalizeError::InvalidAmount {
            reason: "negative discount".to_string(),
        });
    }
    if vat_rate.is_sign_negative() {
        return Err(FinalizeError::InvalidAmount {
            reason: "negative VAT rate".to_string(),
        });
    }
    Ok(())
}

/// Rounded subtotal of a single line.
pub fn line_subtotal(item: &LineItemInput) -> Decimal {
    round_money(item.quantity * item.unit_price)
}

/// Compute the document-level totals.
///
/// `discount` is an absolute amount and never drives the discounted
/// subtotal negative; `vat_rate` is a percentage applied after the
/// discount.
pub fn compute_totals(
    line_items: &[LineItemInput],
    discount: Decimal,
    vat_rate: Decimal,
) -> Result<Totals, FinalizeError> {
    validate_inputs(line_items, discount, vat_rate)?;

    let subtotal: Decimal = line_items.iter().map(line_subtotal).sum();
    let discounted_subtotal = (subtotal - discount).max(Decimal::ZERO);
    let vat_amount = round_money(discounted_subtotal * vat_rate / Decimal::ONE_HUNDRED);
    let total = discounted_subtotal + vat_amount;

    Ok(Totals {
        subtotal,
        discounted_subtotal,
        vat_amount,
        total,
    })
}

/// Distribute the document discount across line items.
///
/// The discount is split equally per line (not proportionally to line
/// value) and each line is clamped at zero independently. Per-line
/// VAT honors the line's tax-rate override. Because each line rounds
/// on its own, the sum of line totals may differ from the document
/// total by a rounding epsilon of up to 0.01 per line; that drift is
/// accepted, not reconciled.
pub fn distribute_discount(
    line_items: &[LineItemInput],
    discount: Decimal,
    vat_rate: Decimal,
) -> Result<Vec<LineAmounts>, FinalizeError> {
    validate_inputs(line_items, discount, vat_rate)?;

    if line_items.is_empty() {
        return Ok(Vec::new());
    }

    let count = Decimal::from(line_items.len() as u64);
    let per_item_share = discount / count;

    Ok(line_items
        .iter()
        .map(|item| {
            let subtotal = line_subtotal(item);
            let discounted_amount = round_money((subtotal - per_item_share).max(Decimal::ZERO));
            let rate = item.tax_rate_override.unwrap_or(vat_rate);
            let vat_amount = round_money(discounted_amount * rate / Decimal::ONE_HUNDRED);
            LineAmounts {
                subtotal,
                discounted_amount,
                vat_amount,
                total: discounted_amount + vat_amount,
            }
        })
        .collect())
}
