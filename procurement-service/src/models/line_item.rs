//! Line item model for procurement-service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Line item as entered by the submitter, before finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Per-line VAT rate override (percentage). Falls back to the
    /// document-level rate when absent.
    pub tax_rate_override: Option<Decimal>,
    pub sort_order: i32,
}

/// Persisted line item snapshot, immutable once the document is
/// finalized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LineItem {
    pub line_item_id: Uuid,
    pub document_id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub tax_rate_override: Option<Decimal>,
    pub subtotal: Decimal,
    pub discounted_amount: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    pub sort_order: i32,
    pub created_utc: DateTime<Utc>,
}

/// Document-level monetary totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discounted_subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

/// Per-line amounts after discount distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub subtotal: Decimal,
    pub discounted_amount: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}
