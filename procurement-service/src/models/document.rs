//! Document model for procurement-service.

use crate::models::LineItemInput;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    RequestForQuotation,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::RequestForQuotation => "request_for_quotation",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "request_for_quotation" => DocumentKind::RequestForQuotation,
            _ => DocumentKind::Invoice,
        }
    }
}

/// Document lifecycle status.
///
/// Transitions only `Draft -> PendingApproval -> {Approved | Rejected}`;
/// the last two are terminal. The finalization pipeline owns the
/// `Draft -> PendingApproval` transition, the approval-decision flow
/// owns the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::PendingApproval => "pending_approval",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "pending_approval" => DocumentStatus::PendingApproval,
            "approved" => DocumentStatus::Approved,
            "rejected" => DocumentStatus::Rejected,
            _ => DocumentStatus::Draft,
        }
    }
}

/// A draft document as submitted for finalization.
///
/// Carries the raw line items the submitter entered; the pipeline
/// computes the financial snapshot from them and never reads amounts
/// back from storage mid-flight.
#[derive(Debug, Clone)]
pub struct DraftDocument {
    pub document_id: Uuid,
    pub kind: DocumentKind,
    pub document_date: NaiveDate,
    /// Absolute discount amount, not a percentage.
    pub discount: Decimal,
    /// VAT rate as a percentage (15 means 15%).
    pub vat_rate: Decimal,
    pub cost_center_id: Uuid,
    pub sub_cost_center_id: Uuid,
    pub account_code_id: Uuid,
    pub line_items: Vec<LineItemInput>,
}
