//! Procurement Service - Document finalization pipeline.
//!
//! Runs every time a procurement document (an RFQ or a supplier
//! invoice) is submitted for approval: computes the financial
//! snapshot, resolves the accounting fiscal period and budget line,
//! routes the document to its first approver, and persists the
//! snapshot, approval transaction, and approver task as one unit.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
