//! Configuration for procurement-service.

use crate::models::DocumentKind;
use serde::Deserialize;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct ProcurementConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub approval: ApprovalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Approval process titles per document kind. Lookup is by exact
/// title, so these must match the configured process records
/// verbatim.
#[derive(Debug, Deserialize, Clone)]
pub struct ApprovalConfig {
    #[serde(default = "default_rfq_process_title")]
    pub rfq_process_title: String,
    #[serde(default = "default_invoice_process_title")]
    pub invoice_process_title: String,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            rfq_process_title: default_rfq_process_title(),
            invoice_process_title: default_invoice_process_title(),
        }
    }
}

impl ApprovalConfig {
    pub fn process_title(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::RequestForQuotation => &self.rfq_process_title,
            DocumentKind::Invoice => &self.invoice_process_title,
        }
    }
}

fn default_service_name() -> String {
    "procurement-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_rfq_process_title() -> String {
    "RFQ Approval".to_string()
}

fn default_invoice_process_title() -> String {
    "Maharat Invoice Approval".to_string()
}

impl ProcurementConfig {
    pub fn load() -> Result<Self, AppError> {
        service_core::config::load()
    }
}
