//! Prometheus metrics for procurement-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Finalization attempts by document kind and outcome.
pub static FINALIZATIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "procurement_finalizations_total",
        "Total number of finalization attempts",
        &["document_kind", "outcome"] // finalized, failed
    )
    .expect("Failed to register finalizations_total")
});

/// Finalization failures by pipeline stage and error kind.
pub static FINALIZATION_FAILURES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "procurement_finalization_failures_total",
        "Finalization failures by stage",
        &["stage", "error"]
    )
    .expect("Failed to register finalization_failures")
});

/// End-to-end finalization duration histogram.
pub static FINALIZE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "procurement_finalize_duration_seconds",
        "Finalization pipeline duration in seconds",
        &["document_kind"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register finalize_duration")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "procurement_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&FINALIZATIONS_TOTAL);
    Lazy::force(&FINALIZATION_FAILURES);
    Lazy::force(&FINALIZE_DURATION);
    Lazy::force(&DB_QUERY_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
