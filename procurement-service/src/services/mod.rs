//! Pipeline services for procurement-service.

pub mod budget;
pub mod finalize;
pub mod metrics;
pub mod periods;
pub mod routing;
pub mod totals;

pub use finalize::{FinalizationOutcome, FinalizationPipeline};
pub use metrics::{get_metrics, init_metrics};
pub use routing::RoutedStep;
pub use totals::{compute_totals, distribute_discount};
