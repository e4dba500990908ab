//! service-core: Shared infrastructure for procurement services.
pub mod config;
pub mod error;
pub mod observability;

pub use serde;
pub use tracing;
