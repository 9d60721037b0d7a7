//! Observers for the post service.

mod metrics;

pub use metrics::PostMetrics;
