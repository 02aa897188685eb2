//! Metrics Adapter
//!
//! Prometheus counters and latency histograms for Felix API requests.

pub mod registry;

pub use registry::{ApiMetrics, RequestOutcome};
