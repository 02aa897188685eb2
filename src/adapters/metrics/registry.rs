//! Prometheus Metrics Registry - API Request Observability
//!
//! Counts listing requests by outcome and records their latency.
//! The binary renders the registry in text exposition format at exit.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Outcome label of a single HTTP attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    ClientError,
    ServerError,
    NetworkError,
}

impl RequestOutcome {
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::NetworkError => "network_error",
        }
    }
}

/// Prometheus metrics for the Felix API client.
///
/// All metrics follow the naming convention `felix_listing_*`.
pub struct ApiMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// HTTP attempts by endpoint and outcome.
    pub requests: IntCounterVec,
    /// HTTP attempt latency in seconds.
    pub request_latency: HistogramVec,
}

impl ApiMetrics {
    /// Create and register all metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("felix_listing_requests_total", "Felix API requests by outcome"),
            &["endpoint", "outcome"],
        )?;

        let request_latency = HistogramVec::new(
            HistogramOpts::new(
                "felix_listing_request_latency_seconds",
                "Felix API request latency in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["endpoint"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;

        Ok(Self {
            registry,
            requests,
            request_latency,
        })
    }

    /// Record one HTTP attempt.
    pub fn observe(&self, endpoint: &str, outcome: RequestOutcome, elapsed: Duration) {
        self.requests
            .with_label_values(&[endpoint, outcome.as_label()])
            .inc();
        self.request_latency
            .with_label_values(&[endpoint])
            .observe(elapsed.as_secs_f64());
    }

    /// Number of recorded attempts for an endpoint and outcome.
    pub fn count(&self, endpoint: &str, outcome: RequestOutcome) -> u64 {
        self.requests
            .with_label_values(&[endpoint, outcome.as_label()])
            .get()
    }

    /// Render all metrics in Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
