//! Felix HTTP Client - Throttled REST API Client
//!
//! Wraps reqwest with bearer auth, client-side rate limiting, a
//! concurrency cap, and opt-in retries for all Felix API calls.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use super::auth::AccessToken;
use super::types::error_message;
use crate::adapters::metrics::{ApiMetrics, RequestOutcome};
use crate::config::ApiConfig;

/// Configuration for the Felix HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
  /// Base URL for the Felix API.
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum concurrent requests.
  pub max_concurrent: usize,
  /// Retries on 429/5xx/transport errors (0 = single attempt).
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
  /// Client-side request rate ceiling.
  pub requests_per_second: u32,
}

impl Default for ApiClientConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8080".to_string(),
      timeout: Duration::from_secs(30),
      max_concurrent: 4,
      max_retries: 0,
      retry_base_delay: Duration::from_millis(200),
      requests_per_second: 10,
    }
  }
}

impl From<&ApiConfig> for ApiClientConfig {
  fn from(api: &ApiConfig) -> Self {
    Self {
      base_url: api.base_url.trim_end_matches('/').to_string(),
      timeout: api.timeout(),
      max_concurrent: api.max_concurrent,
      max_retries: api.max_retries,
      retry_base_delay: api.retry_base_delay(),
      requests_per_second: api.requests_per_second,
    }
  }
}

/// Failures of a Felix API call.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request never produced an HTTP response.
  #[error("request to {path} failed: {source}")]
  Transport {
    path: String,
    #[source]
    source: reqwest::Error,
  },

  /// The server answered with a non-success status.
  #[error("{path} returned {status}: {message}")]
  Status {
    path: String,
    status: StatusCode,
    message: String,
  },

  /// The response body did not match the expected shape.
  #[error("failed to decode {path} response: {message}")]
  Decode { path: String, message: String },

  /// The client is shutting down.
  #[error("HTTP client closed")]
  Closed,
}

/// Rate-limited HTTP client for the Felix API.
pub struct ApiClient {
  /// Underlying HTTP client.
  http: Client,
  /// Bearer token, if configured.
  token: Option<AccessToken>,
  /// Client configuration.
  config: ApiClientConfig,
  /// Concurrency limiter.
  semaphore: Arc<Semaphore>,
  /// Request rate limiter.
  limiter: DefaultDirectRateLimiter,
  /// Request metrics, if enabled.
  metrics: Option<Arc<ApiMetrics>>,
}

impl ApiClient {
  /// Create a new Felix API client.
  pub fn new(config: ApiClientConfig, token: Option<AccessToken>) -> anyhow::Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(5)
      .user_agent(concat!("felix-listing/", env!("CARGO_PKG_VERSION")))
      .build()?;

    let semaphore = Arc::new(Semaphore::new(config.max_concurrent.max(1)));
    let rate = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
    let limiter = RateLimiter::direct(Quota::per_second(rate));

    Ok(Self {
      http,
      token,
      config,
      semaphore,
      limiter,
      metrics: None,
    })
  }

  /// Attach a metrics registry.
  #[must_use]
  pub fn with_metrics(mut self, metrics: Arc<ApiMetrics>) -> Self {
    self.metrics = Some(metrics);
    self
  }

  /// Base URL requests are issued against.
  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  /// GET `path` with query parameters and decode the JSON body.
  pub async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<T, ApiError> {
    let response = self.execute_with_retry(Method::GET, path, query).await?;

    let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
      path: path.to_string(),
      source,
    })?;

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
      path: path.to_string(),
      message: e.to_string(),
    })
  }

  /// Execute request with auth, throttling, and optional retries.
  async fn execute_with_retry(
    &self,
    method: Method,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<Response, ApiError> {
    let _permit = self.semaphore.acquire().await.map_err(|_| ApiError::Closed)?;

    if self.token.as_ref().is_some_and(AccessToken::is_expired) {
      warn!(path, "Access token is expired, request will likely be rejected");
    }

    let url = format!("{}{}", self.config.base_url, path);
    let mut attempt = 0u32;

    loop {
      if attempt > 0 {
        let delay = retry_delay(self.config.retry_base_delay, attempt);
        debug!(attempt, delay_ms = delay.as_millis(), "Retrying request");
        sleep(delay).await;
      }

      self.limiter.until_ready().await;

      let request_id = Uuid::new_v4();
      let mut req = self
        .http
        .request(method.clone(), &url)
        .query(query)
        .header("x-request-id", request_id.to_string());

      if let Some(token) = &self.token {
        req = req.bearer_auth(token.secret());
      }

      let started = Instant::now();
      let can_retry = attempt < self.config.max_retries;

      match req.send().await {
        Ok(response) => {
          let status = response.status();
          self.observe(path, outcome_for(status), started.elapsed());

          if status.is_success() {
            debug!(%request_id, %status, path, "Request succeeded");
            return Ok(response);
          }

          if can_retry && (status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()) {
            warn!(%request_id, %status, attempt, "Transient API error, retrying");
            attempt += 1;
            continue;
          }

          let body = response.text().await.unwrap_or_default();
          return Err(ApiError::Status {
            path: path.to_string(),
            status,
            message: error_message(&body),
          });
        }
        Err(e) => {
          self.observe(path, RequestOutcome::NetworkError, started.elapsed());

          if can_retry && (e.is_timeout() || e.is_connect()) {
            warn!(%request_id, error = %e, attempt, "Request failed, retrying");
            attempt += 1;
            continue;
          }

          return Err(ApiError::Transport {
            path: path.to_string(),
            source: e,
          });
        }
      }
    }
  }

  fn observe(&self, path: &str, outcome: RequestOutcome, elapsed: Duration) {
    if let Some(metrics) = &self.metrics {
      metrics.observe(path, outcome, elapsed);
    }
  }
}

/// Longest wait between two attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff before retry `attempt` (1-based), capped at
/// `MAX_RETRY_DELAY`.
fn retry_delay(base: Duration, attempt: u32) -> Duration {
  let factor = 2u32.checked_pow(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
  base
    .checked_mul(factor)
    .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
}

fn outcome_for(status: StatusCode) -> RequestOutcome {
  if status.is_success() {
    RequestOutcome::Success
  } else if status.is_server_error() {
    RequestOutcome::ServerError
  } else {
    RequestOutcome::ClientError
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_from_api_section_trims_slash() {
    let api = ApiConfig {
      base_url: "https://api.felix.example/".to_string(),
      services_path: "/services".to_string(),
      timeout_ms: 5_000,
      max_concurrent: 2,
      max_retries: 1,
      retry_base_delay_ms: 50,
      requests_per_second: 5,
    };
    let config = ApiClientConfig::from(&api);
    assert_eq!(config.base_url, "https://api.felix.example");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.retry_base_delay, Duration::from_millis(50));
  }

  #[test]
  fn test_outcome_for_status() {
    assert_eq!(outcome_for(StatusCode::OK), RequestOutcome::Success);
    assert_eq!(outcome_for(StatusCode::NOT_FOUND), RequestOutcome::ClientError);
    assert_eq!(outcome_for(StatusCode::BAD_GATEWAY), RequestOutcome::ServerError);
  }

  #[test]
  fn test_retry_delay_doubles_then_caps() {
    let base = Duration::from_millis(100);
    assert_eq!(retry_delay(base, 1), Duration::from_millis(100));
    assert_eq!(retry_delay(base, 3), Duration::from_millis(400));
    assert_eq!(retry_delay(base, 33), MAX_RETRY_DELAY);
    assert_eq!(retry_delay(base, u32::MAX), MAX_RETRY_DELAY);
  }

  #[test]
  fn test_zero_rate_is_clamped() {
    let config = ApiClientConfig {
      requests_per_second: 0,
      max_concurrent: 0,
      ..ApiClientConfig::default()
    };
    assert!(ApiClient::new(config, None).is_ok());
  }
}
