//! Configuration Module - TOML-based Client Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! The access token is never part of the file; it comes from the
//! `FELIX_ACCESS_TOKEN` environment variable.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

use crate::domain::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};

/// Top-level configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any request is issued.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Application identity and logging.
  pub app: AppSection,
  /// Felix Platform API endpoint.
  pub api: ApiConfig,
  /// Listing defaults.
  #[serde(default)]
  pub listing: ListingConfig,
  /// Metrics reporting.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable client name.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Upper bound accepted for `api.max_retries`.
pub const MAX_RETRIES: u32 = 10;

/// API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// REST API base URL, without trailing slash.
  pub base_url: String,
  /// Path of the service listing endpoint.
  #[serde(default = "default_services_path")]
  pub services_path: String,
  /// Request timeout in milliseconds.
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  /// Maximum concurrent requests.
  #[serde(default = "default_max_concurrent")]
  pub max_concurrent: usize,
  /// Retries on 429/5xx. Zero keeps listing fetches single-shot.
  #[serde(default)]
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  #[serde(default = "default_retry_base_delay_ms")]
  pub retry_base_delay_ms: u64,
  /// Client-side request rate ceiling.
  #[serde(default = "default_requests_per_second")]
  pub requests_per_second: u32,
}

impl ApiConfig {
  pub const fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  pub const fn retry_base_delay(&self) -> Duration {
    Duration::from_millis(self.retry_base_delay_ms)
  }
}

/// Listing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingConfig {
  /// Page size of the first fetch.
  #[serde(default = "default_page_size")]
  pub default_page_size: u64,
  /// Page sizes the user may switch between.
  #[serde(default = "default_page_size_options")]
  pub page_size_options: Vec<u64>,
}

impl Default for ListingConfig {
  fn default() -> Self {
    Self {
      default_page_size: default_page_size(),
      page_size_options: default_page_size_options(),
    }
  }
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Collect request metrics and log them at exit.
  #[serde(default = "default_true")]
  pub enabled: bool,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self { enabled: true }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "felix-listing".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_services_path() -> String {
  "/services".to_string()
}

const fn default_timeout_ms() -> u64 {
  30_000
}

const fn default_max_concurrent() -> usize {
  4
}

const fn default_retry_base_delay_ms() -> u64 {
  200
}

const fn default_requests_per_second() -> u32 {
  10
}

const fn default_page_size() -> u64 {
  DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<u64> {
  DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
}

const fn default_true() -> bool {
  true
}
