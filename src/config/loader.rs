//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{AppConfig, MAX_RETRIES};

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    base_url = %config.api.base_url,
    page_size = config.listing.default_page_size,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  // API validation
  let base_url = &config.api.base_url;
  anyhow::ensure!(!base_url.is_empty(), "API base_url must not be empty");
  anyhow::ensure!(
    base_url.starts_with("http://") || base_url.starts_with("https://"),
    "API base_url must start with http:// or https://, got {base_url}"
  );
  anyhow::ensure!(
    config.api.services_path.starts_with('/'),
    "services_path must start with '/', got {}",
    config.api.services_path
  );
  anyhow::ensure!(config.api.timeout_ms > 0, "timeout_ms must be positive");
  anyhow::ensure!(
    config.api.max_concurrent > 0,
    "max_concurrent must be positive"
  );
  anyhow::ensure!(
    config.api.max_retries <= MAX_RETRIES,
    "max_retries must be at most {MAX_RETRIES}, got {}",
    config.api.max_retries
  );
  anyhow::ensure!(
    config.api.requests_per_second > 0,
    "requests_per_second must be positive"
  );

  // Listing validation
  let listing = &config.listing;
  anyhow::ensure!(
    !listing.page_size_options.is_empty(),
    "page_size_options must not be empty"
  );
  anyhow::ensure!(
    listing.page_size_options.iter().all(|&n| n > 0),
    "page_size_options must all be positive, got {:?}",
    listing.page_size_options
  );
  anyhow::ensure!(
    listing.page_size_options.contains(&listing.default_page_size),
    "default_page_size {} is not one of page_size_options {:?}",
    listing.default_page_size,
    listing.page_size_options
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const MINIMAL: &str = r#"
[app]
name = "felix-listing"

[api]
base_url = "https://api.felix.example"
"#;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_minimal_config_uses_defaults() {
    let config = parse_config(MINIMAL).unwrap();
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.api.services_path, "/services");
    assert_eq!(config.api.max_retries, 0);
    assert_eq!(config.api.timeout_ms, 30_000);
    assert_eq!(config.listing.default_page_size, 6);
    assert_eq!(config.listing.page_size_options, vec![6, 12, 24, 48]);
    assert!(config.metrics.enabled);
  }

  #[test]
  fn test_rejects_non_http_base_url() {
    let toml = MINIMAL.replace("https://api.felix.example", "ftp://api.felix.example");
    let err = parse_config(&toml).unwrap_err();
    assert!(err.to_string().contains("http://"));
  }

  #[test]
  fn test_rejects_default_size_outside_options() {
    let toml = format!(
      "{MINIMAL}\n[listing]\ndefault_page_size = 10\npage_size_options = [6, 12]\n"
    );
    let err = parse_config(&toml).unwrap_err();
    assert!(err.to_string().contains("default_page_size"));
  }

  #[test]
  fn test_rejects_zero_page_size_option() {
    let toml = format!(
      "{MINIMAL}\n[listing]\ndefault_page_size = 6\npage_size_options = [0, 6]\n"
    );
    assert!(parse_config(&toml).is_err());
  }

  #[test]
  fn test_rejects_unbounded_retries() {
    let toml = MINIMAL.replace(
      "base_url = \"https://api.felix.example\"",
      "base_url = \"https://api.felix.example\"\nmax_retries = 40",
    );
    let err = parse_config(&toml).unwrap_err();
    assert!(err.to_string().contains("max_retries"));
  }

  #[test]
  fn test_rejects_relative_services_path() {
    let toml = MINIMAL.replace(
      "base_url = \"https://api.felix.example\"",
      "base_url = \"https://api.felix.example\"\nservices_path = \"services\"",
    );
    assert!(parse_config(&toml).is_err());
  }
}
