//! Felix Listing - Entry Point
//!
//! Loads configuration, wires the HTTP catalog into a listing
//! controller, and walks the marketplace listing page by page.
//!
//! Wiring sequence:
//! 1. Load config.toml (or `$FELIX_CONFIG`) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Load bearer token from `FELIX_ACCESS_TOKEN` (optional)
//! 4. Create ApiClient (HTTP + auth + throttling + metrics)
//! 5. Create HttpServiceCatalog (implements ServiceCatalog port)
//! 6. Create ListingCache + ListingController
//! 7. Walk all pages until the end or SIGINT
//! 8. Log request metrics

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use felix_listing::adapters::api::{AccessToken, ApiClient, ApiClientConfig, HttpServiceCatalog};
use felix_listing::adapters::metrics::ApiMetrics;
use felix_listing::config;
use felix_listing::ports::ServiceCatalog;
use felix_listing::usecases::{ListingCache, ListingController};

/// Environment variable overriding the config file path.
const CONFIG_ENV: &str = "FELIX_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        page_size = config.listing.default_page_size,
        "Starting Felix listing client"
    );

    // ── 3. Bearer token ─────────────────────────────────────
    let token = AccessToken::from_env();
    match &token {
        Some(t) => info!(expires_at = ?t.expires_at(), "Access token loaded"),
        None => warn!("FELIX_ACCESS_TOKEN not set, sending unauthenticated requests"),
    }

    // ── 4. HTTP client with throttling + metrics ────────────
    let metrics = if config.metrics.enabled {
        Some(Arc::new(ApiMetrics::new().context("Failed to create metrics registry")?))
    } else {
        None
    };

    let mut client = ApiClient::new(ApiClientConfig::from(&config.api), token)
        .context("Failed to create API client")?;
    if let Some(metrics) = &metrics {
        client = client.with_metrics(Arc::clone(metrics));
    }

    // ── 5-6. Catalog, cache, controller ─────────────────────
    let catalog = Arc::new(HttpServiceCatalog::new(
        Arc::new(client),
        config.api.services_path.clone(),
    ));
    let cache = Arc::new(ListingCache::new(catalog, config.listing.default_page_size));
    let controller = ListingController::new(cache, &config.listing);

    // ── 7. Walk the listing ─────────────────────────────────
    tokio::select! {
        result = walk_listing(&controller) => result?,
        _ = signal::ctrl_c() => {
            info!("SIGINT received, stopping listing walk");
        }
    }

    // ── 8. Report metrics ───────────────────────────────────
    if let Some(metrics) = metrics {
        match metrics.render() {
            Ok(text) => info!(metrics = %text, "Request metrics"),
            Err(e) => warn!(error = %e, "Failed to render metrics"),
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Load the first page, then advance until the last one.
///
/// Stops at the first failed fetch; the error is the controller's
/// surfaced message.
async fn walk_listing<C: ServiceCatalog>(controller: &ListingController<C>) -> Result<()> {
    controller.load().await;

    loop {
        let state = controller.state();
        if let Some(error) = &state.error {
            anyhow::bail!("Listing fetch failed: {error}");
        }

        let pagination = state.pagination;
        info!(
            page = pagination.page_number(),
            total_pages = pagination.total_pages,
            total_count = pagination.total_count,
            items = state.services.len(),
            "Listing page"
        );

        for service in &state.services {
            info!(
                id = %service.id,
                status = %service.status(),
                price = %service.price,
                currency = %service.currency,
                "Service"
            );
        }

        if !pagination.has_next_page {
            break;
        }
        controller.next_page().await;
    }

    Ok(())
}
