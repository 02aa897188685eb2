//! Listing Controller - View State for Presentation Layers
//!
//! Wraps the listing cache with the state a marketplace screen renders:
//! the current services, a loading flag, the last error message, and
//! pagination metadata. Updates are published on a `watch` channel.
//!
//! Behavior:
//! - Navigation is ignored while a fetch is in flight
//! - Failures set `error` and keep the last good services visible
//! - Page sizes are restricted to the configured option set

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ListingConfig;
use crate::domain::pagination::{ListingPage, PaginationInfo};
use crate::domain::service::Service;
use crate::ports::catalog::{ListingError, ServiceCatalog};

use super::listing_cache::ListingCache;

/// Snapshot of everything a listing screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingViewState {
  /// Services of the current window.
  pub services: Vec<Service>,
  /// A fetch is in flight.
  pub loading: bool,
  /// Message of the last failed fetch, cleared on success.
  pub error: Option<String>,
  /// Pagination metadata of the current window.
  pub pagination: PaginationInfo,
}

impl ListingViewState {
  fn initial(page_size: u64) -> Self {
    Self {
      services: Vec::new(),
      loading: false,
      error: None,
      pagination: PaginationInfo::derive(0, page_size, 0),
    }
  }
}

/// Resets the loading flag even if the fetch future is dropped.
struct LoadingGuard<'a> {
  flag: &'a AtomicBool,
  state_tx: &'a watch::Sender<ListingViewState>,
}

impl Drop for LoadingGuard<'_> {
  fn drop(&mut self) {
    self.flag.store(false, Ordering::SeqCst);
    self.state_tx.send_modify(|s| s.loading = false);
  }
}

/// Drives a `ListingCache` on behalf of a listing screen.
pub struct ListingController<C: ServiceCatalog> {
  /// Shared listing cache.
  cache: Arc<ListingCache<C>>,
  /// View state publisher.
  state_tx: watch::Sender<ListingViewState>,
  /// Set while a fetch is in flight.
  loading: AtomicBool,
  /// Page size used by `load`.
  default_page_size: u64,
  /// Page sizes the user may pick.
  page_size_options: Vec<u64>,
}

impl<C: ServiceCatalog> ListingController<C> {
  /// Create a controller over an existing cache.
  pub fn new(cache: Arc<ListingCache<C>>, config: &ListingConfig) -> Self {
    let (state_tx, _) = watch::channel(ListingViewState::initial(config.default_page_size));
    Self {
      cache,
      state_tx,
      loading: AtomicBool::new(false),
      default_page_size: config.default_page_size,
      page_size_options: config.page_size_options.clone(),
    }
  }

  /// Load the first window at the default page size.
  ///
  /// Returns `false` if the request was ignored because a fetch is
  /// already in flight.
  pub async fn load(&self) -> bool {
    self.run("load", self.cache.set_page_size(self.default_page_size)).await
  }

  /// Advance one window.
  pub async fn next_page(&self) -> bool {
    self.run("next_page", self.cache.next_page()).await
  }

  /// Go back one window.
  pub async fn previous_page(&self) -> bool {
    self.run("previous_page", self.cache.previous_page()).await
  }

  /// Re-fetch the current window.
  pub async fn refresh(&self) -> bool {
    self.run("refresh", self.cache.refresh()).await
  }

  /// Switch to one of the configured page sizes.
  ///
  /// Sizes outside the option set are reported through `error`
  /// without issuing a request. Ignored while a fetch is in flight.
  pub async fn set_page_size(&self, page_size: u64) -> bool {
    if self.loading.load(Ordering::SeqCst) {
      debug!(page_size, "Fetch in flight, ignoring page size change");
      return false;
    }
    if !self.page_size_options.contains(&page_size) {
      warn!(page_size, options = ?self.page_size_options, "Unsupported page size");
      self.state_tx.send_modify(|s| {
        s.error = Some(format!("unsupported page size {page_size}"));
      });
      return false;
    }
    self.run("set_page_size", self.cache.set_page_size(page_size)).await
  }

  /// Current view state.
  pub fn state(&self) -> ListingViewState {
    self.state_tx.borrow().clone()
  }

  /// Subscribe to view state updates.
  pub fn subscribe(&self) -> watch::Receiver<ListingViewState> {
    self.state_tx.subscribe()
  }

  /// Page sizes offered to the user.
  pub fn page_size_options(&self) -> &[u64] {
    &self.page_size_options
  }

  /// Underlying cache.
  pub fn cache(&self) -> &Arc<ListingCache<C>> {
    &self.cache
  }

  async fn run<F>(&self, action: &'static str, fetch: F) -> bool
  where
    F: Future<Output = Result<ListingPage, ListingError>>,
  {
    if self
      .loading
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      debug!(action, "Fetch in flight, ignoring request");
      return false;
    }

    let _guard = LoadingGuard {
      flag: &self.loading,
      state_tx: &self.state_tx,
    };
    self.state_tx.send_modify(|s| s.loading = true);

    match fetch.await {
      Ok(page) => {
        let pagination = page.pagination_info();
        info!(
          action,
          page = pagination.page_number(),
          total_pages = pagination.total_pages,
          "Listing view updated"
        );
        self.state_tx.send_modify(|s| {
          s.services = page.items;
          s.pagination = pagination;
          s.error = None;
        });
      }
      Err(ListingError::Superseded { sequence }) => {
        debug!(action, sequence, "Listing response superseded");
      }
      Err(e) => {
        warn!(action, error = %e, "Listing fetch failed");
        self.state_tx.send_modify(|s| s.error = Some(e.to_string()));
      }
    }

    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::usecases::testing::FakeCatalog;

  fn controller(total: u64) -> (Arc<FakeCatalog>, ListingController<FakeCatalog>) {
    let catalog = Arc::new(FakeCatalog::new(total));
    let cache = Arc::new(ListingCache::new(Arc::clone(&catalog), 6));
    let config = ListingConfig {
      default_page_size: 6,
      page_size_options: vec![6, 12, 24, 48],
    };
    (catalog, ListingController::new(cache, &config))
  }

  #[tokio::test]
  async fn test_load_populates_view() {
    let (_, ctl) = controller(14);
    assert!(ctl.load().await);

    let state = ctl.state();
    assert_eq!(state.services.len(), 6);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.pagination.total_pages, 3);
  }

  #[tokio::test]
  async fn test_error_keeps_last_good_services() {
    let (catalog, ctl) = controller(14);
    ctl.load().await;
    let before = ctl.state();

    catalog.set_failing(true);
    ctl.next_page().await;

    let after = ctl.state();
    assert_eq!(after.services, before.services);
    assert_eq!(after.pagination, before.pagination);
    assert!(after.error.as_deref().unwrap().contains("connection refused"));
    assert!(!after.loading);
  }

  #[tokio::test]
  async fn test_success_clears_error() {
    let (catalog, ctl) = controller(14);
    catalog.set_failing(true);
    ctl.load().await;
    assert!(ctl.state().error.is_some());

    catalog.set_failing(false);
    ctl.refresh().await;
    assert!(ctl.state().error.is_none());
    assert_eq!(ctl.state().services.len(), 6);
  }

  #[tokio::test]
  async fn test_unsupported_page_size_is_rejected_locally() {
    let (catalog, ctl) = controller(14);
    assert!(!ctl.set_page_size(7).await);
    assert!(catalog.calls().is_empty());
    assert_eq!(ctl.state().error.as_deref(), Some("unsupported page size 7"));
  }

  #[tokio::test]
  async fn test_subscribers_see_updates() {
    let (_, ctl) = controller(14);
    let mut rx = ctl.subscribe();
    ctl.load().await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().services.len(), 6);
  }

  #[tokio::test]
  async fn test_navigation_ignored_while_loading() {
    let (catalog, ctl) = controller(14);
    ctl.loading.store(true, Ordering::SeqCst);
    assert!(!ctl.next_page().await);
    assert!(!ctl.load().await);
    assert!(catalog.calls().is_empty());
  }

  #[tokio::test]
  async fn test_unsupported_page_size_ignored_while_loading() {
    let (catalog, ctl) = controller(14);
    ctl.loading.store(true, Ordering::SeqCst);
    assert!(!ctl.set_page_size(7).await);
    assert!(ctl.state().error.is_none());
    assert!(catalog.calls().is_empty());
  }
}
