//! Listing Cache - Windowed Paging over the Service Catalog
//!
//! Holds the last applied page of marketplace services and derives
//! pagination state from it, so callers never track offsets:
//! - `fetch_page` replaces the window (no merge, no append)
//! - `next_page` / `previous_page` move one window
//! - `set_page_size` restarts from offset 0
//! - failures leave the cached window untouched
//!
//! Every fetch takes a sequence number. Only the response to the most
//! recently issued fetch is applied; older responses are dropped with
//! `ListingError::Superseded`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::pagination::{ListingPage, PaginationInfo};
use crate::ports::catalog::{ListingError, ServiceCatalog};

/// Caches one window of the service listing.
///
/// Methods take `&self`, so the cache can sit behind an `Arc` and be
/// driven from several tasks. The state lock is never held across a
/// catalog call.
pub struct ListingCache<C: ServiceCatalog> {
  /// Catalog port.
  catalog: Arc<C>,
  /// Last applied window.
  page: RwLock<ListingPage>,
  /// Sequence number of the most recently issued fetch.
  issued: AtomicU64,
}

impl<C: ServiceCatalog> ListingCache<C> {
  /// Create an empty cache with the given initial page size.
  pub fn new(catalog: Arc<C>, page_size: u64) -> Self {
    Self {
      catalog,
      page: RwLock::new(ListingPage::empty(page_size)),
      issued: AtomicU64::new(0),
    }
  }

  /// Fetch `page_size` services starting at `offset` and replace the
  /// cached window with them.
  ///
  /// # Errors
  /// - `InvalidPageSize` if `page_size` is zero (nothing is requested)
  /// - `Network` / `Server` from the catalog, cache unchanged
  /// - `Superseded` if a newer fetch was issued meanwhile, cache unchanged
  #[instrument(skip(self))]
  pub async fn fetch_page(&self, page_size: u64, offset: u64) -> Result<ListingPage, ListingError> {
    if page_size == 0 {
      return Err(ListingError::InvalidPageSize);
    }

    let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
    debug!(sequence, "Fetching listing window");

    let response = match self.catalog.list_services(page_size, offset).await {
      Ok(response) => response,
      Err(e) => {
        warn!(sequence, error = %e, "Listing fetch failed, keeping cached page");
        return Err(e);
      }
    };

    let returned = u64::try_from(response.items.len()).unwrap_or(u64::MAX);
    if returned > page_size {
      warn!(sequence, returned, "Server returned more items than requested");
      return Err(ListingError::malformed(format!(
        "requested {page_size} items, received {returned}"
      )));
    }

    let mut page = self.page.write().await;

    let latest = self.issued.load(Ordering::SeqCst);
    if sequence != latest {
      debug!(sequence, latest, "Discarding stale listing response");
      return Err(ListingError::Superseded { sequence });
    }

    *page = ListingPage {
      items: response.items,
      total_count: response.total,
      page_size,
      current_page_index: offset / page_size,
    };

    info!(
      sequence,
      page = page.current_page_index,
      items = page.items.len(),
      total = page.total_count,
      "Listing window updated"
    );

    Ok(page.clone())
  }

  /// Move to the next window.
  ///
  /// Past the known end this returns the current page without issuing
  /// a request. Check `has_next_page` first.
  pub async fn next_page(&self) -> Result<ListingPage, ListingError> {
    let current = self.snapshot().await;
    let offset = current
      .current_page_index
      .saturating_add(1)
      .saturating_mul(current.page_size);

    if offset >= current.total_count {
      debug!(offset, total = current.total_count, "No next page, keeping current window");
      return Ok(current);
    }

    self.fetch_page(current.page_size, offset).await
  }

  /// Move to the previous window, clamping at page 0.
  pub async fn previous_page(&self) -> Result<ListingPage, ListingError> {
    let current = self.snapshot().await;
    let offset = current.current_page_index.saturating_sub(1) * current.page_size;
    self.fetch_page(current.page_size, offset).await
  }

  /// Change the page size and restart from the first window.
  pub async fn set_page_size(&self, page_size: u64) -> Result<ListingPage, ListingError> {
    self.fetch_page(page_size, 0).await
  }

  /// Re-fetch the current window.
  pub async fn refresh(&self) -> Result<ListingPage, ListingError> {
    let current = self.snapshot().await;
    self.fetch_page(current.page_size, current.offset()).await
  }

  /// Derived pagination metadata for the cached window.
  pub async fn pagination_info(&self) -> PaginationInfo {
    self.page.read().await.pagination_info()
  }

  /// Clone of the cached window.
  pub async fn snapshot(&self) -> ListingPage {
    self.page.read().await.clone()
  }

  /// Sequence number of the most recently issued fetch (0 before any).
  pub fn latest_sequence(&self) -> u64 {
    self.issued.load(Ordering::SeqCst)
  }
}
