//! Page window state and derived pagination metadata.
//!
//! Pure offset arithmetic. Nothing here performs I/O; the listing
//! cache owns a `ListingPage` and replaces it wholesale on every
//! applied fetch.

use serde::Serialize;

use super::service::Service;

/// Page size used before the caller picks one.
pub const DEFAULT_PAGE_SIZE: u64 = 6;

/// Page sizes offered to the user when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u64; 4] = [6, 12, 24, 48];

/// The page of services currently held by the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
    /// Items of the current window, in server order.
    pub items: Vec<Service>,
    /// Server-reported total at the time of the last applied fetch.
    pub total_count: u64,
    /// Items requested per page.
    pub page_size: u64,
    /// Zero-based index of the window held in `items`.
    pub current_page_index: u64,
}

impl ListingPage {
    /// An empty page with the given page size, before any fetch.
    pub const fn empty(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page_size,
            current_page_index: 0,
        }
    }

    /// Offset of the first item of the current window.
    pub const fn offset(&self) -> u64 {
        self.current_page_index * self.page_size
    }

    /// Derived pagination metadata.
    pub const fn pagination_info(&self) -> PaginationInfo {
        PaginationInfo::derive(self.current_page_index, self.page_size, self.total_count)
    }
}

impl Default for ListingPage {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata derived from a page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page_index: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationInfo {
    /// Derive metadata from the window position and server total.
    ///
    /// A zero page size yields zero pages and no next page.
    pub const fn derive(current_page_index: u64, page_size: u64, total_count: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };
        let has_next_page = page_size > 0
            && current_page_index.saturating_add(1).saturating_mul(page_size) < total_count;

        Self {
            current_page_index,
            total_pages,
            page_size,
            total_count,
            has_next_page,
            has_previous_page: current_page_index > 0,
        }
    }

    /// One-based page number for display.
    pub const fn page_number(&self) -> u64 {
        self.current_page_index.saturating_add(1)
    }
}
