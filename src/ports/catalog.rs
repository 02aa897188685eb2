//! Service Catalog Port - Paged Listing Interface
//!
//! Defines the trait the listing cache uses to fetch one window of
//! marketplace services. The backend's `total` is authoritative for
//! all pagination math.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::service::Service;

/// One window of services as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePage {
  /// Items in server order.
  pub items: Vec<Service>,
  /// Total number of services available server-side.
  pub total: u64,
  /// Limit echoed by the server.
  pub limit: u64,
  /// Offset echoed by the server.
  pub offset: u64,
}

/// Failures surfaced by listing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
  /// Transport-level failure (connect, timeout, reset).
  #[error("network failure: {0}")]
  Network(String),

  /// Non-success status or a payload that could not be understood.
  #[error(
    "server error{}: {}",
    .status.map(|s| format!(" {s}")).unwrap_or_default(),
    .message
  )]
  Server {
    /// HTTP status, `None` for malformed payloads on a 2xx response.
    status: Option<u16>,
    /// Server-provided or locally derived message.
    message: String,
  },

  /// A page size of zero was requested.
  #[error("page size must be positive")]
  InvalidPageSize,

  /// A newer fetch was issued before this one resolved; its response
  /// was discarded.
  #[error("fetch #{sequence} superseded by a newer request")]
  Superseded {
    /// Sequence number of the discarded fetch.
    sequence: u64,
  },
}

impl ListingError {
  /// Build a server error for a malformed payload.
  pub fn malformed(message: impl Into<String>) -> Self {
    Self::Server {
      status: None,
      message: message.into(),
    }
  }

  /// Whether the error came from the transport or the server.
  pub const fn is_remote(&self) -> bool {
    matches!(self, Self::Network(_) | Self::Server { .. })
  }
}

/// Trait for paged service listing providers.
///
/// Implementors issue exactly one request per call: no retry, no
/// caching, no fallback data.
#[async_trait]
pub trait ServiceCatalog: Send + Sync + 'static {
  /// Fetch `limit` services starting at `offset`.
  ///
  /// # Errors
  /// `ListingError::Network` on transport failure,
  /// `ListingError::Server` on non-success status or malformed body.
  async fn list_services(&self, limit: u64, offset: u64) -> Result<ServicePage, ListingError>;
}
