//! Felix Platform API Adapter
//!
//! Implements the HTTP side of the service listing: bearer auth,
//! throttled requests, and the listing endpoint wire format.
//!
//! Sub-modules:
//! - `auth`: Bearer access token with JWT expiry decoding
//! - `catalog`: `ServiceCatalog` implementation over HTTP
//! - `client`: HTTP client with rate limiting and opt-in retries
//! - `types`: API request/response type definitions

pub mod auth;
pub mod catalog;
pub mod client;
pub mod types;

pub use auth::AccessToken;
pub use catalog::HttpServiceCatalog;
pub use client::{ApiClient, ApiClientConfig, ApiError};
