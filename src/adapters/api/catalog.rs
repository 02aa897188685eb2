//! Service Catalog Adapter - Felix Listing Endpoint
//!
//! Implements the `ServiceCatalog` port over
//! `GET {services_path}?limit=&offset=` and maps client errors onto
//! the port's network/server split.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::client::{ApiClient, ApiError};
use super::types::ListServicesResponse;
use crate::ports::catalog::{ListingError, ServiceCatalog, ServicePage};

/// Service catalog backed by the Felix REST API.
pub struct HttpServiceCatalog {
    client: Arc<ApiClient>,
    services_path: String,
}

impl HttpServiceCatalog {
    /// Create a catalog adapter for the given listing path.
    pub fn new(client: Arc<ApiClient>, services_path: impl Into<String>) -> Self {
        Self {
            client,
            services_path: services_path.into(),
        }
    }
}

#[async_trait]
impl ServiceCatalog for HttpServiceCatalog {
    async fn list_services(&self, limit: u64, offset: u64) -> Result<ServicePage, ListingError> {
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];

        let response: ListServicesResponse = self
            .client
            .get_json(&self.services_path, &query)
            .await?;

        debug!(
            limit,
            offset,
            items = response.items.len(),
            total = response.total,
            "Service listing fetched"
        );

        Ok(response.into())
    }
}

impl From<ApiError> for ListingError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport { .. } | ApiError::Closed => Self::Network(err.to_string()),
            ApiError::Status {
                status, message, ..
            } => Self::Server {
                status: Some(status.as_u16()),
                message,
            },
            ApiError::Decode { message, .. } => Self::malformed(message),
        }
    }
}
