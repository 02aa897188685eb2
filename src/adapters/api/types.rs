//! Felix API Request/Response Types
//!
//! Wire types for the listing endpoint and the API's error body.

use serde::Deserialize;

use crate::domain::service::Service;
use crate::ports::catalog::ServicePage;

/// Response body of `GET /services?limit=&offset=`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListServicesResponse {
  /// Services of the requested window.
  pub items: Vec<Service>,
  /// Total services available server-side.
  #[serde(alias = "totalCount")]
  pub total: u64,
  /// Limit echoed by the server.
  #[serde(default)]
  pub limit: u64,
  /// Offset echoed by the server.
  #[serde(default)]
  pub offset: u64,
}

impl From<ListServicesResponse> for ServicePage {
  fn from(resp: ListServicesResponse) -> Self {
    Self {
      items: resp.items,
      total: resp.total,
      limit: resp.limit,
      offset: resp.offset,
    }
  }
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
  /// Human-readable message.
  pub message: Option<String>,
  /// Short error label.
  pub error: Option<String>,
}

/// Best message from an error response body.
///
/// Prefers `message`, then `error` from a JSON body, else the raw text.
pub fn error_message(body: &str) -> String {
  serde_json::from_str::<ApiErrorBody>(body)
    .ok()
    .and_then(|b| b.message.or(b.error))
    .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_list_response_deserialization() {
    let json = r#"{
      "items": [{
        "id": "svc-1",
        "sender": "GA",
        "receiver": "GB",
        "amount": "10",
        "currency": "USDC",
        "price": "2.5",
        "status": "completed",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
      }],
      "total": 14,
      "limit": 6,
      "offset": 0
    }"#;
    let resp: ListServicesResponse = serde_json::from_str(json).unwrap();
    let page = ServicePage::from(resp);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 14);
    assert_eq!(page.limit, 6);
  }

  #[test]
  fn test_envelope_echo_fields_optional() {
    let resp: ListServicesResponse =
      serde_json::from_str(r#"{"items": [], "totalCount": 3}"#).unwrap();
    assert_eq!(resp.total, 3);
    assert_eq!(resp.limit, 0);
    assert_eq!(resp.offset, 0);
  }

  #[test]
  fn test_error_message_prefers_message_field() {
    let body = r#"{"error": "Unauthorized", "message": "token expired"}"#;
    assert_eq!(error_message(body), "token expired");
    assert_eq!(error_message(r#"{"error": "Forbidden"}"#), "Forbidden");
    assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
  }
}
