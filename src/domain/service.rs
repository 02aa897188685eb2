//! Marketplace service records.
//!
//! A `Service` is passed through the listing cache untouched: the
//! cache never inspects, validates, or reorders items. Field names
//! follow the camelCase wire format of the Felix Platform API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lightweight service identifier used at the ports boundary.
pub type ServiceId = String;

/// Known lifecycle states of a marketplace service.
///
/// The backend owns the enumeration. Anything outside the four known
/// values is carried as `Other` instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Open,
    Pending,
    Completed,
    Cancelled,
    Other(String),
}

impl ServiceStatus {
    /// Parse a raw status string (case-insensitive).
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "open" => Self::Open,
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Whether the service has reached a terminal state.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// A marketplace listing as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Backend-assigned identifier.
    pub id: ServiceId,
    /// Account offering the service.
    pub sender: String,
    /// Counterparty account.
    pub receiver: String,
    /// Settled amount.
    pub amount: Decimal,
    /// Currency / asset code (e.g. "XLM", "USDC").
    pub currency: String,
    /// Listed price.
    pub price: Decimal,
    /// Free-text memo or description.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw lifecycle status, see [`Service::status`].
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// On-chain transaction reference, once settled.
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub rating: f64,
}

impl Service {
    /// Parsed lifecycle status.
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus::parse(&self.status)
    }
}
