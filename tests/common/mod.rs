//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use felix_listing::domain::Service;
use felix_listing::ports::ServicePage;

/// A service with a deterministic id derived from its position.
pub fn service(n: u64) -> Service {
    let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Service {
        id: format!("svc-{n}"),
        sender: "GSENDER".to_string(),
        receiver: "GRECEIVER".to_string(),
        amount: Decimal::from(n * 10),
        currency: "USDC".to_string(),
        price: Decimal::from(n),
        description: None,
        status: "open".to_string(),
        created_at: ts,
        updated_at: ts,
        tx_hash: None,
        rating: 0.0,
    }
}

/// The window `offset..offset+limit` over a listing of `total` services.
pub fn window(total: u64, limit: u64, offset: u64) -> ServicePage {
    let end = offset.saturating_add(limit).min(total);
    ServicePage {
        items: (offset..end).map(service).collect(),
        total,
        limit,
        offset,
    }
}
