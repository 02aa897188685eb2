//! In-memory catalog used by the usecase unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::service::Service;
use crate::ports::catalog::{ListingError, ServiceCatalog, ServicePage};

/// Build a service with a deterministic id.
pub fn service(n: u64) -> Service {
  let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
  Service {
    id: format!("svc-{n}"),
    sender: "GSENDER".to_string(),
    receiver: "GRECEIVER".to_string(),
    amount: Decimal::from(n * 10),
    currency: "USDC".to_string(),
    price: Decimal::from(n),
    description: Some(format!("service {n}")),
    status: "open".to_string(),
    created_at: ts,
    updated_at: ts,
    tx_hash: None,
    rating: 4.0,
  }
}

/// Serves windows over `total` generated services and records every call.
pub struct FakeCatalog {
  total: u64,
  failing: AtomicBool,
  calls: Mutex<Vec<(u64, u64)>>,
}

impl FakeCatalog {
  pub fn new(total: u64) -> Self {
    Self {
      total,
      failing: AtomicBool::new(false),
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  pub fn calls(&self) -> Vec<(u64, u64)> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl ServiceCatalog for FakeCatalog {
  async fn list_services(&self, limit: u64, offset: u64) -> Result<ServicePage, ListingError> {
    self.calls.lock().unwrap().push((limit, offset));
    if self.failing.load(Ordering::SeqCst) {
      return Err(ListingError::Network("connection refused".to_string()));
    }
    let end = offset.saturating_add(limit).min(self.total);
    let items = (offset..end).map(service).collect();
    Ok(ServicePage {
      items,
      total: self.total,
      limit,
      offset,
    })
  }
}
