//! Use Cases Layer - Application Logic
//!
//! Orchestrates domain types with the catalog port.
//!
//! Use cases:
//! - `ListingCache`: Windowed paging with stale-response fencing
//! - `ListingController`: View state (services, loading, error, pagination)

pub mod listing_cache;
pub mod listing_controller;

#[cfg(test)]
pub(crate) mod testing;

pub use listing_cache::ListingCache;
pub use listing_controller::{ListingController, ListingViewState};
