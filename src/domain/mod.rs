//! Domain layer - Listing models and pagination arithmetic.
//!
//! No I/O here (hexagonal architecture inner ring). All types are
//! serializable and testable in isolation.

pub mod pagination;
pub mod service;

pub use pagination::{ListingPage, PaginationInfo};
pub use service::{Service, ServiceId, ServiceStatus};
