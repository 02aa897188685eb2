//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ServiceCatalog`: Paged marketplace service listing

pub mod catalog;

pub use catalog::{ListingError, ServiceCatalog, ServicePage};
