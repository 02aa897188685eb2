//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies.
//!
//! Adapter categories:
//! - `api`: Felix Platform REST API client and auth
//! - `metrics`: Prometheus request metrics

pub mod api;
pub mod metrics;
