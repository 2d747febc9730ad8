//! # API Shared
//!
//! Shared response types and services for the ward APIs.
//!
//! Contains:
//! - JSON response types (`types` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `cli` so both speak the same JSON.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
