//! Typed client for the SRMiggy REST API.
//!
//! One method per backend endpoint, grouped by resource under
//! [`endpoints`]. Responses are decoded into the wire types from
//! `srmiggy-core`.

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;

/// Header carrying the per-attempt key on `POST /orders`.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";
