//! Core components of the `rawg-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`RawgClient`] and its builder.
//! - The primary [`RawgError`] type.
//! - The resilience layer: retry/backoff, rate limiting and the response cache.
//! - Query parameters, endpoint paths and the HTTP executor.

/// The response cache (`ResponseCache`) and its key type.
pub mod cache;
/// The main client (`RawgClient`), builder, retry policy and rate limiter.
pub mod client;
/// Path templates for every remote resource.
pub mod endpoint;
/// The primary error type (`RawgError`) for the crate.
pub mod error;
/// The single-request executor and its response classification.
pub mod net;
/// Canonical query parameters and typed query builders.
pub mod params;
pub(crate) mod wire;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

// convenient re-exports so most code can just `use crate::core::RawgClient`
pub use cache::{CacheKey, ResponseCache};
pub use client::{CacheMode, RawgClient, RawgClientBuilder, RetryConfig};
pub use endpoint::Endpoint;
pub use error::RawgError;
pub use net::ApiResponse;
pub use params::{DateRange, GamesQuery, ListQuery, Ordering, QueryParams};
