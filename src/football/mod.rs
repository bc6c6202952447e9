//! API-Football provider integration.
//!
//! This module owns everything that touches the external stats provider:
//! - `http`: authenticated client and raw endpoint calls
//! - `cache`: cache-aside fetch path over the key-value cache table
//! - `types`: typed wire structures for the provider's envelope
//! - `search`: name-normalized player search with league fallback
//! - `aggregate`: per-competition statistics reduced to season totals

pub mod aggregate;
pub mod cache;
pub mod http;
pub mod search;
pub mod types;

pub use cache::{CacheStatus, CacheStore};
pub use http::ApiFootballClient;
