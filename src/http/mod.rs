//! HTTP client module
//!
//! Provides the JSON-over-HTTP GET capability used by the Graph client.
//!
//! # Features
//!
//! - **Timeouts**: Per-client default with per-request override
//! - **Optional Retries**: Configurable retry logic with backoff (off by default)
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Authentication**: Integration with auth module, skippable per request

mod client;
mod rate_limit;

pub(crate) use client::redact_query;
pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
