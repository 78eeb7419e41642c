//! HTTP transport with retry and rate limiting
//!
//! The fetch layer for one page request. Any non-2xx transport status is
//! retried with backoff up to a capped attempt count; exhaustion surfaces as
//! [`Error::TransportUnavailable`](crate::Error::TransportUnavailable) rather
//! than retrying forever.

mod client;
mod rate_limit;

pub use client::{BackoffType, HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
