//! Glassdoor provider API
//!
//! One page of the Employers API is fetched as a GET request whose query
//! parameters carry the credentials and client identity. The response embeds
//! an application-level `success` flag that is distinct from the transport
//! status; [`PageRetrier`] gates on it with a bounded number of re-fetches
//! before accepting whatever the last response carried.

mod client;
mod retrier;
mod types;

pub use client::{GlassdoorClient, API_VERSION};
pub use retrier::{PageRetrier, MAX_PAGE_ATTEMPTS};
pub use types::{PageBody, PageResponse, RawRecord};

use crate::error::Result;
use async_trait::async_trait;

/// Resource section of the API that is harvested
pub const EMPLOYERS_ACTION: &str = "employers";

/// One provider round-trip per page of one resource action.
///
/// The seam between the harvest machinery and the real HTTP client; tests
/// substitute stubs with scripted responses.
#[async_trait]
pub trait EmployerApi: Send + Sync {
    /// Fetch one page. Only returns once a transport round-trip completed;
    /// the embedded `success` flag may still be false.
    async fn fetch_page(&self, action: &str, page: u32) -> Result<PageResponse>;
}

#[cfg(test)]
mod tests;
