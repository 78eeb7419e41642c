//! Application-level success gate over page fetches

use super::types::{PageResponse, RawRecord};
use super::EmployerApi;
use crate::error::Result;
use std::sync::Arc;
use tracing::warn;

/// Total fetch attempts per page while the provider reports `success: false`
pub const MAX_PAGE_ATTEMPTS: u32 = 5;

/// Re-fetches a page while the provider reports an application-level failure.
///
/// After [`MAX_PAGE_ATTEMPTS`] the last response is accepted regardless of
/// its `success` flag and its records are returned as-is, possibly empty.
/// Best-effort by policy: a page that never reports success contributes
/// whatever it last carried instead of failing the run. Transport errors are
/// not gated here; they propagate from the fetch layer.
pub struct PageRetrier {
    api: Arc<dyn EmployerApi>,
    action: String,
    max_attempts: u32,
}

impl PageRetrier {
    /// Create a retrier for one resource action
    pub fn new(api: Arc<dyn EmployerApi>, action: impl Into<String>) -> Self {
        Self {
            api,
            action: action.into(),
            max_attempts: MAX_PAGE_ATTEMPTS,
        }
    }

    /// Override the attempt cap (tests)
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Fetch one page through the success gate, returning the full response.
    pub async fn get_response(&self, page: u32) -> Result<PageResponse> {
        let mut response = self.api.fetch_page(&self.action, page).await?;
        let mut attempts = 1;

        while !response.success && attempts < self.max_attempts {
            response = self.api.fetch_page(&self.action, page).await?;
            attempts += 1;
        }

        if !response.success {
            warn!(
                page,
                attempts,
                records = response.record_count(),
                "page never reported success; accepting best-effort records"
            );
        }

        Ok(response)
    }

    /// Fetch one page and return its records.
    ///
    /// Callers must tolerate an empty sequence; it is not fatal.
    pub async fn get_page(&self, page: u32) -> Result<Vec<RawRecord>> {
        let response = self.get_response(page).await?;
        Ok(response.response.employers)
    }
}

impl std::fmt::Debug for PageRetrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRetrier")
            .field("action", &self.action)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
