//! HTTP-backed provider client

use super::types::PageResponse;
use super::EmployerApi;
use crate::config::Config;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use tracing::debug;

/// Provider protocol version (`v` query parameter)
pub const API_VERSION: &str = "1";

/// Client for the Glassdoor API.
///
/// Builds one request per fetch attempt from the resolved credentials and
/// client identity; the transport-level retry policy lives in [`HttpClient`].
pub struct GlassdoorClient {
    http: HttpClient,
    base_url: String,
    partner_id: String,
    partner_key: String,
    client_ip: String,
    user_agent: String,
}

impl GlassdoorClient {
    /// Create a client from the resolved configuration
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            partner_id: config.partner_id.clone(),
            partner_key: config.partner_key.clone(),
            client_ip: config.client_ip.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn page_request(&self, action: &str, page: u32) -> RequestConfig {
        RequestConfig::new()
            .query("v", API_VERSION)
            .query("format", "json")
            .query("t.p", &self.partner_id)
            .query("t.k", &self.partner_key)
            .query("userip", &self.client_ip)
            .query("useragent", &self.user_agent)
            .query("action", action)
            .query("pn", page.to_string())
    }
}

#[async_trait]
impl EmployerApi for GlassdoorClient {
    async fn fetch_page(&self, action: &str, page: u32) -> Result<PageResponse> {
        debug!(action, page, "fetching page");
        let request = self.page_request(action, page);
        let response: PageResponse = self.http.get_json(&self.base_url, &request).await?;
        debug!(
            action,
            page,
            success = response.success,
            records = response.record_count(),
            "fetched page"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for GlassdoorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlassdoorClient")
            .field("base_url", &self.base_url)
            .field("client_ip", &self.client_ip)
            .finish_non_exhaustive()
    }
}
