//! Provider wire types

use serde::Deserialize;
use serde_json::Value;

/// One raw provider record: an open-ended key/value mapping.
///
/// Not all keys are present for all records; projection tolerates gaps.
pub type RawRecord = serde_json::Map<String, Value>;

/// One parsed page of the Employers API.
///
/// Deserialization is tolerant: a malformed or truncated body yields an
/// unsuccessful page with no records rather than a parse failure, mirroring
/// how the provider omits `response` on errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageResponse {
    /// Application-level success flag, distinct from the HTTP status
    #[serde(default)]
    pub success: bool,
    /// Payload; absent on provider-side errors
    #[serde(default)]
    pub response: PageBody,
}

/// Payload of one page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageBody {
    /// Records on this page; may be empty
    #[serde(default)]
    pub employers: Vec<RawRecord>,
    /// Total page count; only meaningful on page 1
    #[serde(default, rename = "totalNumberOfPages")]
    pub total_pages: Option<u32>,
}

impl PageResponse {
    /// Number of records embedded in this page
    pub fn record_count(&self) -> usize {
        self.response.employers.len()
    }
}
