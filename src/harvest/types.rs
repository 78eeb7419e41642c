//! Harvest outcome types

use crate::error::Error;
use crate::provider::RawRecord;

/// Outcome of fetching one page.
///
/// Wrapping per page keeps one page's failure from voiding the pages that
/// completed.
#[derive(Debug)]
pub struct PageOutcome {
    /// 1-based page number
    pub page: u32,
    /// Records on success, the cause on failure
    pub result: Result<Vec<RawRecord>, Error>,
}

/// Summary of one harvest run
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// Pages requested
    pub pages_total: u32,
    /// Pages fetched and persisted
    pub pages_ok: u32,
    /// Pages whose fetch failed; candidates for a re-run
    pub pages_failed: Vec<u32>,
    /// Documents written to the store
    pub records_inserted: usize,
}

impl HarvestReport {
    pub(crate) fn new(pages_total: u32) -> Self {
        Self {
            pages_total,
            ..Self::default()
        }
    }

    /// True when every page persisted
    pub fn is_complete(&self) -> bool {
        self.pages_failed.is_empty()
    }
}
