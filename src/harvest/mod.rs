//! Parallel page harvester
//!
//! Fans one [`PageRetrier`] call per page out across a bounded worker pool,
//! waits for every page to finish (single join barrier; nothing is persisted
//! until all fetches complete), then bulk-inserts one batch per page into the
//! document store. One bulk-insert per page, not per record, amortizes I/O;
//! page counts are bounded (low thousands) so holding all batches across the
//! barrier is acceptable.

mod types;

pub use types::{HarvestReport, PageOutcome};

use crate::error::Result;
use crate::provider::PageRetrier;
use crate::store::DocumentStore;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// Harvests all pages of one resource action into a store collection.
///
/// Each page's outcome is captured independently: a failed page is reported
/// in the [`HarvestReport`] and skipped at persistence time instead of
/// aborting the pages that did complete.
pub struct Harvester {
    retrier: Arc<PageRetrier>,
    workers: usize,
}

impl Harvester {
    /// Create a harvester with the default worker count
    /// (available parallelism minus one, at least one)
    pub fn new(retrier: Arc<PageRetrier>) -> Self {
        Self {
            retrier,
            workers: crate::config::default_workers(),
        }
    }

    /// Override the worker count
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Fetch pages [1, total_pages] and persist every page's records.
    ///
    /// Ordering across pages carries no meaning for the final store (records
    /// merge as a set); outcomes are only sorted for readable progress logs.
    pub async fn harvest(
        &self,
        total_pages: u32,
        store: &DocumentStore,
        collection: &str,
    ) -> Result<HarvestReport> {
        info!(total_pages, workers = self.workers, "starting harvest");

        let mut outcomes: Vec<PageOutcome> = stream::iter(1..=total_pages)
            .map(|page| {
                let retrier = Arc::clone(&self.retrier);
                async move {
                    let result = retrier.get_page(page).await;
                    PageOutcome { page, result }
                }
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        // All pages are back; the barrier has been passed.
        outcomes.sort_by_key(|o| o.page);

        let mut report = HarvestReport::new(total_pages);
        info!("inserting employer records into the store");
        for outcome in outcomes {
            match outcome.result {
                Ok(records) => {
                    store.bulk_insert(collection, &records)?;
                    report.records_inserted += records.len();
                    report.pages_ok += 1;
                }
                Err(e) => {
                    warn!(page = outcome.page, error = %e, "page failed; skipping");
                    report.pages_failed.push(outcome.page);
                }
            }
        }

        info!(
            pages_ok = report.pages_ok,
            pages_failed = report.pages_failed.len(),
            records = report.records_inserted,
            "harvest complete"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for Harvester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harvester")
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}
