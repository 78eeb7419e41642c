//! The fixed probe → harvest → project pipeline

use crate::config::Config;
use crate::dataset;
use crate::error::{Error, Result};
use crate::harvest::{Harvester, HarvestReport};
use crate::http::{HttpClient, HttpClientConfig};
use crate::output;
use crate::provider::{GlassdoorClient, PageRetrier, EMPLOYERS_ACTION};
use crate::store::DocumentStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Store collection holding the raw employer documents
pub const COLLECTION: &str = "employers";

/// Summary of one pipeline run
#[derive(Debug)]
pub struct PipelineReport {
    /// Page count reported by the probe
    pub total_pages: u32,
    /// Harvest summary
    pub harvest: HarvestReport,
    /// Rows in the final dataset
    pub dataset_rows: usize,
    /// Where the dataset was written
    pub output_path: PathBuf,
}

/// Run the whole pipeline: probe the page count, harvest every page into the
/// store, then build and write the typed dataset.
pub async fn run(config: &Config) -> Result<PipelineReport> {
    let http = HttpClient::with_config(HttpClientConfig::default())?;
    run_with_http(config, http).await
}

/// Run the pipeline with a custom HTTP client (tests use short backoffs)
pub async fn run_with_http(config: &Config, http: HttpClient) -> Result<PipelineReport> {
    let api = Arc::new(GlassdoorClient::new(http, config));
    let retrier = Arc::new(PageRetrier::new(api, EMPLOYERS_ACTION));

    // Probe: page 1 carries the total page count
    let probe = retrier.get_response(1).await?;
    let total_pages = probe
        .response
        .total_pages
        .filter(|n| *n > 0)
        .ok_or_else(|| Error::probe("page 1 reported no page count"))?;
    info!(total_pages, "probe complete");

    let store = DocumentStore::open(&config.store_path)?;
    store.create_collection(COLLECTION)?;

    let harvest = Harvester::new(Arc::clone(&retrier))
        .with_workers(config.workers)
        .harvest(total_pages, &store, COLLECTION)
        .await?;

    let table = dataset::accumulate(&store, COLLECTION)?;
    let batch = dataset::finalize(table)?;
    let dataset_rows = batch.num_rows();

    output::write_batch_to_parquet(&config.output_path, &batch, None)?;
    info!(rows = dataset_rows, path = %config.output_path.display(), "dataset written");

    Ok(PipelineReport {
        total_pages,
        harvest,
        dataset_rows,
        output_path: config.output_path.clone(),
    })
}
