//! Glassdoor Harvest CLI
//!
//! Reads credentials from the environment, harvests every employer page and
//! writes the typed Parquet dataset.

use glassdoor_harvest::{pipeline, Config};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> glassdoor_harvest::Result<()> {
    let config = Config::from_env()?;
    let report = pipeline::run(&config).await?;

    if report.harvest.is_complete() {
        println!(
            "harvested {} pages, {} rows written to {}",
            report.harvest.pages_ok,
            report.dataset_rows,
            report.output_path.display()
        );
    } else {
        println!(
            "harvested {}/{} pages ({} failed), {} rows written to {}",
            report.harvest.pages_ok,
            report.harvest.pages_total,
            report.harvest.pages_failed.len(),
            report.dataset_rows,
            report.output_path.display()
        );
    }
    Ok(())
}
