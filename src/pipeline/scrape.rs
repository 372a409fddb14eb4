// src/pipeline/scrape.rs

//! Scrape pipeline entry point shared by the CLI, Lambda and HTTP trigger.

use chrono::Utc;

use crate::error::Result;
use crate::models::Config;
use crate::services::{AvailabilityScraper, RunOptions, RunSummary};
use crate::storage::SnapshotStore;

/// Run one scrape with the given configuration against `store`.
pub async fn run_scrape(
    config: &Config,
    store: &dyn SnapshotStore,
    options: RunOptions,
) -> Result<RunSummary> {
    let start_time = Utc::now();
    let scraper = AvailabilityScraper::from_config(config)?;

    log::info!(
        "Scraping {} voyages in {} batch(es) with the {:?} extractor",
        scraper.registry().len(),
        scraper.batch_count(),
        config.scraper.strategy
    );
    if !options.persist {
        log::info!("Dry run: {} will not be written", store.location());
    }

    let summary = scraper.run(store, options).await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Scrape finished in {}ms: {} updated, {} failed",
        elapsed.num_milliseconds(),
        summary.updated_count,
        summary.failed_count
    );

    Ok(summary)
}
