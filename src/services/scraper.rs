// src/services/scraper.rs

//! Availability scraper service.
//!
//! Fetches every registered voyage in sequential batches, extracts and
//! normalizes availability, and merges the results into a snapshot.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use log::Level;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Config, Snapshot, VoyageAvailability, VoyageEntry, VoyageRegistry};
use crate::services::extract::Extractor;
use crate::services::fetch::{HttpFetcher, PageSource};
use crate::storage::SnapshotStore;

/// Caller-controlled switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Log per-voyage progress at info level instead of debug
    pub verbose: bool,
    /// Write the snapshot back to the store when something changed
    pub persist: bool,
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub updated: bool,
    pub updated_count: usize,
    pub failed_count: usize,
    pub message: String,
    /// Snapshot after the run, persisted or not
    pub snapshot: Snapshot,
}

/// Per-run counters of [`AvailabilityScraper::scrape_into`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeTally {
    pub updated: usize,
    pub failed: usize,
}

/// Orchestrates fetch, extract and merge across all registered voyages.
pub struct AvailabilityScraper {
    registry: VoyageRegistry,
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn Extractor>,
    batch_size: usize,
}

impl AvailabilityScraper {
    pub const DEFAULT_BATCH_SIZE: usize = 10;

    pub fn new(
        registry: VoyageRegistry,
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            registry,
            source,
            extractor,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }

    /// Bound the number of concurrent requests. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Build a scraper that fetches over HTTP with the configured strategy.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = Arc::new(HttpFetcher::new(&config.scraper)?);
        let extractor: Arc<dyn Extractor> = Arc::from(config.scraper.strategy.extractor());
        Ok(Self::new(config.registry()?, source, extractor)
            .with_batch_size(config.scraper.batch_size))
    }

    pub fn registry(&self) -> &VoyageRegistry {
        &self.registry
    }

    pub fn batch_count(&self) -> usize {
        self.registry.len().div_ceil(self.batch_size)
    }

    /// Fetch and extract one voyage.
    async fn scrape_voyage(&self, entry: &VoyageEntry) -> Result<VoyageAvailability> {
        let payload = self.source.fetch(&entry.reference).await?;
        self.extractor
            .extract(&entry.reference.to_string(), &payload)
    }

    /// Scrape every voyage and merge successes into `snapshot`.
    ///
    /// Successful voyages replace their entry wholesale; failed voyages keep
    /// whatever the snapshot already had. The timestamp is not touched.
    pub async fn scrape_into(&self, snapshot: &mut Snapshot, verbose: bool) -> ScrapeTally {
        let level = if verbose { Level::Info } else { Level::Debug };
        let total_batches = self.batch_count();
        let mut tally = ScrapeTally::default();

        for (index, batch) in self.registry.entries().chunks(self.batch_size).enumerate() {
            log::log!(level, "Batch {}/{}", index + 1, total_batches);

            let results = join_all(batch.iter().map(|entry| async move {
                log::log!(level, "Scraping {} ({})...", entry.slug, entry.reference);
                (entry, self.scrape_voyage(entry).await)
            }))
            .await;

            for (entry, result) in results {
                match result {
                    Ok(availability) => {
                        log::log!(level, "  OK - {}", entry.slug);
                        snapshot.replace_voyage(entry.slug.clone(), availability);
                        tally.updated += 1;
                    }
                    Err(e) => {
                        log::warn!("  Skipped - {}: {}", entry.slug, e);
                        tally.failed += 1;
                    }
                }
            }
        }

        tally
    }

    /// Run a scrape on an owned snapshot.
    ///
    /// Stamps and (optionally) persists only when at least one voyage was
    /// updated. A persistence failure is returned to the caller.
    pub async fn run_on(
        &self,
        mut snapshot: Snapshot,
        store: &dyn SnapshotStore,
        options: RunOptions,
    ) -> Result<RunSummary> {
        let tally = self.scrape_into(&mut snapshot, options.verbose).await;

        let message = if tally.updated > 0 {
            snapshot.stamp(Utc::now());
            if options.persist {
                store.save(&snapshot).await?;
            }
            format!("Updated {} cruises", tally.updated)
        } else {
            "No updates made (all fetches failed or returned no data)".to_string()
        };

        log::info!("{}", message);

        Ok(RunSummary {
            updated: tally.updated > 0,
            updated_count: tally.updated,
            failed_count: tally.failed,
            message,
            snapshot,
        })
    }

    /// Load the current snapshot from `store` and run a scrape on it.
    ///
    /// A missing or unreadable snapshot starts the run from empty.
    pub async fn run(&self, store: &dyn SnapshotStore, options: RunOptions) -> Result<RunSummary> {
        let snapshot = match store.load().await {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Loaded existing data (last updated: {})",
                    snapshot.last_updated
                );
                snapshot
            }
            Ok(None) => {
                log::info!("No existing data found, starting fresh");
                Snapshot::default()
            }
            Err(e) => {
                log::warn!(
                    "Could not load snapshot from {}: {}. Starting fresh.",
                    store.location(),
                    e
                );
                Snapshot::default()
            }
        };

        self.run_on(snapshot, store, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{ExternalVoyageRef, ExtractStrategy};
    use async_trait::async_trait;

    struct NoPages;

    #[async_trait]
    impl PageSource for NoPages {
        async fn fetch(&self, reference: &ExternalVoyageRef) -> Result<String> {
            Err(AppError::fetch(reference.to_string(), "HTTP 404"))
        }
    }

    fn scraper(voyages: usize, batch_size: usize) -> AvailabilityScraper {
        let entries = (0..voyages)
            .map(|i| VoyageEntry {
                slug: format!("voyage-{i}"),
                reference: ExternalVoyageRef::PageId(i as u32),
            })
            .collect();
        AvailabilityScraper::new(
            VoyageRegistry::new(entries).unwrap(),
            Arc::new(NoPages),
            Arc::from(ExtractStrategy::Glyph.extractor()),
        )
        .with_batch_size(batch_size)
    }

    #[test]
    fn test_batch_count() {
        assert_eq!(scraper(38, 10).batch_count(), 4);
        assert_eq!(scraper(10, 10).batch_count(), 1);
        assert_eq!(scraper(0, 10).batch_count(), 0);
        assert_eq!(scraper(3, 0).batch_count(), 3);
    }

    #[tokio::test]
    async fn test_failures_leave_snapshot_untouched() {
        let mut snapshot = Snapshot::bundled();
        let before = snapshot.clone();
        let tally = scraper(5, 2).scrape_into(&mut snapshot, false).await;
        assert_eq!(tally, ScrapeTally { updated: 0, failed: 5 });
        assert_eq!(snapshot, before);
    }
}
