//! End-to-end scrape runs against in-memory pages and stores.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use availability::error::{AppError, Result};
use availability::models::{
    AvailabilityStatus, CabinCategory, ExternalVoyageRef, Snapshot, VoyageAvailability,
    VoyageEntry, VoyageRegistry,
};
use availability::services::{
    AvailabilityScraper, Extractor, GlyphExtractor, PageSource, RunOptions, StructuredExtractor,
};
use availability::storage::{SnapshotReader, SnapshotStore};

/// Serves canned pages; unknown references fail like a 404.
struct CannedPages {
    pages: HashMap<String, String>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl CannedPages {
    fn new(pages: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PageSource for CannedPages {
    async fn fetch(&self, reference: &ExternalVoyageRef) -> Result<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(&reference.to_string())
            .cloned()
            .ok_or_else(|| AppError::fetch(reference.to_string(), "HTTP 404"))
    }
}

#[derive(Default)]
struct MemoryStore {
    snapshot: Mutex<Option<Snapshot>>,
    saves: AtomicUsize,
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock().await = Some(snapshot.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Store whose every operation fails.
struct BrokenStore;

#[async_trait]
impl SnapshotStore for BrokenStore {
    async fn load(&self) -> Result<Option<Snapshot>> {
        Err(AppError::storage("bucket unreachable"))
    }

    async fn save(&self, _snapshot: &Snapshot) -> Result<()> {
        Err(AppError::storage("bucket unreachable"))
    }

    fn location(&self) -> String {
        "broken".to_string()
    }
}

fn registry(refs: &[(&str, &str)]) -> VoyageRegistry {
    VoyageRegistry::new(
        refs.iter()
            .map(|(slug, code)| VoyageEntry {
                slug: slug.to_string(),
                reference: ExternalVoyageRef::Code(code.to_string()),
            })
            .collect(),
    )
    .unwrap()
}

fn plan_page(prices: &str) -> String {
    format!(
        r#"<html><head><script>window.__PLAN_DATA__ = {{"courses":[{{"relations":[
            {{"isClub":true,"prices":[{{"categoryCode":"RP","roomQuantity":"9"}}]}},
            {{"isClub":false,"prices":[{prices}]}}
        ]}}]}};window.other = 1;</script></head><body></body></html>"#
    )
}

fn glyph_page(glyphs: &str) -> String {
    let cells: String = glyphs
        .chars()
        .map(|g| format!("<td class=\"stock\">{g}</td>"))
        .collect();
    format!("<html><body><table><tr>{cells}</tr></table></body></html>")
}

fn previous() -> Snapshot {
    let mut snapshot = Snapshot::default();
    snapshot.last_updated = "2026-01-01T00:00:00.000Z".to_string();
    let mut b = VoyageAvailability::new();
    b.insert(CabinCategory::RoyalPenthouse, AvailabilityStatus::Waitlist);
    snapshot.replace_voyage("b", b);
    snapshot
}

fn build(
    refs: &[(&str, &str)],
    pages: CannedPages,
    extractor: Arc<dyn Extractor>,
) -> (AvailabilityScraper, Arc<CannedPages>) {
    let pages = Arc::new(pages);
    let scraper = AvailabilityScraper::new(registry(refs), pages.clone(), extractor);
    (scraper, pages)
}

#[tokio::test]
async fn test_partial_failure_keeps_previous_entry() {
    let (scraper, _) = build(
        &[("a", "A1"), ("b", "B1")],
        CannedPages::new([(
            "A1",
            plan_page(r#"{"categoryCode":"RP","roomQuantity":"2"},{"categoryCode":"AS","roomQuantity":"0"}"#),
        )]),
        Arc::new(StructuredExtractor::new()),
    );

    let store = MemoryStore::default();
    let summary = scraper
        .run_on(previous(), &store, RunOptions::default())
        .await
        .unwrap();

    assert!(summary.updated);
    assert_eq!(summary.updated_count, 1);
    assert_eq!(summary.failed_count, 1);
    assert_eq!(summary.message, "Updated 1 cruises");

    let snapshot = &summary.snapshot;
    assert_eq!(
        snapshot.status("a", CabinCategory::RoyalPenthouse),
        Some(AvailabilityStatus::Available)
    );
    assert_eq!(
        snapshot.status("a", CabinCategory::AsukaSuite),
        Some(AvailabilityStatus::SoldOut)
    );
    assert_eq!(snapshot.voyage("b"), previous().voyage("b"));
    assert_ne!(snapshot.last_updated, "2026-01-01T00:00:00.000Z");

    // persist was off
    assert_eq!(store.saves.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_zero_successes_leave_snapshot_untouched() {
    let (scraper, _) = build(
        &[("a", "A1"), ("b", "B1")],
        CannedPages::new([("A1", "<html><body>maintenance</body></html>".to_string())]),
        Arc::new(StructuredExtractor::new()),
    );

    let store = MemoryStore::default();
    let options = RunOptions {
        verbose: false,
        persist: true,
    };
    let summary = scraper.run_on(previous(), &store, options).await.unwrap();

    assert!(!summary.updated);
    assert_eq!(summary.updated_count, 0);
    assert_eq!(summary.failed_count, 2);
    assert_eq!(
        summary.message,
        "No updates made (all fetches failed or returned no data)"
    );
    assert_eq!(summary.snapshot, previous());
    assert_eq!(store.saves.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_persisted_run_is_loaded_by_next_run() {
    let (scraper, _) = build(
        &[("a", "A1")],
        CannedPages::new([("A1", plan_page(r#"{"categoryCode":"BA","roomQuantity":1}"#))]),
        Arc::new(StructuredExtractor::new()),
    );

    let store = MemoryStore::default();
    *store.snapshot.lock().await = Some(previous());

    let options = RunOptions {
        verbose: true,
        persist: true,
    };
    let summary = scraper.run(&store, options).await.unwrap();
    assert_eq!(store.saves.load(Ordering::SeqCst), 1);

    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved, summary.snapshot);
    // entries from the loaded snapshot survive
    assert!(saved.voyage("b").is_some());
    assert_eq!(
        saved.status("a", CabinCategory::AsukaBalconyA),
        Some(AvailabilityStatus::Waitlist)
    );
}

#[tokio::test]
async fn test_persistence_failure_propagates() {
    let (scraper, _) = build(
        &[("a", "A1")],
        CannedPages::new([("A1", plan_page(r#"{"categoryCode":"RP","roomQuantity":"3"}"#))]),
        Arc::new(StructuredExtractor::new()),
    );

    let options = RunOptions {
        verbose: false,
        persist: true,
    };
    let err = scraper.run(&BrokenStore, options).await.unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
}

#[tokio::test]
async fn test_reader_falls_back_to_bundled_exactly() {
    let reader = SnapshotReader::new(Arc::new(BrokenStore));
    assert_eq!(reader.read().await, Snapshot::bundled());
}

#[tokio::test]
async fn test_batches_bound_concurrency() {
    let refs = [
        ("v1", "C1"),
        ("v2", "C2"),
        ("v3", "C3"),
        ("v4", "C4"),
        ("v5", "C5"),
        ("v6", "C6"),
        ("v7", "C7"),
    ];
    let page = plan_page(r#"{"categoryCode":"GP","roomQuantity":"1"}"#);
    let pages = CannedPages::new(refs.iter().map(|(_, code)| (*code, page.clone())));
    let (scraper, pages) = build(&refs, pages, Arc::new(StructuredExtractor::new()));
    let scraper = scraper.with_batch_size(3);

    assert_eq!(scraper.batch_count(), 3);

    let summary = scraper
        .run_on(Snapshot::default(), &MemoryStore::default(), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.updated_count, 7);
    assert!(pages.peak.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn test_glyph_strategy_end_to_end() {
    let (short, _) = build(
        &[("a", "A1")],
        CannedPages::new([("A1", glyph_page("〇△×〇〇〇△△×××"))]),
        Arc::new(GlyphExtractor::new()),
    );
    // 11 glyphs is below the minimum
    let summary = short
        .run_on(Snapshot::default(), &MemoryStore::default(), RunOptions::default())
        .await
        .unwrap();
    assert_eq!(summary.updated_count, 0);

    let (full, _) = build(
        &[("a", "A1")],
        CannedPages::new([("A1", glyph_page("〇△×〇〇〇△△×××〇"))]),
        Arc::new(GlyphExtractor::new()),
    );
    let summary = full
        .run_on(Snapshot::default(), &MemoryStore::default(), RunOptions::default())
        .await
        .unwrap();
    assert_eq!(summary.updated_count, 1);
    let voyage = summary.snapshot.voyage("a").unwrap();
    assert_eq!(voyage.len(), CabinCategory::COUNT);
    assert_eq!(voyage[&CabinCategory::RoyalPenthouse], AvailabilityStatus::Available);
    assert_eq!(voyage[&CabinCategory::GrandPenthouse], AvailabilityStatus::Waitlist);
    assert_eq!(voyage[&CabinCategory::CaptainsSuite], AvailabilityStatus::SoldOut);
}
