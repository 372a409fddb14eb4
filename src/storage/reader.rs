// src/storage/reader.rs

//! Read path used by page rendering.

use std::sync::Arc;

use crate::models::Snapshot;
use crate::storage::SnapshotStore;

/// Serves the latest snapshot, falling back to the bundled one.
///
/// One best-effort lookup per read, no retries and no caching.
#[derive(Clone)]
pub struct SnapshotReader {
    store: Arc<dyn SnapshotStore>,
    fallback: Snapshot,
}

impl SnapshotReader {
    /// Reader falling back to the snapshot bundled into the binary.
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_fallback(store, Snapshot::bundled())
    }

    pub fn with_fallback(store: Arc<dyn SnapshotStore>, fallback: Snapshot) -> Self {
        Self { store, fallback }
    }

    /// Read the current snapshot. Never fails.
    pub async fn read(&self) -> Snapshot {
        match self.store.load().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                log::debug!(
                    "No snapshot at {}, serving bundled data",
                    self.store.location()
                );
                self.fallback.clone()
            }
            Err(e) => {
                log::warn!(
                    "Snapshot read from {} failed: {}. Serving bundled data.",
                    self.store.location(),
                    e
                );
                self.fallback.clone()
            }
        }
    }
}
