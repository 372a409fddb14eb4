//! Application state for the HTTP server.

use std::sync::Arc;

use crate::auth::TriggerAuth;
use crate::models::Config;
use crate::storage::{SnapshotReader, SnapshotStore};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Scraper configuration for triggered runs
    pub config: Arc<Config>,
    /// Durable store written by triggered runs
    pub store: Arc<dyn SnapshotStore>,
    /// Fallback-aware read path
    pub reader: SnapshotReader,
    /// Shared-secret check for the trigger
    pub auth: TriggerAuth,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn SnapshotStore>, auth: TriggerAuth) -> Self {
        Self {
            config: Arc::new(config),
            reader: SnapshotReader::new(Arc::clone(&store)),
            store,
            auth,
        }
    }
}
