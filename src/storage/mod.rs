//! Snapshot persistence.
//!
//! The whole snapshot is stored as one JSON document, either on the local
//! filesystem or as a single S3 object:
//!
//! ```text
//! {root}/
//! ├── config.toml           # Scraper configuration
//! └── availability.json     # Latest snapshot
//! ```
//!
//! Writes replace the document atomically; there are no partial writes.

pub mod local;
pub mod reader;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Snapshot;

// Re-export for convenience
pub use local::LocalStorage;
pub use reader::SnapshotReader;

/// Durable home of the availability snapshot.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted snapshot, `None` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Snapshot>>;

    /// Replace the persisted snapshot.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Human-readable location for logs.
    fn location(&self) -> String;
}
