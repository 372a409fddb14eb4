//! Persisted availability snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{AvailabilityStatus, CabinCategory};

/// Availability of every extracted cabin category for one voyage.
///
/// Categories the source did not report are absent, never defaulted.
pub type VoyageAvailability = BTreeMap<CabinCategory, AvailabilityStatus>;

/// Snapshot bundled into the binary, served when durable storage is unusable.
const BUNDLED_SNAPSHOT: &str = include_str!("../../data/availability.json");

/// Full availability table for all known voyages at one point in time.
///
/// Serialized as:
///
/// ```text
/// { "lastUpdated": "<ISO-8601 or empty>",
///   "cruises": { "<voyage slug>": { "<cabin slug>": "available" | "waitlist" | "sold_out" } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Time of the last run that updated at least one voyage, or empty
    #[serde(default)]
    pub last_updated: String,

    /// Per-voyage availability keyed by voyage slug
    #[serde(default)]
    pub cruises: BTreeMap<String, VoyageAvailability>,
}

impl Snapshot {
    /// Parse a snapshot from its JSON representation.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize to pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// The snapshot shipped with the application.
    ///
    /// A malformed bundle degrades to an empty snapshot so the read path
    /// can still answer.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_SNAPSHOT.as_bytes()).unwrap_or_else(|e| {
            log::error!("Bundled availability snapshot is invalid: {}", e);
            Self::default()
        })
    }

    /// Replace the whole entry for a voyage.
    pub fn replace_voyage(&mut self, slug: impl Into<String>, availability: VoyageAvailability) {
        self.cruises.insert(slug.into(), availability);
    }

    pub fn voyage(&self, slug: &str) -> Option<&VoyageAvailability> {
        self.cruises.get(slug)
    }

    pub fn status(&self, slug: &str, category: CabinCategory) -> Option<AvailabilityStatus> {
        self.voyage(slug)?.get(&category).copied()
    }

    /// Record that the snapshot was refreshed at `now`.
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.last_updated = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    }

    /// Parsed form of `last_updated`, if it holds a timestamp.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_updated)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn voyage_count(&self) -> usize {
        self.cruises.len()
    }
}
