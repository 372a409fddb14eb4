//! Voyage registry: internal voyage slugs and their booking-site references.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// How the booking system identifies a voyage.
///
/// Older registries used numeric page ids, newer ones use voyage codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalVoyageRef {
    PageId(u32),
    Code(String),
}

impl fmt::Display for ExternalVoyageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageId(id) => write!(f, "{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

/// One registered voyage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoyageEntry {
    /// Internal voyage slug
    pub slug: String,

    /// Booking-site reference
    pub reference: ExternalVoyageRef,
}

/// Ordered, immutable table of voyages to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyageRegistry {
    entries: Vec<VoyageEntry>,
}

impl VoyageRegistry {
    /// Build a registry, rejecting duplicate or empty slugs.
    pub fn new(entries: Vec<VoyageEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.slug.trim().is_empty() {
                return Err(AppError::validation("voyage slug is empty"));
            }
            if !seen.insert(entry.slug.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate voyage slug: {}",
                    entry.slug
                )));
            }
            if let ExternalVoyageRef::Code(code) = &entry.reference {
                if code.trim().is_empty() {
                    return Err(AppError::validation(format!(
                        "voyage {} has an empty reference",
                        entry.slug
                    )));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Find the booking-site reference for a voyage slug.
    pub fn lookup(&self, slug: &str) -> Option<&ExternalVoyageRef> {
        self.entries
            .iter()
            .find(|e| e.slug == slug)
            .map(|e| &e.reference)
    }

    /// Iterate voyages in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VoyageEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[VoyageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VoyageRegistry {
    fn default() -> Self {
        let entries = DEFAULT_VOYAGES
            .iter()
            .map(|(slug, id)| VoyageEntry {
                slug: (*slug).to_string(),
                reference: ExternalVoyageRef::PageId(*id),
            })
            .collect();
        Self { entries }
    }
}

/// Voyages of the current season and their booking page ids.
const DEFAULT_VOYAGES: &[(&str, u32)] = &[
    ("spring-kochi-iwakuni", 97160),
    ("spring-kagoshima-ishigaki", 97163),
    ("spring-weekend-suruga", 97165),
    ("spring-ofunato-aomori", 97166),
    ("spring-hakodate-fushiki", 97167),
    ("golden-week-guam", 97168),
    ("japan-discovery", 98587),
    ("early-summer-kyushu-amami", 98839),
    ("early-summer-weekend-gamagori", 98840),
    ("early-summer-ogasawara", 98841),
    ("early-summer-weekend-kochi", 98844),
    ("early-summer-yokkaichi-yokohama", 98833),
    ("early-summer-weekend-shimoda", 98845),
    ("summer-ogasawara-a", 98842),
    ("summer-hakata-busan", 98846),
    ("summer-weekend-yokkaichi", 98847),
    ("summer-ogasawara-b", 98843),
    ("summer-holiday-suruga", 98848),
    ("summer-hokkaido-kushiro", 98849),
    ("summer-hokkaido-rishiri", 98880),
    ("summer-toba-kobe", 98835),
    ("tateyama-fireworks", 98919),
    ("kanmon-fireworks", 98925),
    ("kumano-fireworks", 98930),
    ("summer-hokkaido-abashiri", 98933),
    ("summer-hokkaido-muroran", 98937),
    ("autumn-hiroshima-hakata", 98838),
    ("autumn-weekend-jeju", 98947),
    ("autumn-seto-wakayama-shodoshima", 98948),
    ("autumn-kochi-kobe", 98938),
    ("autumn-seto-beppu", 98952),
    ("autumn-holiday-tanegashima-kochi", 98953),
    ("autumn-hokkaido-michinoku", 98960),
    ("autumn-suruga-yokohama", 98942),
    ("autumn-tanegashima-nagasaki-kagoshima", 98961),
    ("autumn-holiday-toba", 98962),
    ("autumn-seto-hyuga-matsuyama", 98963),
    ("autumn-hitachinaka-kobe", 98946),
];
