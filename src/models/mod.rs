// src/models/mod.rs

//! Domain models for the availability scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod cabin;
mod config;
mod registry;
mod snapshot;
mod status;

// Re-export all public types
pub use cabin::{CabinCategory, CabinClass};
pub use config::{Config, ExtractStrategy, ScraperConfig, StorageConfig};
pub use registry::{ExternalVoyageRef, VoyageEntry, VoyageRegistry};
pub use snapshot::{Snapshot, VoyageAvailability};
pub use status::AvailabilityStatus;
