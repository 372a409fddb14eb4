//! Service layer for the availability scraper.
//!
//! This module contains the business logic for:
//! - Voyage page fetching (`HttpFetcher`)
//! - Availability extraction (`StructuredExtractor`, `GlyphExtractor`)
//! - Category collapsing (`normalize`)
//! - Batch orchestration (`AvailabilityScraper`)

pub mod extract;
pub mod fetch;
pub mod normalize;
mod scraper;

pub use extract::{Extractor, GlyphExtractor, StructuredExtractor};
pub use fetch::{HttpFetcher, PageSource};
pub use scraper::{AvailabilityScraper, RunOptions, RunSummary, ScrapeTally};
