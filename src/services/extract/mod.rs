//! Extraction of cabin availability from raw voyage pages.
//!
//! Two strategies exist because the booking site changed format:
//! - [`StructuredExtractor`] reads the plan data JSON embedded in the page.
//! - [`GlyphExtractor`] scans the rendered availability glyphs by position
//!   and is kept only as a fallback.
//!
//! The strategy is fixed per run by configuration.

mod glyph;
mod structured;

pub use glyph::GlyphExtractor;
pub use structured::{PLAN_DATA_VARIABLE, StructuredExtractor};

use crate::error::Result;
use crate::models::{ExtractStrategy, VoyageAvailability};

/// Turns one voyage page into availability.
pub trait Extractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Extract availability from a raw page.
    ///
    /// `voyage` is only used as error context.
    fn extract(&self, voyage: &str, payload: &str) -> Result<VoyageAvailability>;
}

impl ExtractStrategy {
    /// Instantiate the extractor for this strategy.
    pub fn extractor(&self) -> Box<dyn Extractor> {
        match self {
            Self::Structured => Box::new(StructuredExtractor::new()),
            Self::Glyph => Box::new(GlyphExtractor::new()),
        }
    }
}
