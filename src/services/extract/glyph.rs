// src/services/extract/glyph.rs

//! Positional glyph scanning (deprecated).
//!
//! The old booking pages rendered one glyph per cabin category in table
//! order. This extractor finds every availability glyph in the page and
//! assigns the first twelve to the categories by position, so any extra
//! glyph earlier in the page shifts every result. Prefer the structured
//! extractor whenever the page carries plan data.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{AvailabilityStatus, CabinCategory, VoyageAvailability};

use super::Extractor;

/// Scans raw HTML for availability glyphs.
pub struct GlyphExtractor {
    pattern: Regex,
}

impl GlyphExtractor {
    pub fn new() -> Self {
        Self {
            // 〇 ○ available, △ waitlist, × ✕ sold out
            pattern: Regex::new("[〇○△×✕]").expect("glyph pattern is valid"),
        }
    }

    fn glyphs<'a>(&'a self, payload: &'a str) -> impl Iterator<Item = char> + 'a {
        self.pattern
            .find_iter(payload)
            .filter_map(|m| m.as_str().chars().next())
    }
}

impl Default for GlyphExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for GlyphExtractor {
    fn name(&self) -> &'static str {
        "glyph"
    }

    fn extract(&self, voyage: &str, payload: &str) -> Result<VoyageAvailability> {
        let glyphs: Vec<char> = self.glyphs(payload).collect();
        if glyphs.len() < CabinCategory::COUNT {
            return Err(AppError::extract(
                voyage,
                format!(
                    "found {} availability glyphs, need {}",
                    glyphs.len(),
                    CabinCategory::COUNT
                ),
            ));
        }

        let mut availability = VoyageAvailability::new();
        for (category, glyph) in CabinCategory::ALL.into_iter().zip(glyphs) {
            let status = AvailabilityStatus::from_glyph(glyph).ok_or_else(|| {
                AppError::extract(voyage, format!("unrecognized glyph {glyph:?}"))
            })?;
            availability.insert(category, status);
        }
        Ok(availability)
    }
}
