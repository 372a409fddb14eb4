// src/services/extract/structured.rs

//! Extraction from the plan data embedded in voyage pages.
//!
//! Booking pages assign a JSON object to a global variable in an inline
//! script:
//!
//! ```text
//! <script>window.__PLAN_DATA__ = {"courses": [{"relations": [
//!   {"isClub": false, "prices": [{"categoryCode": "RP", "roomQuantity": "3"}, ...]},
//!   {"isClub": true,  "prices": [...]}
//! ]}]};</script>
//! ```
//!
//! Only the first course and its first non-club relation are read.

use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{AvailabilityStatus, VoyageAvailability};
use crate::services::normalize::collapse;

use super::Extractor;

/// Global variable holding the plan data.
pub const PLAN_DATA_VARIABLE: &str = "__PLAN_DATA__";

#[derive(Debug, Deserialize)]
struct PlanData {
    #[serde(default)]
    courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
struct Course {
    #[serde(default)]
    relations: Vec<Relation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Relation {
    #[serde(default)]
    is_club: bool,
    #[serde(default)]
    prices: Vec<PriceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceEntry {
    /// Entries without a string code are skipped
    #[serde(default)]
    category_code: Value,
    /// Rendered as a string by the site, occasionally as a number
    #[serde(default)]
    room_quantity: Value,
}

impl PriceEntry {
    fn code(&self) -> Option<&str> {
        self.category_code.as_str()
    }

    fn status(&self) -> AvailabilityStatus {
        match &self.room_quantity {
            Value::String(s) => AvailabilityStatus::from_quantity_str(s),
            Value::Number(n) => match n.as_u64() {
                Some(q) => AvailabilityStatus::from_quantity(q),
                None => AvailabilityStatus::from_quantity_f64(n.as_f64().unwrap_or(0.0)),
            },
            _ => AvailabilityStatus::SoldOut,
        }
    }
}

/// Reads availability from the embedded plan data.
pub struct StructuredExtractor {
    scripts: Selector,
}

impl StructuredExtractor {
    pub fn new() -> Self {
        Self {
            scripts: Selector::parse("script").expect("script selector is valid"),
        }
    }

    /// Locate and parse the plan data object.
    fn plan_data(&self, voyage: &str, payload: &str) -> Result<PlanData> {
        let document = Html::parse_document(payload);
        let mut mentioned = false;
        let json = document
            .select(&self.scripts)
            .map(|el| el.text().collect::<String>())
            .filter(|text| text.contains(PLAN_DATA_VARIABLE))
            .find_map(|text| {
                mentioned = true;
                assigned_value(&text).map(str::to_owned)
            })
            .ok_or_else(|| {
                if mentioned {
                    AppError::extract(voyage, "plan data is not assigned")
                } else {
                    AppError::extract(voyage, "plan data block not found")
                }
            })?;

        // The script continues after the object, so read exactly one value.
        serde_json::Deserializer::from_str(&json)
            .into_iter::<PlanData>()
            .next()
            .ok_or_else(|| AppError::extract(voyage, "plan data is empty"))?
            .map_err(|e| AppError::extract(voyage, format!("invalid plan data: {e}")))
    }
}

impl Default for StructuredExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for StructuredExtractor {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, voyage: &str, payload: &str) -> Result<VoyageAvailability> {
        let plan = self.plan_data(voyage, payload)?;

        let course = plan
            .courses
            .first()
            .ok_or_else(|| AppError::extract(voyage, "no course in plan data"))?;

        let relation = course
            .relations
            .iter()
            .find(|r| !r.is_club)
            .ok_or_else(|| AppError::extract(voyage, "no primary relation in plan data"))?;

        let availability = collapse(
            relation
                .prices
                .iter()
                .filter_map(|p| Some((p.code()?, p.status()))),
        );

        if availability.is_empty() {
            return Err(AppError::extract(voyage, "no known cabin categories"));
        }
        Ok(availability)
    }
}

/// Return the text right after the first `PLAN_DATA_VARIABLE =`.
///
/// Reads and comparisons of the variable (`if (window.__PLAN_DATA__)`,
/// `__PLAN_DATA__ == null`) are skipped.
fn assigned_value(script: &str) -> Option<&str> {
    script.match_indices(PLAN_DATA_VARIABLE).find_map(|(index, _)| {
        let rest = script[index + PLAN_DATA_VARIABLE.len()..].trim_start();
        let rest = rest.strip_prefix('=')?;
        if rest.starts_with('=') {
            return None;
        }
        Some(rest.trim_start())
    })
}
