// src/services/normalize.rs

//! Collapsing raw category entries into per-category availability.

use crate::models::{AvailabilityStatus, CabinCategory, VoyageAvailability};

/// Collapse raw `(code, status)` entries into one status per category.
///
/// Raw codes are resolved through the alias table first; entries that land
/// on the same category keep the best status, so input order is irrelevant.
/// Unknown codes are dropped.
pub fn collapse<I, S>(entries: I) -> VoyageAvailability
where
    I: IntoIterator<Item = (S, AvailabilityStatus)>,
    S: AsRef<str>,
{
    let mut result = VoyageAvailability::new();
    for (code, status) in entries {
        match CabinCategory::from_raw_code(code.as_ref()) {
            Some(category) => merge(&mut result, category, status),
            None => log::debug!("Ignoring unknown cabin code {:?}", code.as_ref()),
        }
    }
    result
}

/// Merge one status into the availability map, keeping the better one.
pub fn merge(
    availability: &mut VoyageAvailability,
    category: CabinCategory,
    status: AvailabilityStatus,
) {
    availability
        .entry(category)
        .and_modify(|current| *current = current.better(status))
        .or_insert(status);
}
