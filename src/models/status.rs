//! Canonical availability status and the raw-signal conversions into it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Availability of one cabin category on one voyage.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `SoldOut < Waitlist < Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    SoldOut,
    Waitlist,
    Available,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 3] = [Self::Available, Self::Waitlist, Self::SoldOut];

    /// Pick the better of two statuses (available > waitlist > sold_out).
    pub fn better(self, other: Self) -> Self {
        self.max(other)
    }

    /// Map a room quantity from the booking system to a status.
    ///
    /// 0 rooms left is sold out, exactly 1 is treated as waitlist.
    pub fn from_quantity(quantity: u64) -> Self {
        match quantity {
            0 => Self::SoldOut,
            1 => Self::Waitlist,
            _ => Self::Available,
        }
    }

    /// Parse a room quantity as the booking system renders it.
    ///
    /// Anything that is not a non-negative number counts as zero rooms.
    /// Quantities too large for `u64` saturate.
    pub fn from_quantity_str(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<u64>() {
            Ok(quantity) => Self::from_quantity(quantity),
            Err(_) => Self::from_quantity_f64(raw.parse().unwrap_or(0.0)),
        }
    }

    /// Map a fractional or out-of-range quantity, truncating toward zero.
    ///
    /// Negative and non-finite values count as zero rooms.
    pub fn from_quantity_f64(quantity: f64) -> Self {
        if quantity.is_finite() && quantity > 0.0 {
            // `as` saturates at u64::MAX
            Self::from_quantity(quantity as u64)
        } else {
            Self::from_quantity(0)
        }
    }

    /// Map an availability glyph to a status.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '〇' | '○' => Some(Self::Available),
            '△' => Some(Self::Waitlist),
            '×' | '✕' => Some(Self::SoldOut),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Waitlist => "waitlist",
            Self::SoldOut => "sold_out",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
