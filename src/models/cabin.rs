//! Cabin category taxonomy of the ship.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the 12 cabin categories offered on every voyage.
///
/// Declaration order is the order in which categories appear on the
/// booking site's availability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CabinCategory {
    RoyalPenthouse,
    GrandPenthouse,
    CaptainsSuite,
    PanoramaSuite,
    AsukaSuite,
    MidshipSuite,
    JuniorSuite,
    AsukaBalconyA,
    AsukaBalconyB,
    AsukaBalconyC,
    AsukaBalconyD,
    SoloBalcony,
}

/// Accommodation tier a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CabinClass {
    Penthouse,
    Suite,
    Balcony,
}

/// Raw category codes used by the booking system's structured data.
///
/// Several room configurations are sold under one public category, so
/// more than one code may point at the same category.
const RAW_CODES: &[(&str, CabinCategory)] = &[
    ("RP", CabinCategory::RoyalPenthouse),
    ("GP", CabinCategory::GrandPenthouse),
    ("CS", CabinCategory::CaptainsSuite),
    ("PS", CabinCategory::PanoramaSuite),
    ("AS", CabinCategory::AsukaSuite),
    ("AST", CabinCategory::AsukaSuite),
    ("MS", CabinCategory::MidshipSuite),
    ("MST", CabinCategory::MidshipSuite),
    ("JS", CabinCategory::JuniorSuite),
    ("BA", CabinCategory::AsukaBalconyA),
    ("BB", CabinCategory::AsukaBalconyB),
    ("BC", CabinCategory::AsukaBalconyC),
    ("BD", CabinCategory::AsukaBalconyD),
    ("SB", CabinCategory::SoloBalcony),
];

impl CabinCategory {
    /// All categories in table order.
    pub const ALL: [CabinCategory; 12] = [
        Self::RoyalPenthouse,
        Self::GrandPenthouse,
        Self::CaptainsSuite,
        Self::PanoramaSuite,
        Self::AsukaSuite,
        Self::MidshipSuite,
        Self::JuniorSuite,
        Self::AsukaBalconyA,
        Self::AsukaBalconyB,
        Self::AsukaBalconyC,
        Self::AsukaBalconyD,
        Self::SoloBalcony,
    ];

    /// Number of known categories.
    pub const COUNT: usize = Self::ALL.len();

    /// Resolve a raw booking-system code to its public category.
    ///
    /// Unknown codes return `None` so newly introduced categories on the
    /// source are ignored rather than rejected.
    pub fn from_raw_code(code: &str) -> Option<Self> {
        let code = code.trim();
        RAW_CODES
            .iter()
            .find(|(raw, _)| raw.eq_ignore_ascii_case(code))
            .map(|(_, category)| *category)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::RoyalPenthouse => "royal-penthouse",
            Self::GrandPenthouse => "grand-penthouse",
            Self::CaptainsSuite => "captains-suite",
            Self::PanoramaSuite => "panorama-suite",
            Self::AsukaSuite => "asuka-suite",
            Self::MidshipSuite => "midship-suite",
            Self::JuniorSuite => "junior-suite",
            Self::AsukaBalconyA => "asuka-balcony-a",
            Self::AsukaBalconyB => "asuka-balcony-b",
            Self::AsukaBalconyC => "asuka-balcony-c",
            Self::AsukaBalconyD => "asuka-balcony-d",
            Self::SoloBalcony => "solo-balcony",
        }
    }

    pub fn class(&self) -> CabinClass {
        match self {
            Self::RoyalPenthouse | Self::GrandPenthouse => CabinClass::Penthouse,
            Self::CaptainsSuite
            | Self::PanoramaSuite
            | Self::AsukaSuite
            | Self::MidshipSuite
            | Self::JuniorSuite => CabinClass::Suite,
            _ => CabinClass::Balcony,
        }
    }
}

impl fmt::Display for CabinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
