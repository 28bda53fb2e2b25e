//! Unit types and measurement systems

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Mass,
    Volume,
    Count,
    /// Unrecognized unit names ("cloves", "large")
    Other,
}

impl UnitType {
    /// Catalog key of the reference unit used for internal conversion
    pub fn base_unit(&self) -> Option<&'static str> {
        match self {
            UnitType::Mass => Some("g"),
            UnitType::Volume => Some("ml"),
            UnitType::Count => Some("piece"),
            UnitType::Other => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, UnitType::Other)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitType::Mass => "mass",
            UnitType::Volume => "volume",
            UnitType::Count => "count",
            UnitType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Measurement system a unit belongs to
///
/// `Ambiguous` units (teaspoon, tablespoon) change size with the system in
/// use and carry one factor per system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    US,
    UK,
    JP,
    Ambiguous,
}

impl UnitSystem {
    /// Parse a system name, case-insensitive
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Some(UnitSystem::Metric),
            "us" | "us customary" => Some(UnitSystem::US),
            "uk" | "imperial" => Some(UnitSystem::UK),
            "jp" | "japanese" => Some(UnitSystem::JP),
            "ambiguous" => Some(UnitSystem::Ambiguous),
            _ => None,
        }
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::Metric
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitSystem::Metric => "metric",
            UnitSystem::US => "us",
            UnitSystem::UK => "uk",
            UnitSystem::JP => "jp",
            UnitSystem::Ambiguous => "ambiguous",
        };
        write!(f, "{}", s)
    }
}
