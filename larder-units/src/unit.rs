//! Units as written by authors, and their resolved catalog definitions

use std::fmt;
use serde::{Serialize, Deserialize};
use larder_core::{Number, QuantityError};
use crate::{FractionsPolicy, UnitSystem, UnitType};

/// Upper bound of a unit's natural display range unless set otherwise
pub const DEFAULT_MAX_VALUE: f64 = 999.0;

/// A unit name as it appeared in the source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    /// Pinned by the author; never fractionalized or converted away
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub integer_protected: bool,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Unit {
            name: name.into(),
            integer_protected: false,
        }
    }

    pub fn protected(name: impl Into<String>) -> Self {
        Unit {
            name: name.into(),
            integer_protected: true,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.integer_protected {
            write!(f, "={}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A fully resolved unit
///
/// `name` keeps the caller's spelling, `key` is the catalog's canonical
/// name (lowercased name for units the catalog does not know). The "no unit"
/// sentinel has an empty key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub integer_protected: bool,
    #[serde(rename = "type")]
    pub kind: UnitType,
    pub system: Option<UnitSystem>,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Factor to the type's base unit (g or ml)
    pub to_base: Number,
    #[serde(default)]
    pub to_base_by_system: Vec<(UnitSystem, Number)>,
    pub max_value: f64,
    #[serde(default)]
    pub fractions: FractionsPolicy,
    pub is_best_unit: bool,
}

impl UnitDefinition {
    /// Catalog entry with default display hints
    pub fn new(key: &str, kind: UnitType, system: UnitSystem, to_base: Number) -> Self {
        UnitDefinition {
            name: key.to_string(),
            key: key.to_string(),
            integer_protected: false,
            kind,
            system: Some(system),
            aliases: Vec::new(),
            to_base,
            to_base_by_system: Vec::new(),
            max_value: DEFAULT_MAX_VALUE,
            fractions: FractionsPolicy::disabled(),
            is_best_unit: true,
        }
    }

    /// Placeholder for a name the catalog does not know
    pub fn unknown(name: &str) -> Self {
        UnitDefinition {
            name: name.to_string(),
            key: name.trim().to_lowercase(),
            integer_protected: false,
            kind: UnitType::Other,
            system: None,
            aliases: Vec::new(),
            to_base: Number::one(),
            to_base_by_system: Vec::new(),
            max_value: DEFAULT_MAX_VALUE,
            fractions: FractionsPolicy::disabled(),
            is_best_unit: false,
        }
    }

    /// The "no unit" sentinel
    pub fn none() -> Self {
        Self::unknown("")
    }

    // ========== Builders ==========

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn by_system(mut self, system: UnitSystem, factor: Number) -> Self {
        self.to_base_by_system.push((system, factor));
        self
    }

    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = max;
        self
    }

    pub fn fractions(mut self, denominators: &[u32], max_whole: u32) -> Self {
        self.fractions = FractionsPolicy::new(denominators, max_whole);
        self
    }

    pub fn not_best(mut self) -> Self {
        self.is_best_unit = false;
        self
    }

    // ========== Queries ==========

    pub fn is_none(&self) -> bool {
        self.key.is_empty()
    }

    /// Known mass, volume or count unit
    pub fn is_known(&self) -> bool {
        self.kind.is_known()
    }

    /// Same unit regardless of spelling or protection
    pub fn same_unit(&self, other: &UnitDefinition) -> bool {
        self.key == other.key
    }

    /// Caller-facing unit, `None` for the sentinel
    pub fn to_unit(&self) -> Option<Unit> {
        if self.is_none() {
            return None;
        }
        Some(Unit {
            name: self.name.clone(),
            integer_protected: self.integer_protected,
        })
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Factor to the base unit, system-specific for ambiguous units
pub fn get_to_base(unit: &UnitDefinition, system: Option<UnitSystem>) -> Number {
    system
        .and_then(|s| {
            unit.to_base_by_system
                .iter()
                .find(|(sys, _)| *sys == s)
                .map(|(_, factor)| factor.clone())
        })
        .unwrap_or_else(|| unit.to_base.clone())
}

/// Whether two units may be summed without a caller-supplied link
///
/// Same unit, or same known type in the same system, or an ambiguous unit
/// next to a metric one of the same type. A US cup and a UK cup are not
/// groupable; neither are grams and ounces.
pub fn are_units_groupable(a: &UnitDefinition, b: &UnitDefinition) -> bool {
    if a.same_unit(b) {
        return true;
    }
    if a.is_none() || b.is_none() || !a.is_known() || a.kind != b.kind {
        return false;
    }
    match (a.system, b.system) {
        (Some(x), Some(y)) if x == y => true,
        (Some(UnitSystem::Ambiguous), Some(UnitSystem::Metric))
        | (Some(UnitSystem::Metric), Some(UnitSystem::Ambiguous)) => true,
        _ => false,
    }
}

/// Whether a value in one unit can be restated in the other
///
/// Looser than [`are_units_groupable`]: any two units of the same known type.
pub fn are_units_convertible(a: &UnitDefinition, b: &UnitDefinition) -> bool {
    a.same_unit(b) || (a.is_known() && a.kind == b.kind)
}

/// Whether `unit` is a sensible display unit in `system`
pub fn is_unit_compatible_with_system(unit: &UnitDefinition, system: UnitSystem) -> bool {
    let Some(own) = unit.system else {
        return false;
    };
    if own == system || unit.kind == UnitType::Count {
        return true;
    }
    if own == UnitSystem::Ambiguous {
        return unit.to_base_by_system.iter().any(|(s, _)| *s == system);
    }
    unit.kind == UnitType::Volume
        && matches!(
            (own, system),
            (UnitSystem::Metric, UnitSystem::JP) | (UnitSystem::JP, UnitSystem::Metric)
        )
}

/// Multiplier taking a value in `from` to a value in `to`
///
/// Ambiguous units are sized by the first concrete system among the two.
pub fn conversion_factor(from: &UnitDefinition, to: &UnitDefinition) -> Result<Number, QuantityError> {
    if from.same_unit(to) {
        return Ok(Number::one());
    }
    if !are_units_convertible(from, to) {
        return Err(QuantityError::incompatible(&from.name, &to.name));
    }
    let hint = [to.system, from.system]
        .into_iter()
        .flatten()
        .find(|s| *s != UnitSystem::Ambiguous);
    let factor = get_to_base(from, hint).checked_div(&get_to_base(to, hint))?;
    Ok(factor)
}
