//! Quantities at the three refinement levels the pipeline works with

use std::fmt;
use serde::{Serialize, Deserialize};
use larder_core::QuantityValue;
use crate::{Unit, UnitCatalog, UnitDefinition};

/// An amount with an optional unit
///
/// `U` is the unit representation: [`Unit`] on input, `String` for
/// caller-facing output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity<U = Unit> {
    pub value: QuantityValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<U>,
}

/// Output form: the unit reduced to its plain name
pub type PlainQuantity = Quantity<String>;

impl<U> Quantity<U> {
    pub fn new(value: QuantityValue, unit: Option<U>) -> Self {
        Quantity { value, unit }
    }

    pub fn unitless(value: QuantityValue) -> Self {
        Quantity { value, unit: None }
    }
}

impl Quantity<Unit> {
    pub fn with_unit(value: QuantityValue, unit: impl Into<String>) -> Self {
        Quantity {
            value,
            unit: Some(Unit::new(unit)),
        }
    }

    /// Unit pinned by the author
    pub fn protected(value: QuantityValue, unit: impl Into<String>) -> Self {
        Quantity {
            value,
            unit: Some(Unit::protected(unit)),
        }
    }

    pub fn resolve(&self, catalog: &UnitCatalog) -> ResolvedQuantity {
        let unit = match &self.unit {
            Some(u) => catalog.resolve(&u.name, u.integer_protected),
            None => UnitDefinition::none(),
        };
        ResolvedQuantity {
            value: self.value.clone(),
            unit,
        }
    }
}

impl From<PlainQuantity> for Quantity<Unit> {
    fn from(q: PlainQuantity) -> Self {
        Quantity {
            value: q.value,
            unit: q.unit.map(Unit::new),
        }
    }
}

impl<U: fmt::Display> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {}", self.value, unit),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A quantity whose unit went through catalog resolution
///
/// A missing unit is the sentinel definition rather than `None`, so every
/// unit relation applies uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuantity {
    pub value: QuantityValue,
    pub unit: UnitDefinition,
}

impl ResolvedQuantity {
    pub fn new(value: QuantityValue, unit: UnitDefinition) -> Self {
        ResolvedQuantity { value, unit }
    }

    /// Zero with no unit
    pub fn zero() -> Self {
        ResolvedQuantity {
            value: QuantityValue::zero(),
            unit: UnitDefinition::none(),
        }
    }

    pub fn to_quantity(&self) -> Quantity {
        Quantity {
            value: self.value.clone(),
            unit: self.unit.to_unit(),
        }
    }

    pub fn to_plain(&self) -> PlainQuantity {
        Quantity {
            value: self.value.clone(),
            unit: self.unit.to_unit().map(|u| u.name),
        }
    }
}

impl fmt::Display for ResolvedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_plain())
    }
}
