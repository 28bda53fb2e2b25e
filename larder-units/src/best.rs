//! Best-unit selection for display

use larder_core::Number;
use crate::unit::{get_to_base, is_unit_compatible_with_system};
use crate::{approximate_fraction, UnitCatalog, UnitDefinition, UnitSystem, UnitType};

/// Distance from a whole number still treated as whole
pub const INTEGER_TOLERANCE: f64 = 0.0005;

/// The chosen unit and the amount expressed in it
#[derive(Debug, Clone, PartialEq)]
pub struct BestUnit {
    pub unit: UnitDefinition,
    pub value: f64,
}

struct Candidate<'a> {
    unit: &'a UnitDefinition,
    value: f64,
    in_family: bool,
}

impl Candidate<'_> {
    fn in_range(&self) -> bool {
        if self.value >= 1.0 {
            self.value <= self.unit.max_value
        } else {
            approximate_fraction(self.value, &self.unit.fractions).is_some()
        }
    }

    fn is_integer(&self) -> bool {
        self.value >= 1.0 && (self.value - self.value.round()).abs() < INTEGER_TOLERANCE
    }

    /// How far the value lies outside `[1, max_value]`
    fn distance_to_range(&self) -> f64 {
        if self.value < 1.0 {
            1.0 - self.value
        } else if self.value > self.unit.max_value {
            self.value - self.unit.max_value
        } else {
            0.0
        }
    }

    fn into_best(self) -> BestUnit {
        BestUnit {
            unit: self.unit.clone(),
            value: self.value,
        }
    }
}

/// Pick the most readable unit for `value_in_base` (grams, milliliters or
/// pieces) in `system`
///
/// Candidates are the catalog's best units of `kind` usable in `system`,
/// plus any of `input_units`, which also win ties. Among candidates whose
/// value is in their natural range, the order of preference is:
/// 1. a whole number in one of the input units
/// 2. the smallest whole number
/// 3. the smallest value
///
/// With nothing in range the candidate closest to its range is used. Never
/// fails: with no candidates at all the first input unit is returned.
#[tracing::instrument(level = "trace", skip_all, fields(%kind, %system))]
pub fn find_best_unit(
    catalog: &UnitCatalog,
    value_in_base: f64,
    kind: UnitType,
    system: UnitSystem,
    input_units: &[UnitDefinition],
) -> BestUnit {
    let in_family = |u: &UnitDefinition| input_units.iter().any(|i| i.same_unit(u));

    let candidates: Vec<Candidate> = catalog
        .iter()
        .filter(|u| u.kind == kind)
        .filter(|u| (u.is_best_unit && is_unit_compatible_with_system(u, system)) || in_family(u))
        .filter_map(|u| {
            let factor = get_to_base(u, Some(system)).to_f64();
            if factor <= 0.0 {
                return None;
            }
            Some(Candidate {
                unit: u,
                value: value_in_base / factor,
                in_family: in_family(u),
            })
        })
        .collect();

    if candidates.is_empty() {
        return fallback(catalog, value_in_base, kind, system, input_units);
    }

    let in_range: Vec<usize> = (0..candidates.len()).filter(|&i| candidates[i].in_range()).collect();

    let integers: Vec<usize> = in_range.iter().copied().filter(|&i| candidates[i].is_integer()).collect();
    let family_integers: Vec<usize> = integers.iter().copied().filter(|&i| candidates[i].in_family).collect();

    // Smallest value wins, an input unit breaks ties
    let smallest = |pool: &[usize]| -> Option<usize> {
        pool.iter().copied().reduce(|best, i| {
            let (b, c) = (&candidates[best], &candidates[i]);
            let tie = (c.value - b.value).abs() <= f64::EPSILON;
            if (!tie && c.value < b.value) || (tie && c.in_family && !b.in_family) {
                i
            } else {
                best
            }
        })
    };

    let chosen = smallest(&family_integers)
        .or_else(|| smallest(&integers))
        .or_else(|| smallest(&in_range));

    let index = match chosen {
        Some(i) => i,
        None => {
            let mut closest = 0;
            for (i, c) in candidates.iter().enumerate() {
                let d = c.distance_to_range();
                let best = candidates[closest].distance_to_range();
                if d < best || (d == best && c.in_family && !candidates[closest].in_family) {
                    closest = i;
                }
            }
            closest
        }
    };

    let best = candidates.into_iter().nth(index).map(Candidate::into_best);
    match best {
        Some(best) => {
            tracing::trace!(unit = %best.unit, value = best.value, "best unit");
            best
        }
        None => fallback(catalog, value_in_base, kind, system, input_units),
    }
}

/// The first input unit, else the type's base unit, else no unit
fn fallback(
    catalog: &UnitCatalog,
    value_in_base: f64,
    kind: UnitType,
    system: UnitSystem,
    input_units: &[UnitDefinition],
) -> BestUnit {
    let unit = input_units
        .first()
        .cloned()
        .or_else(|| kind.base_unit().and_then(|key| catalog.normalize(key)).cloned())
        .unwrap_or_else(UnitDefinition::none);

    let factor = get_to_base(&unit, Some(system));
    let value = if factor.is_zero() {
        value_in_base
    } else {
        value_in_base / factor.to_f64()
    };
    BestUnit { unit, value }
}

/// Amount in the type's base unit, for feeding into [`find_best_unit`]
pub fn to_base_value(value: &Number, unit: &UnitDefinition, system: Option<UnitSystem>) -> f64 {
    value.mul(&get_to_base(unit, system)).to_f64()
}
