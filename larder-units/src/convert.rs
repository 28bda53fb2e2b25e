//! Adding and converting resolved quantities

use larder_core::{add_quantity_values, multiply_quantity_value, QuantityError};
use crate::unit::{are_units_convertible, conversion_factor, get_to_base};
use crate::{ResolvedQuantity, UnitCatalog, UnitDefinition, UnitSystem};

/// Restate `q` in `target`
///
/// Fails with `IncompatibleUnits` unless both units measure the same known
/// type (or are the same unit).
pub fn convert_quantity(q: &ResolvedQuantity, target: &UnitDefinition) -> Result<ResolvedQuantity, QuantityError> {
    if q.unit.same_unit(target) {
        return Ok(ResolvedQuantity::new(q.value.clone(), target.clone()));
    }
    let factor = conversion_factor(&q.unit, target)?;
    Ok(ResolvedQuantity::new(
        multiply_quantity_value(&q.value, &factor),
        target.clone(),
    ))
}

/// Add two quantities
///
/// - same unit: values are added directly
/// - one side without a unit: it takes the other side's unit
/// - same type, different systems: both go to the larger metric unit among
///   the two, or the type's base unit if neither is metric
/// - same type and system: both go to the larger unit
///
/// Anything else is `IncompatibleUnits`; text values are `CannotAddTextValue`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn add_quantities(
    catalog: &UnitCatalog,
    a: &ResolvedQuantity,
    b: &ResolvedQuantity,
) -> Result<ResolvedQuantity, QuantityError> {
    for q in [a, b] {
        if q.value.is_text() {
            return Err(QuantityError::CannotAddTextValue(q.value.to_string()));
        }
    }

    if a.unit.same_unit(&b.unit) {
        let value = add_quantity_values(&a.value, &b.value)?;
        return Ok(ResolvedQuantity::new(value, a.unit.clone()));
    }
    if a.unit.is_none() {
        let value = add_quantity_values(&a.value, &b.value)?;
        return Ok(ResolvedQuantity::new(value, b.unit.clone()));
    }
    if b.unit.is_none() {
        let value = add_quantity_values(&a.value, &b.value)?;
        return Ok(ResolvedQuantity::new(value, a.unit.clone()));
    }
    if !are_units_convertible(&a.unit, &b.unit) {
        return Err(QuantityError::incompatible(&a.unit.name, &b.unit.name));
    }

    let target = if a.unit.system != b.unit.system {
        larger_metric_unit(catalog, &a.unit, &b.unit)
    } else {
        larger_unit(&a.unit, &b.unit).clone()
    };
    tracing::trace!(left = %a.unit, right = %b.unit, target = %target, "adding across units");

    let left = convert_quantity(a, &target)?;
    let right = convert_quantity(b, &target)?;
    let value = add_quantity_values(&left.value, &right.value)?;
    Ok(ResolvedQuantity::new(value, target))
}

fn larger_unit<'a>(a: &'a UnitDefinition, b: &'a UnitDefinition) -> &'a UnitDefinition {
    let hint = a.system.filter(|s| *s != UnitSystem::Ambiguous);
    if get_to_base(b, hint) > get_to_base(a, hint) {
        b
    } else {
        a
    }
}

fn larger_metric_unit(catalog: &UnitCatalog, a: &UnitDefinition, b: &UnitDefinition) -> UnitDefinition {
    let metric = |u: &UnitDefinition| u.system == Some(UnitSystem::Metric);
    match (metric(a), metric(b)) {
        (true, true) => larger_unit(a, b).clone(),
        (true, false) => a.clone(),
        (false, true) => b.clone(),
        (false, false) => a
            .kind
            .base_unit()
            .and_then(|key| catalog.normalize(key))
            .cloned()
            .unwrap_or_else(|| larger_unit(a, b).clone()),
    }
}
