//! Recipe scaling
//!
//! Scale ingredient mentions by servings or batch count before they are
//! added to a shopping list.

use larder_core::{multiply_quantity_value, Number, QuantityError};
use larder_units::{Mention, OrGroup, Quantity};

use crate::helpers::validate_positive;

// ============ factors ============

/// Factor taking a recipe for `from` servings to one for `to` servings
pub fn servings_factor(from: &Number, to: &Number) -> Result<Number, QuantityError> {
    validate_positive(from, "from_servings")?;
    validate_positive(to, "to_servings")?;
    Ok(to.checked_div(from)?)
}

/// Factor for cooking `batches` times the recipe
pub fn batch_factor(batches: &Number) -> Result<Number, QuantityError> {
    validate_positive(batches, "batches")?;
    Ok(batches.clone())
}

// ============ scaling ============

/// Scale one quantity; text values and units are left as they are
pub fn scale_quantity(q: &Quantity, factor: &Number) -> Quantity {
    Quantity::new(multiply_quantity_value(&q.value, factor), q.unit.clone())
}

/// Scale every entry of a mention by the same factor
pub fn scale_mention(mention: &Mention, factor: &Number) -> Mention {
    match mention {
        Mention::Quantity(q) => Mention::Quantity(scale_quantity(q, factor)),
        Mention::Or(group) => {
            let (first, rest) = group.entries().split_at(1);
            Mention::Or(OrGroup::with_rest(
                scale_quantity(&first[0], factor),
                rest.iter().map(|q| scale_quantity(q, factor)),
            ))
        }
    }
}
