//! Summation of reduced quantities into running partial totals

use larder_core::QuantityError;
use crate::cluster::{build_clusters, Cluster};
use crate::convert::add_quantities;
use crate::reduce::reduce_mentions;
use crate::unit::are_units_groupable;
use crate::{Mention, ResolvedQuantity, UnitCatalog};

/// Partial totals plus the clusters they were reduced through
#[derive(Debug, Clone, PartialEq)]
pub struct Summation {
    pub clusters: Vec<Cluster>,
    /// One entry per group of mutually addable units, in first-seen order
    pub partials: Vec<ResolvedQuantity>,
}

/// Add up a list of mentions
///
/// A new quantity joins the first partial its unit is groupable with;
/// otherwise it starts a partial of its own. Text values that would have
/// to be added fail with `CannotAddTextValue`.
pub fn sum_mentions(catalog: &UnitCatalog, items: &[Mention]) -> Result<Summation, QuantityError> {
    match items {
        [] => {
            return Ok(Summation {
                clusters: Vec::new(),
                partials: vec![ResolvedQuantity::zero()],
            })
        }
        [Mention::Quantity(q)] => {
            return Ok(Summation {
                clusters: Vec::new(),
                partials: vec![q.resolve(catalog)],
            })
        }
        _ => {}
    }

    let clusters = build_clusters(catalog, items);
    let reduced = reduce_mentions(catalog, &clusters, items);

    let mut partials: Vec<ResolvedQuantity> = Vec::new();
    for q in reduced {
        match partials.iter().position(|p| are_units_groupable(&p.unit, &q.unit)) {
            Some(i) => partials[i] = add_quantities(catalog, &partials[i], &q)?,
            None => partials.push(q),
        }
    }

    Ok(Summation { clusters, partials })
}
