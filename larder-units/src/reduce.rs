//! Canonical reduction: one quantity per mention
//!
//! Each mention is restated in a single unit of its cluster so that
//! summation only ever adds like with like. Protected units win over
//! everything else and are never turned into odd decimals.

use std::cmp::Ordering;
use larder_core::{multiply_quantity_value, QuantityError};
use crate::cluster::{find_cluster, observed, observed_ratio, Cluster};
use crate::convert::convert_quantity;
use crate::unit::{are_units_convertible, are_units_groupable};
use crate::{Mention, ResolvedQuantity, UnitCatalog};

/// Cluster order used for reduction and for listing equivalents:
/// protected units (alphabetical), then the no-unit sentinel, then the rest
/// in the order they were observed.
pub fn sort_cluster(cluster: &[ResolvedQuantity]) -> Cluster {
    let rank = |q: &ResolvedQuantity| {
        if q.unit.integer_protected {
            0
        } else if q.unit.is_none() {
            1
        } else {
            2
        }
    };

    let mut sorted = cluster.to_vec();
    sorted.sort_by(|a, b| match rank(a).cmp(&rank(b)) {
        Ordering::Equal if rank(a) == 0 => a.unit.key.cmp(&b.unit.key),
        other => other,
    });
    sorted
}

/// Reduce every mention to one canonical quantity
pub fn reduce_mentions(catalog: &UnitCatalog, clusters: &[Cluster], items: &[Mention]) -> Vec<ResolvedQuantity> {
    items.iter().map(|item| reduce_mention(catalog, clusters, item)).collect()
}

/// Pick the representative of one mention
///
/// 1. a protected matching entry is kept as is, whatever its position
///    in the mention
/// 2. else the first other protected cluster unit giving a whole number
/// 3. else the first unprotected cluster unit
///
/// Mentions outside every cluster pass through with their first entry.
pub fn reduce_mention(catalog: &UnitCatalog, clusters: &[Cluster], item: &Mention) -> ResolvedQuantity {
    let entries: Vec<ResolvedQuantity> = item.entries().iter().map(|q| q.resolve(catalog)).collect();
    let first = entries[0].clone();

    let Some(cluster) = find_cluster(clusters, &entries) else {
        return first;
    };

    let sorted = sort_cluster(cluster);
    let in_cluster = |e: &&ResolvedQuantity| observed(cluster, &e.unit).is_some();

    // A protected entry wins wherever the author listed it
    let matching = sorted
        .iter()
        .filter(|c| c.unit.integer_protected)
        .find_map(|c| entries.iter().find(|e| e.unit.same_unit(&c.unit)))
        .or_else(|| entries.iter().filter(in_cluster).find(|e| e.unit.integer_protected))
        .or_else(|| entries.iter().find(in_cluster))
        .or_else(|| {
            entries
                .iter()
                .find(|e| cluster.iter().any(|c| are_units_groupable(&c.unit, &e.unit)))
        })
        .unwrap_or(&first);

    let protected = matching.unit.integer_protected
        || observed(cluster, &matching.unit).is_some_and(|c| c.unit.integer_protected);
    if protected {
        return matching.clone();
    }

    for target in sorted.iter().filter(|c| c.unit.integer_protected) {
        if target.unit.same_unit(&matching.unit) {
            continue;
        }
        if let Ok(converted) = convert_within(cluster, matching, target) {
            if converted.value.is_integer_like() {
                tracing::debug!(from = %matching, to = %converted, "reduced to protected unit");
                return converted;
            }
        }
    }

    let Some(target) = sorted.iter().find(|c| !c.unit.integer_protected) else {
        return matching.clone();
    };
    match convert_within(cluster, matching, target) {
        Ok(converted) => {
            tracing::debug!(from = %matching, to = %converted, "reduced");
            converted
        }
        Err(err) => {
            tracing::debug!(from = %matching, to = %target.unit, error = %err, "kept unreduced");
            matching.clone()
        }
    }
}

/// Restate `q` in `target`'s unit, through the catalog when both units
/// are of one known type, else through the ratio the cluster observed
fn convert_within(
    cluster: &[ResolvedQuantity],
    q: &ResolvedQuantity,
    target: &ResolvedQuantity,
) -> Result<ResolvedQuantity, QuantityError> {
    if q.unit.same_unit(&target.unit) || are_units_convertible(&q.unit, &target.unit) {
        return convert_quantity(q, &target.unit);
    }
    let ratio = observed_ratio(cluster, &q.unit, &target.unit)
        .ok_or_else(|| QuantityError::incompatible(&q.unit.name, &target.unit.name))?;
    Ok(ResolvedQuantity::new(
        multiply_quantity_value(&q.value, &ratio),
        target.unit.clone(),
    ))
}
