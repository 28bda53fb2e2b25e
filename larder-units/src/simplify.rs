//! Re-expansion of totals across their clusters
//!
//! The entry point of the engine. `simplify` clusters, reduces and sums its
//! input, then states each total again in every unit its cluster knew, so a
//! caller can still show "3.5 kg | 7.7 lb".

use larder_core::{add_quantity_values, multiply_quantity_value, QuantityError, QuantityValue};
use crate::cluster::{observed, observed_ratio, Cluster};
use crate::reduce::sort_cluster;
use crate::sum::{sum_mentions, Summation};
use crate::{AndGroup, Group, Mention, OrGroup, ResolvedQuantity, Simplified, UnitCatalog};

/// Combine all mentions of one ingredient into a single total
///
/// Returns a plain quantity, an alternative group for a total known in
/// several units, or an `AndGroup` when incompatible amounts could not be
/// merged. Units in the result are plain names.
///
/// Feeding a result back in is a no-op, and the total does not depend on
/// the order of the input.
#[tracing::instrument(level = "trace", skip_all, fields(items = items.len()))]
pub fn simplify(catalog: &UnitCatalog, items: &[Mention]) -> Result<Simplified, QuantityError> {
    let summation = sum_mentions(catalog, items)?;
    let mut outputs = expand(&summation);

    Ok(if outputs.len() == 1 {
        outputs.remove(0)
    } else {
        Simplified::Group(Group::And(AndGroup::new(outputs)))
    })
}

/// One output per cluster touched by the partials, plus every partial
/// outside all clusters, in partial order
///
/// Within a cluster the main quantities follow the cluster's sort order.
pub fn expand(summation: &Summation) -> Vec<Simplified> {
    let partials = &summation.partials;
    let mut emitted = vec![false; partials.len()];
    let mut outputs = Vec::new();

    for (i, partial) in partials.iter().enumerate() {
        if emitted[i] {
            continue;
        }
        let Some(cluster) = cluster_of(&summation.clusters, partial) else {
            emitted[i] = true;
            outputs.push(Simplified::Quantity(partial.to_plain()));
            continue;
        };

        let mut mains = Vec::new();
        for (j, other) in partials.iter().enumerate().skip(i) {
            if !emitted[j] && observed(cluster, &other.unit).is_some() {
                emitted[j] = true;
                mains.push(other);
            }
        }
        // Same order as the equivalents, whatever order the input had
        let order = sort_cluster(cluster);
        mains.sort_by_key(|m| order.iter().position(|c| c.unit.same_unit(&m.unit)));
        outputs.push(represent(cluster, &mains));
    }

    outputs
}

fn cluster_of<'a>(clusters: &'a [Cluster], q: &ResolvedQuantity) -> Option<&'a Cluster> {
    clusters.iter().find(|c| observed(c, &q.unit).is_some())
}

/// The mains, followed by what they amount to in each other cluster unit
fn represent(cluster: &[ResolvedQuantity], mains: &[&ResolvedQuantity]) -> Simplified {
    let mut equivalents = Vec::new();
    for entry in sort_cluster(cluster) {
        if mains.iter().any(|m| m.unit.same_unit(&entry.unit)) {
            continue;
        }
        if let Some(value) = equivalent(cluster, mains, &entry) {
            equivalents.push(Simplified::Quantity(
                ResolvedQuantity::new(value, entry.unit.clone()).to_plain(),
            ));
        }
    }

    let main = match mains {
        [single] => Simplified::Quantity(single.to_plain()),
        _ => Simplified::Group(Group::And(AndGroup::new(
            mains.iter().map(|m| Simplified::Quantity(m.to_plain())).collect(),
        ))),
    };

    if equivalents.is_empty() {
        return main;
    }
    Simplified::Group(Group::Or(OrGroup::with_rest(main, equivalents)))
}

/// Sum over mains of `main * observed(target) / observed(main)`
///
/// `None` if any ratio is unavailable (text or zero in the cluster).
fn equivalent(
    cluster: &[ResolvedQuantity],
    mains: &[&ResolvedQuantity],
    target: &ResolvedQuantity,
) -> Option<QuantityValue> {
    let mut total: Option<QuantityValue> = None;
    for main in mains {
        let ratio = observed_ratio(cluster, &main.unit, &target.unit)?;
        let scaled = multiply_quantity_value(&main.value, &ratio);
        total = Some(match total {
            Some(acc) => add_quantity_values(&acc, &scaled).ok()?,
            None => scaled,
        });
    }
    total
}
