//! Equivalence clusters: the unit lists a computation may move between
//!
//! Only the caller's own alternative groups link units. Every entry in a
//! cluster describes the same amount, so the observed values double as
//! conversion ratios between units the catalog cannot relate (e.g. "large"
//! and "cup").

use larder_core::{Number, NumericValue, QuantityValue};
use crate::unit::{are_units_groupable, conversion_factor};
use crate::{Mention, ResolvedQuantity, UnitCatalog, UnitDefinition};

/// One consistent amount stated in several units
pub type Cluster = Vec<ResolvedQuantity>;

/// Build clusters from every alternative group with two or more entries
///
/// A group that shares a groupable unit with existing clusters is merged
/// into the first of them; if it bridges several, they collapse into one.
/// Bare quantities and single-entry groups never seed a cluster.
#[tracing::instrument(level = "trace", skip_all, fields(items = items.len()))]
pub fn build_clusters(catalog: &UnitCatalog, items: &[Mention]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for item in items {
        let Mention::Or(group) = item else { continue };
        if group.len() < 2 {
            continue;
        }
        let entries: Vec<ResolvedQuantity> = group.entries().iter().map(|q| q.resolve(catalog)).collect();

        let overlapping: Vec<usize> = clusters
            .iter()
            .enumerate()
            .filter(|(_, cluster)| overlaps(cluster, &entries))
            .map(|(i, _)| i)
            .collect();

        let Some((&target, rest)) = overlapping.split_first() else {
            tracing::debug!(units = ?unit_names(&entries), "new cluster");
            clusters.push(seed(entries));
            continue;
        };

        merge_into(&mut clusters[target], &entries);
        // Higher indices first so `target` stays valid
        for &i in rest.iter().rev() {
            let bridged = clusters.remove(i);
            merge_into(&mut clusters[target], &bridged);
        }
        tracing::debug!(units = ?unit_names(&clusters[target]), merged = rest.len() + 1, "cluster merged");
    }

    clusters
}

/// The cluster holding a unit groupable with any of `entries`
pub fn find_cluster<'a>(clusters: &'a [Cluster], entries: &[ResolvedQuantity]) -> Option<&'a Cluster> {
    clusters.iter().find(|c| overlaps(c, entries))
}

/// The cluster's entry for `unit`, if present
pub fn observed<'a>(cluster: &'a [ResolvedQuantity], unit: &UnitDefinition) -> Option<&'a ResolvedQuantity> {
    cluster.iter().find(|q| q.unit.same_unit(unit))
}

/// Exact ratio `value(to) / value(from)` as observed in the cluster
pub fn observed_ratio(cluster: &[ResolvedQuantity], from: &UnitDefinition, to: &UnitDefinition) -> Option<Number> {
    let from = observed(cluster, from)?.value.average_value();
    let to = observed(cluster, to)?.value.average_value();
    to.number()?.checked_div(from.number()?).ok()
}

fn overlaps(cluster: &[ResolvedQuantity], entries: &[ResolvedQuantity]) -> bool {
    cluster
        .iter()
        .any(|c| entries.iter().any(|e| are_units_groupable(&c.unit, &e.unit)))
}

fn seed(entries: Vec<ResolvedQuantity>) -> Cluster {
    let mut cluster: Cluster = Vec::with_capacity(entries.len());
    for entry in entries {
        if observed(&cluster, &entry.unit).is_none() {
            cluster.push(entry);
        }
    }
    cluster
}

/// Add the units of `incoming` the cluster lacks, rescaled to the cluster's
/// amount through a shared anchor unit
fn merge_into(cluster: &mut Cluster, incoming: &[ResolvedQuantity]) {
    let scale = anchor_scale(cluster, incoming);
    if scale.is_none() {
        tracing::debug!("no numeric anchor, merging values unscaled");
    }

    for entry in incoming {
        if observed(cluster, &entry.unit).is_some() {
            continue;
        }
        let value = match &scale {
            Some(factor) => scale_exact(&entry.value, factor),
            None => entry.value.clone(),
        };
        cluster.push(ResolvedQuantity::new(value, entry.unit.clone()));
    }
}

/// `v * factor` with no rounding; cluster values serve as ratios later on
fn scale_exact(v: &QuantityValue, factor: &Number) -> QuantityValue {
    let scale = |n: &NumericValue| match n.to_number() {
        Ok(n) => NumericValue::from_number(&n.mul(factor)),
        Err(_) => n.clone(),
    };
    match v {
        QuantityValue::Fixed { value } => QuantityValue::Fixed { value: scale(value) },
        QuantityValue::Range { min, max } => QuantityValue::Range {
            min: scale(min),
            max: scale(max),
        },
    }
}

/// Factor taking incoming values to the cluster's amount
///
/// Prefers a unit present on both sides; otherwise converts a groupable
/// pair through the catalog. `None` when the anchor is text or zero.
fn anchor_scale(cluster: &[ResolvedQuantity], incoming: &[ResolvedQuantity]) -> Option<Number> {
    let same = incoming.iter().find_map(|inc| observed(cluster, &inc.unit).map(|c| (c, inc)));
    let (ours, theirs, conversion) = match same {
        Some((c, inc)) => (c, inc, Number::one()),
        None => incoming.iter().find_map(|inc| {
            cluster.iter().find_map(|c| {
                if !are_units_groupable(&c.unit, &inc.unit) {
                    return None;
                }
                conversion_factor(&inc.unit, &c.unit).ok().map(|f| (c, inc, f))
            })
        })?,
    };

    let ours = ours.value.average_value();
    let theirs = theirs.value.average_value();
    let theirs_in_ours = theirs.number()?.mul(&conversion);
    ours.number()?.checked_div(&theirs_in_ours).ok()
}

fn unit_names(cluster: &[ResolvedQuantity]) -> Vec<&str> {
    cluster.iter().map(|q| q.unit.name.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::QuantityValue;
    use crate::{OrGroup, Quantity, UNITS};

    fn q(v: f64, unit: &str) -> Quantity {
        Quantity::with_unit(QuantityValue::decimal(v), unit)
    }

    fn pq(v: f64, unit: &str) -> Quantity {
        Quantity::protected(QuantityValue::decimal(v), unit)
    }

    fn or(entries: Vec<Quantity>) -> Mention {
        Mention::Or(OrGroup::new(entries).unwrap())
    }

    fn value(cluster: &Cluster, unit: &str) -> f64 {
        let def = UNITS.resolve(unit, false);
        match &observed(cluster, &def).unwrap().value {
            QuantityValue::Fixed { value } => value.to_f64().unwrap(),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_single_group_seeds_cluster() {
        let clusters = build_clusters(&UNITS, &[or(vec![q(1.0, "cup"), q(236.0, "ml")])]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 2);
    }

    #[test]
    fn test_bare_and_singletons_do_not_seed() {
        let items = vec![
            Mention::Quantity(q(1.0, "cup")),
            or(vec![q(2.0, "g")]),
        ];
        assert!(build_clusters(&UNITS, &items).is_empty());
    }

    #[test]
    fn test_merge_scales_new_units() {
        let items = vec![
            or(vec![q(10.0, "cup"), q(2366.0, "mL")]),
            or(vec![q(1.0, "pint"), q(473.0, "ml")]),
        ];
        let clusters = build_clusters(&UNITS, &items);
        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.len(), 3);
        // existing units keep the cluster's values
        assert!((value(cluster, "ml") - 2366.0).abs() < 1e-9);
        assert!((value(cluster, "cup") - 10.0).abs() < 1e-9);
        // pint is rescaled by 2366 / 473, kept exact
        assert!((value(cluster, "pint") - 2366.0 / 473.0).abs() < 1e-9);
        let pint = observed(cluster, &UNITS.resolve("pint", false)).unwrap();
        assert_eq!(pint.value, QuantityValue::fraction(2366, 473).unwrap());
    }

    #[test]
    fn test_merge_keeps_non_whole_scale_exact() {
        let items = vec![
            or(vec![q(3.0, "cup"), pq(1.0, "large")]),
            or(vec![q(7.0, "cup"), pq(1.0, "small")]),
        ];
        let clusters = build_clusters(&UNITS, &items);
        let cluster = &clusters[0];
        let small = observed(cluster, &UNITS.resolve("small", true)).unwrap();
        assert_eq!(small.value, QuantityValue::fraction(3, 7).unwrap());
        assert!(small.unit.integer_protected);

        let cup = UNITS.resolve("cup", false);
        let ratio = observed_ratio(cluster, &small.unit, &cup).unwrap();
        assert_eq!(ratio, Number::from_i64(7));
    }

    #[test]
    fn test_merge_scales_ranges() {
        let items = vec![
            or(vec![q(1.0, "cup"), Quantity::with_unit(QuantityValue::range(1.0, 2.0), "handful")]),
            or(vec![q(3.0, "cup"), Quantity::with_unit(QuantityValue::range(1.0, 2.0), "sprig")]),
        ];
        let clusters = build_clusters(&UNITS, &items);
        let sprig = observed(&clusters[0], &UNITS.resolve("sprig", false)).unwrap();
        assert_eq!(
            sprig.value,
            QuantityValue::Range {
                min: NumericValue::Fraction { num: 1, den: 3 },
                max: NumericValue::Fraction { num: 2, den: 3 },
            }
        );
    }

    #[test]
    fn test_unrelated_groups_stay_apart() {
        let items = vec![
            or(vec![q(1.0, "cup"), q(240.0, "ml")]),
            or(vec![q(2.0, "lb"), q(32.0, "oz")]),
        ];
        assert_eq!(build_clusters(&UNITS, &items).len(), 2);
    }

    #[test]
    fn test_groupable_anchor_converts() {
        let items = vec![
            or(vec![pq(2.0, "large"), q(1.0, "cup")]),
            or(vec![q(1.0, "pint"), pq(4.0, "small")]),
        ];
        let clusters = build_clusters(&UNITS, &items);
        assert_eq!(clusters.len(), 1);
        // 1 pint is 2 cups, so the cluster's 1 cup is half the incoming amount
        assert!((value(&clusters[0], "pint") - 0.5).abs() < 1e-9);
        assert!((value(&clusters[0], "small") - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bridge_merges_clusters() {
        let items = vec![
            or(vec![q(1.0, "cup"), pq(2.0, "large")]),
            or(vec![q(100.0, "g"), pq(3.0, "small")]),
            or(vec![pq(2.0, "large"), pq(3.0, "small")]),
        ];
        let clusters = build_clusters(&UNITS, &items);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 4);
        assert!((value(&clusters[0], "g") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_observed_ratio() {
        let clusters = build_clusters(&UNITS, &[or(vec![pq(2.0, "large"), q(1.5, "cup")])]);
        let large = UNITS.resolve("large", false);
        let cup = UNITS.resolve("cup", false);
        let ratio = observed_ratio(&clusters[0], &large, &cup).unwrap();
        assert_eq!(ratio, Number::from_ratio(3, 4).unwrap());
    }

    #[test]
    fn test_text_anchor_merges_unscaled() {
        let items = vec![
            or(vec![q(1.0, "cup"), Quantity::with_unit(QuantityValue::text("some"), "handful")]),
            or(vec![Quantity::with_unit(QuantityValue::text("a few"), "handful"), q(3.0, "sprig")]),
        ];
        let clusters = build_clusters(&UNITS, &items);
        assert_eq!(clusters.len(), 1);
        assert!((value(&clusters[0], "sprig") - 3.0).abs() < 1e-9);
    }
}
