//! Larder Units - Quantity equivalence and conversion for recipes
//!
//! Combines ingredient mentions written in mixed units into one total.
//! Mentions may carry alternatives ("1 cup | 236 ml"); those alternatives
//! link units the catalog cannot relate on its own, so "large" eggs can be
//! summed with cups of egg once a recipe has said how many cups one is.
//!
//! Pipeline:
//! - Clusters: groups of mutually linked units, with observed ratios
//! - Reduction: each mention restated in one unit of its cluster
//! - Summation: reduced quantities folded into partial totals
//! - Expansion: every total restated in the other units of its cluster
//! - Best unit: the most readable unit for display in a unit system
//!
//! Unit systems: Metric, US customary, Imperial (UK), Japanese.

mod system;
mod fraction;
mod unit;
mod units;
mod quantity;
mod group;
mod convert;
mod parse;
mod cluster;
mod reduce;
mod sum;
mod simplify;
mod best;

pub use system::{UnitSystem, UnitType};
pub use fraction::{approximate_fraction, FractionsPolicy, DEFAULT_ACCURACY};
pub use unit::{
    are_units_convertible, are_units_groupable, conversion_factor, get_to_base,
    is_unit_compatible_with_system, Unit, UnitDefinition, DEFAULT_MAX_VALUE,
};
pub use units::{UnitCatalog, UNITS};
pub use quantity::{PlainQuantity, Quantity, ResolvedQuantity};
pub use group::{AndGroup, Group, Mention, OrGroup, Simplified};
pub use convert::{add_quantities, convert_quantity};
pub use parse::{parse_quantity, parse_unit, parse_value};
pub use cluster::{build_clusters, Cluster};
pub use reduce::{reduce_mention, reduce_mentions, sort_cluster};
pub use sum::{sum_mentions, Summation};
pub use simplify::{expand, simplify};
pub use best::{find_best_unit, to_base_value, BestUnit, INTEGER_TOLERANCE};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        find_best_unit, parse_quantity, simplify, Mention, OrGroup, Quantity, Simplified,
        UnitCatalog, UnitSystem, UNITS,
    };
}
