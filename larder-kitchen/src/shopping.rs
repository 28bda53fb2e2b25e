//! Shopping list aggregation
//!
//! Collects ingredient mentions from any number of (scaled) recipes and
//! combines them into one line per ingredient. Amounts that cannot be
//! added, such as "a pinch" next to "1 pinch", are listed side by side
//! instead of failing the whole list.

use std::fmt;
use serde::Serialize;
use larder_core::{Number, QuantityError, QuantityValue, SCALE_DECIMAL_PLACES};
use larder_units::{
    approximate_fraction, find_best_unit, simplify, to_base_value, AndGroup, BestUnit, Group,
    Mention, PlainQuantity, Simplified, UnitCatalog,
};

use crate::config::ShoppingListConfig;
use crate::helpers::{normalize_ingredient, validate_positive};
use crate::scaling::scale_mention;

/// One ingredient and its combined amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingLine {
    pub name: String,
    pub total: Simplified,
}

impl fmt::Display for ShoppingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.total)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    mentions: Vec<Mention>,
}

/// Ingredients gathered across recipes, in first-seen order
#[derive(Debug, Clone)]
pub struct ShoppingList<'a> {
    catalog: &'a UnitCatalog,
    config: ShoppingListConfig,
    entries: Vec<Entry>,
}

impl<'a> ShoppingList<'a> {
    pub fn new(catalog: &'a UnitCatalog, config: ShoppingListConfig) -> Self {
        Self {
            catalog,
            config,
            entries: Vec::new(),
        }
    }

    pub fn config(&self) -> &ShoppingListConfig {
        &self.config
    }

    /// Number of distinct ingredients
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one already-scaled mention
    pub fn add(&mut self, name: &str, mention: Mention) {
        let name = normalize_ingredient(name, self.config.merge_case_insensitive);
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.mentions.push(mention),
            None => self.entries.push(Entry {
                name,
                mentions: vec![mention],
            }),
        }
    }

    /// Add a recipe's ingredients, each scaled by `factor`
    pub fn add_recipe<I, S>(&mut self, ingredients: I, factor: &Number) -> Result<(), QuantityError>
    where
        I: IntoIterator<Item = (S, Mention)>,
        S: AsRef<str>,
    {
        validate_positive(factor, "factor")?;
        for (name, mention) in ingredients {
            self.add(name.as_ref(), scale_mention(&mention, factor));
        }
        Ok(())
    }

    /// Combined amount of every ingredient, units as written
    ///
    /// Only fatal errors propagate; text or incompatible amounts end up as
    /// separate entries of an `AndGroup`.
    pub fn totals(&self) -> Result<Vec<ShoppingLine>, QuantityError> {
        self.entries
            .iter()
            .map(|entry| {
                Ok(ShoppingLine {
                    name: entry.name.clone(),
                    total: self.total(entry)?,
                })
            })
            .collect()
    }

    /// Totals ready for display
    ///
    /// With `use_best_units`, a single numeric total in a known unit is
    /// restated in the most readable unit of the configured system.
    pub fn render(&self) -> Result<Vec<ShoppingLine>, QuantityError> {
        let mut lines = self.totals()?;
        if self.config.use_best_units {
            for line in &mut lines {
                if let Some(best) = self.best_display(&line.total) {
                    line.total = best;
                }
            }
        }
        Ok(lines)
    }

    fn total(&self, entry: &Entry) -> Result<Simplified, QuantityError> {
        match simplify(self.catalog, &entry.mentions) {
            Ok(total) => Ok(total),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(
                    ingredient = %entry.name,
                    error = %err,
                    "amounts cannot be combined, listing separately"
                );
                let parts = entry
                    .mentions
                    .iter()
                    .map(|m| simplify(self.catalog, std::slice::from_ref(m)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Simplified::Group(Group::And(AndGroup::new(parts))))
            }
            Err(err) => Err(err),
        }
    }

    fn best_display(&self, total: &Simplified) -> Option<Simplified> {
        let q = total.as_quantity()?;
        let unit = self.catalog.resolve(q.unit.as_deref()?, false);
        if !unit.is_known() {
            return None;
        }
        let QuantityValue::Fixed { value } = &q.value else {
            return None;
        };
        let amount = value.to_number().ok()?;

        let system = self.config.system;
        let base = to_base_value(&amount, &unit, Some(system));
        let best = find_best_unit(self.catalog, base, unit.kind, system, std::slice::from_ref(&unit));
        tracing::debug!(from = %q, to = %best.unit, value = best.value, "display unit");

        Some(Simplified::Quantity(PlainQuantity::new(
            display_value(&best),
            Some(best.unit.name.clone()),
        )))
    }
}

/// A simple fraction below one, else the value rounded for display
fn display_value(best: &BestUnit) -> QuantityValue {
    if best.value < 1.0 {
        if let Some((0, num, den)) = approximate_fraction(best.value, &best.unit.fractions) {
            if let Ok(v) = QuantityValue::fraction(num as i64, den as i64) {
                return v;
            }
        }
    }
    let rounded = Number::from_f64(best.value).round_to(SCALE_DECIMAL_PLACES);
    QuantityValue::decimal(rounded.to_f64())
}
