//! Larder Kitchen - Recipe scaling and shopping lists
//!
//! Builds on larder-units to turn the ingredient mentions of several
//! recipes into one shopping list.
//! Features:
//! - Recipe scaling by servings or batch count
//! - One combined line per ingredient, merged by normalized name
//! - Amounts that cannot be combined listed separately
//! - Display in the most readable unit of a chosen system
//!
//! For the combination rules themselves, use larder-units.

mod helpers;
mod scaling;
mod config;
mod shopping;

pub use helpers::{normalize_ingredient, validate_positive};
pub use scaling::{batch_factor, scale_mention, scale_quantity, servings_factor};
pub use config::ShoppingListConfig;
pub use shopping::{ShoppingLine, ShoppingList};

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{Number, QuantityValue};
    use larder_units::{parse_quantity, Mention, OrGroup, UnitSystem, UNITS};

    fn mention(amount: &str, unit: &str) -> Mention {
        Mention::Quantity(parse_quantity(amount, unit).unwrap())
    }

    #[test]
    fn test_two_recipes_end_to_end() {
        let pancakes = vec![
            ("Flour", mention("200", "g")),
            ("Milk", mention("1/2", "l")),
            ("Salt", mention("a pinch", "")),
        ];
        let bread = vec![
            ("flour", mention("1", "kg")),
            ("salt", mention("1", "tsp")),
        ];

        let config = ShoppingListConfig::default().with_system(UnitSystem::Metric);
        let mut list = ShoppingList::new(&UNITS, config);
        let double = servings_factor(&Number::from_i64(2), &Number::from_i64(4)).unwrap();
        list.add_recipe(pancakes, &double).unwrap();
        list.add_recipe(bread, &batch_factor(&Number::one()).unwrap()).unwrap();

        let lines: Vec<String> = list.render().unwrap().iter().map(|l| l.to_string()).collect();
        assert_eq!(
            lines,
            vec!["flour: 1.4 kg", "milk: 1 l", "salt: a pinch + 1 tsp"]
        );
    }

    #[test]
    fn test_linked_mentions_across_recipes() {
        let butter = |cups: &str, grams: &str| {
            Mention::Or(OrGroup::with_rest(
                parse_quantity(cups, "cup").unwrap(),
                vec![parse_quantity(grams, "g").unwrap()],
            ))
        };
        let mut list = ShoppingList::new(&UNITS, ShoppingListConfig::default());
        list.add_recipe(vec![("butter", butter("1/2", "113"))], &Number::one()).unwrap();
        list.add_recipe(vec![("butter", butter("1/4", "56.5"))], &Number::one()).unwrap();

        let totals = list.totals().unwrap();
        assert_eq!(totals.len(), 1);
        let quantities = totals[0].total.quantities();
        assert_eq!(quantities.len(), 2);
        assert_eq!(quantities[0].unit.as_deref(), Some("cup"));
        assert_eq!(quantities[0].value, QuantityValue::fraction(3, 4).unwrap());
        assert_eq!(quantities[1].unit.as_deref(), Some("g"));
    }
}
