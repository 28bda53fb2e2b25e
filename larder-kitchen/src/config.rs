//! Shopping list settings

use serde::{Deserialize, Serialize};
use larder_units::UnitSystem;

/// How a shopping list groups and displays its totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingListConfig {
    /// Unit system used when picking display units
    pub system: UnitSystem,
    /// Restate single totals in the most readable unit
    pub use_best_units: bool,
    /// Treat "Flour" and "flour" as one ingredient
    pub merge_case_insensitive: bool,
}

impl Default for ShoppingListConfig {
    fn default() -> Self {
        Self {
            system: UnitSystem::Metric,
            use_best_units: true,
            merge_case_insensitive: true,
        }
    }
}

impl ShoppingListConfig {
    pub fn with_system(mut self, system: UnitSystem) -> Self {
        self.system = system;
        self
    }

    pub fn with_best_units(mut self, enabled: bool) -> Self {
        self.use_best_units = enabled;
        self
    }

    pub fn with_case_insensitive(mut self, enabled: bool) -> Self {
        self.merge_case_insensitive = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShoppingListConfig::default();
        assert_eq!(config.system, UnitSystem::Metric);
        assert!(config.use_best_units);
        assert!(config.merge_case_insensitive);
    }

    #[test]
    fn test_builder() {
        let config = ShoppingListConfig::default()
            .with_system(UnitSystem::US)
            .with_best_units(false)
            .with_case_insensitive(false);
        assert_eq!(config.system, UnitSystem::US);
        assert!(!config.use_best_units);
        assert!(!config.merge_case_insensitive);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ShoppingListConfig = serde_json::from_str(r#"{"system":"uk"}"#).unwrap();
        assert_eq!(config.system, UnitSystem::UK);
        assert!(config.use_best_units);

        let config: ShoppingListConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ShoppingListConfig::default());
    }
}
