//! Unit catalog - kitchen units of mass, volume and count

use std::collections::HashMap;
use std::sync::LazyLock;
use larder_core::Number;
use crate::{UnitDefinition, UnitSystem, UnitType};

/// Shared read-only catalog
pub static UNITS: LazyLock<UnitCatalog> = LazyLock::new(UnitCatalog::bundled);

/// Immutable registry of known units
///
/// Built once and passed by reference into every engine call. Lookups are
/// case-insensitive over canonical names and aliases.
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    units: Vec<UnitDefinition>,
    index: HashMap<String, usize>,
}

impl UnitCatalog {
    /// Catalog with no units; every name resolves to a placeholder
    pub fn empty() -> Self {
        UnitCatalog {
            units: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The built-in catalog
    pub fn bundled() -> Self {
        let mut catalog = Self::empty();
        catalog.register_mass_units();
        catalog.register_volume_units();
        catalog.register_count_units();
        catalog
    }

    /// Build from explicit definitions. Later names shadow earlier ones.
    pub fn from_definitions(defs: impl IntoIterator<Item = UnitDefinition>) -> Self {
        let mut catalog = Self::empty();
        for def in defs {
            catalog.register(def);
        }
        catalog
    }

    // ========== Lookup ==========

    /// Case-insensitive lookup by canonical name or alias
    pub fn normalize(&self, name: &str) -> Option<&UnitDefinition> {
        let key = name.trim().to_lowercase();
        self.index.get(&key).map(|&i| &self.units[i])
    }

    /// Resolve a caller's unit name; never fails
    ///
    /// Known names keep the caller's spelling in `name`. Unknown names become
    /// an `Other` placeholder, an empty name the "no unit" sentinel.
    pub fn resolve(&self, name: &str, integer_protected: bool) -> UnitDefinition {
        let mut def = if name.trim().is_empty() {
            UnitDefinition::none()
        } else {
            match self.normalize(name) {
                Some(def) => def.clone(),
                None => UnitDefinition::unknown(name),
            }
        };
        if !def.is_none() {
            def.name = name.trim().to_string();
        }
        def.integer_protected = integer_protected;
        def
    }

    /// All units of one type, in registration order
    pub fn units_of(&self, kind: UnitType) -> Vec<&UnitDefinition> {
        self.units.iter().filter(|u| u.kind == kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn register(&mut self, def: UnitDefinition) {
        let i = self.units.len();
        self.index.insert(def.key.to_lowercase(), i);
        for alias in &def.aliases {
            self.index.insert(alias.to_lowercase(), i);
        }
        self.units.push(def);
    }

    fn register_mass_units(&mut self) {
        use UnitSystem::*;
        let mass = |key, system, factor| UnitDefinition::new(key, UnitType::Mass, system, factor);

        // Metric
        self.register(mass("mg", Metric, Number::from_decimal_parts(1, 3))
            .aliases(&["milligram", "milligrams"]));
        self.register(mass("g", Metric, Number::from_i64(1))
            .aliases(&["gram", "grams", "gr", "gramme", "grammes"]));
        self.register(mass("kg", Metric, Number::from_i64(1000))
            .aliases(&["kilogram", "kilograms", "kilo", "kilos"]));

        // US customary
        self.register(mass("oz", US, Number::from_decimal_parts(283495, 4))
            .aliases(&["ounce", "ounces"])
            .max_value(15.0)
            .fractions(&[2, 4], 2));
        self.register(mass("lb", US, Number::from_decimal_parts(453592, 3))
            .aliases(&["lbs", "pound", "pounds"])
            .max_value(99.0)
            .fractions(&[2, 4], 2));

        // Imperial
        self.register(mass("stone", UK, Number::from_decimal_parts(635029, 2))
            .aliases(&["st", "stones"])
            .not_best());

        // Japanese
        self.register(mass("monme", JP, Number::from_decimal_parts(375, 2))
            .aliases(&["匁"]));
    }

    fn register_volume_units(&mut self) {
        use UnitSystem::*;
        let volume = |key, system, factor| UnitDefinition::new(key, UnitType::Volume, system, factor);

        // Metric
        self.register(volume("ml", Metric, Number::from_i64(1))
            .aliases(&["milliliter", "milliliters", "millilitre", "millilitres"]));
        self.register(volume("cl", Metric, Number::from_i64(10))
            .aliases(&["centiliter", "centiliters", "centilitre", "centilitres"])
            .not_best());
        self.register(volume("dl", Metric, Number::from_i64(100))
            .aliases(&["deciliter", "deciliters", "decilitre", "decilitres"])
            .not_best());
        self.register(volume("l", Metric, Number::from_i64(1000))
            .aliases(&["liter", "liters", "litre", "litres"]));
        self.register(volume("metric cup", Metric, Number::from_i64(250))
            .aliases(&["metric cups"])
            .fractions(&[2, 4], 2)
            .not_best());

        // Spoons are sized by the system in use
        self.register(volume("tsp", Ambiguous, Number::from_i64(5))
            .aliases(&["teaspoon", "teaspoons", "tsps"])
            .by_system(US, Number::from_decimal_parts(492892, 5))
            .by_system(UK, Number::from_decimal_parts(591939, 5))
            .by_system(Metric, Number::from_i64(5))
            .by_system(JP, Number::from_i64(5))
            .max_value(5.0)
            .fractions(&[2, 3, 4, 8], 5));
        self.register(volume("tbsp", Ambiguous, Number::from_i64(15))
            .aliases(&["tablespoon", "tablespoons", "tbs", "tbl", "tbsps"])
            .by_system(US, Number::from_decimal_parts(147868, 4))
            .by_system(UK, Number::from_decimal_parts(177582, 4))
            .by_system(Metric, Number::from_i64(15))
            .by_system(JP, Number::from_i64(15))
            .max_value(4.0)
            .fractions(&[2, 3, 4], 4));

        // US customary
        self.register(volume("fl oz", US, Number::from_decimal_parts(295735, 4))
            .aliases(&["fl-oz", "floz", "fluid ounce", "fluid ounces"])
            .max_value(31.0)
            .fractions(&[2], 1));
        self.register(volume("cup", US, Number::from_decimal_parts(236588, 3))
            .aliases(&["cups", "c", "us cup", "us cups"])
            .max_value(15.0)
            .fractions(&[2, 3, 4, 8], 15));
        self.register(volume("pint", US, Number::from_decimal_parts(473176, 3))
            .aliases(&["pints", "pt", "us pint", "us pints"])
            .max_value(7.0)
            .fractions(&[2, 4], 7));
        self.register(volume("quart", US, Number::from_decimal_parts(946353, 3))
            .aliases(&["quarts", "qt", "us quart", "us quarts"])
            .max_value(3.0)
            .fractions(&[2, 4], 3));
        self.register(volume("gallon", US, Number::from_decimal_parts(378541, 2))
            .aliases(&["gallons", "gal", "us gallon", "us gallons"])
            .fractions(&[2, 4], 9));

        // Imperial
        self.register(volume("dessertspoon", UK, Number::from_i64(10))
            .aliases(&["dessertspoons", "dsp", "dstspn"])
            .not_best());
        self.register(volume("uk fl oz", UK, Number::from_decimal_parts(284131, 4))
            .aliases(&["uk fl-oz", "imperial fluid ounce", "imperial fluid ounces"])
            .max_value(39.0)
            .fractions(&[2], 1));
        self.register(volume("uk cup", UK, Number::from_decimal_parts(284131, 3))
            .aliases(&["uk cups", "imperial cup", "imperial cups"])
            .max_value(15.0)
            .fractions(&[2, 3, 4], 15));
        self.register(volume("uk pint", UK, Number::from_decimal_parts(568261, 3))
            .aliases(&["uk pints", "imperial pint", "imperial pints"])
            .max_value(7.0)
            .fractions(&[2, 4], 7));
        self.register(volume("uk quart", UK, Number::from_decimal_parts(113652, 2))
            .aliases(&["uk quarts", "imperial quart", "imperial quarts"])
            .max_value(3.0)
            .fractions(&[2, 4], 3));
        self.register(volume("uk gallon", UK, Number::from_decimal_parts(454609, 2))
            .aliases(&["uk gallons", "imperial gallon", "imperial gallons"])
            .fractions(&[2, 4], 9));

        // Japanese
        self.register(volume("jp cup", JP, Number::from_i64(200))
            .aliases(&["jp cups", "japanese cup", "japanese cups"])
            .max_value(15.0)
            .fractions(&[2, 3, 4], 15));
        self.register(volume("go", JP, Number::from_decimal_parts(18039, 2))
            .aliases(&["合"])
            .max_value(10.0)
            .fractions(&[2], 10));
    }

    fn register_count_units(&mut self) {
        let count = |key, factor| UnitDefinition::new(key, UnitType::Count, UnitSystem::Ambiguous, factor);

        self.register(count("piece", Number::from_i64(1))
            .aliases(&["pieces", "pc", "pcs"]));
        self.register(count("dozen", Number::from_i64(12))
            .aliases(&["dozens", "dz"])
            .max_value(99.0)
            .fractions(&[2], 99));
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::bundled()
    }
}
