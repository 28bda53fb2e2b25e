//! Common kitchen utilities

use larder_core::{Number, QuantityError};

/// Normalize ingredient name (trim, standardize separators, optionally lowercase)
pub fn normalize_ingredient(name: &str, case_insensitive: bool) -> String {
    let name = name
        .trim()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if case_insensitive {
        name.to_lowercase()
    } else {
        name
    }
}

/// Validate positive number
pub fn validate_positive(value: &Number, what: &str) -> Result<(), QuantityError> {
    if value.is_negative() || value.is_zero() {
        return Err(QuantityError::InvalidFactor(format!(
            "{} must be positive, got {}",
            what, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::codes;

    #[test]
    fn test_normalize_ingredient() {
        assert_eq!(normalize_ingredient("All-Purpose Flour", true), "all purpose flour");
        assert_eq!(normalize_ingredient("  brown_sugar  ", true), "brown sugar");
        assert_eq!(normalize_ingredient("BUTTER", true), "butter");
        assert_eq!(normalize_ingredient("Egg  Yolk", false), "Egg Yolk");
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(&Number::from_i64(2), "servings").is_ok());

        let err = validate_positive(&Number::zero(), "servings").unwrap_err();
        assert_eq!(err.code(), codes::INVALID_FACTOR);
        assert!(err.to_string().contains("servings must be positive"));

        assert!(validate_positive(&Number::from_i64(-1), "batches").is_err());
    }
}
