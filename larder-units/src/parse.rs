//! Parsing raw amount and unit strings
//!
//! The markup parser hands over amounts and units as it found them in the
//! recipe text. Amounts may be:
//! - Decimals: "1.5", "0.25"
//! - Fractions: "1/2", mixed "1 1/2"
//! - Ranges: "1-2", "1/2 - 3/4"
//! - Anything else is kept as text ("a pinch", "to taste")
//!
//! A leading `=` on a unit pins it: "=large".

use larder_core::{simplify_fraction, Number, NumericValue, QuantityError, QuantityValue};
use crate::{Quantity, Unit};

/// Parse an amount string
///
/// Only malformed fractions fail (`"1/0"`); text is a valid value.
pub fn parse_value(s: &str) -> Result<QuantityValue, QuantityError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(QuantityError::Parse("empty amount".to_string()));
    }

    // The first '-' past position 0 separates a range
    if let Some(pos) = s.char_indices().skip(1).find(|&(_, c)| c == '-').map(|(i, _)| i) {
        let (lo, hi) = (s[..pos].trim(), s[pos + 1..].trim());
        if let (Some(min), Some(max)) = (parse_number(lo)?, parse_number(hi)?) {
            return Ok(QuantityValue::Range { min, max });
        }
    }

    Ok(match parse_number(s)? {
        Some(n) => QuantityValue::Fixed { value: n },
        None => QuantityValue::text(s),
    })
}

/// A single numeric amount, `None` if `s` is not numeric
fn parse_number(s: &str) -> Result<Option<NumericValue>, QuantityError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    match parts.as_slice() {
        [single] => parse_simple(single),
        [whole, frac] if frac.contains('/') => {
            let (Ok(whole), Some(frac)) = (whole.parse::<i64>(), parse_simple(frac)?) else {
                return Ok(None);
            };
            let total = Number::from_i64(whole).add(&frac.to_number()?);
            Ok(Some(NumericValue::from_number(&total)))
        }
        _ => Ok(None),
    }
}

fn parse_simple(s: &str) -> Result<Option<NumericValue>, QuantityError> {
    if let Some((num, den)) = s.split_once('/') {
        return match (num.trim().parse::<i64>(), den.trim().parse::<i64>()) {
            (Ok(num), Ok(den)) => simplify_fraction(num, den).map(Some),
            _ => Ok(None),
        };
    }
    let numeric = s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+');
    match s.parse::<f64>() {
        Ok(d) if numeric && d.is_finite() => Ok(Some(NumericValue::Decimal(d))),
        _ => Ok(None),
    }
}

/// Parse a unit string; empty means no unit
pub fn parse_unit(s: &str) -> Option<Unit> {
    let s = s.trim();
    let (name, integer_protected) = match s.strip_prefix('=') {
        Some(rest) => (rest.trim(), true),
        None => (s, false),
    };
    if name.is_empty() {
        return None;
    }
    Some(Unit {
        name: name.to_string(),
        integer_protected,
    })
}

/// Parse an amount and a unit into a quantity
pub fn parse_quantity(amount: &str, unit: &str) -> Result<Quantity, QuantityError> {
    Ok(Quantity::new(parse_value(amount)?, parse_unit(unit)))
}
