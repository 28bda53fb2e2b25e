//! Quantity values: exact fractions, decimals, ranges and free text
//!
//! Text is a leaf. It can be carried around and displayed but never takes
//! part in arithmetic.

use crate::{Number, QuantityError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Places kept when a scaled value has to leave the exact domain
pub const SCALE_DECIMAL_PLACES: u32 = 3;

/// A single amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum NumericValue {
    Decimal(f64),
    Fraction { num: i64, den: i64 },
    Text(String),
}

/// Representative scalar of a value, for ratio math
#[derive(Debug, Clone, PartialEq)]
pub enum AverageValue {
    Number(Number),
    Text(String),
}

impl AverageValue {
    pub fn number(&self) -> Option<&Number> {
        match self {
            AverageValue::Number(n) => Some(n),
            AverageValue::Text(_) => None,
        }
    }
}

impl NumericValue {
    /// Lowest-terms representation of an exact number: integers become
    /// `Decimal`, anything else a `Fraction` when it fits in i64.
    pub fn from_number(n: &Number) -> Self {
        if n.is_integer() {
            return NumericValue::Decimal(n.to_f64());
        }
        match n.to_fraction() {
            Some((num, den)) => NumericValue::Fraction { num, den },
            None => NumericValue::Decimal(n.to_f64()),
        }
    }

    /// Exact value. Text cannot be converted.
    pub fn to_number(&self) -> Result<Number, QuantityError> {
        match self {
            NumericValue::Decimal(d) => Ok(Number::from_f64(*d)),
            NumericValue::Fraction { num, den } => Ok(Number::from_ratio(*num, *den)?),
            NumericValue::Text(t) => Err(QuantityError::CannotAddTextValue(t.clone())),
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Decimal(d) => Some(*d),
            NumericValue::Fraction { num, den } if *den != 0 => Some(*num as f64 / *den as f64),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NumericValue::Text(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            NumericValue::Decimal(d) => *d == 0.0,
            NumericValue::Fraction { num, den } => *num == 0 && *den != 0,
            NumericValue::Text(_) => false,
        }
    }

    /// Whole number check. Text is never integer-like.
    pub fn is_integer_like(&self) -> bool {
        match self {
            NumericValue::Decimal(d) => d.is_finite() && d.fract() == 0.0,
            NumericValue::Fraction { num, den } => num.checked_rem(*den) == Some(0),
            NumericValue::Text(_) => false,
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Decimal(d) => write!(f, "{}", d),
            NumericValue::Fraction { num, den } => write!(f, "{}/{}", num, den),
            NumericValue::Text(t) => write!(f, "{}", t),
        }
    }
}

impl From<f64> for NumericValue {
    fn from(d: f64) -> Self {
        NumericValue::Decimal(d)
    }
}

impl From<&str> for NumericValue {
    fn from(s: &str) -> Self {
        NumericValue::Text(s.to_string())
    }
}

/// Reduce `num/den` by their gcd with a positive denominator.
/// Whole results come back as `Decimal`.
pub fn simplify_fraction(num: i64, den: i64) -> Result<NumericValue, QuantityError> {
    let n = Number::from_ratio(num, den)?;
    Ok(NumericValue::from_number(&n))
}

/// Add two scalars
///
/// The sum stays an exact fraction only when both sides are fractions, or
/// one side is a zero decimal. Every other combination is a decimal.
pub fn add_numeric_values(a: &NumericValue, b: &NumericValue) -> Result<NumericValue, QuantityError> {
    use NumericValue::*;

    match (a, b) {
        (Text(t), _) | (_, Text(t)) => Err(QuantityError::CannotAddTextValue(t.clone())),
        (Fraction { .. }, Fraction { .. }) => {
            let sum = a.to_number()?.add(&b.to_number()?);
            Ok(NumericValue::from_number(&sum))
        }
        (Decimal(z), Fraction { num, den }) | (Fraction { num, den }, Decimal(z)) if *z == 0.0 => {
            simplify_fraction(*num, *den)
        }
        _ => {
            let sum = a.to_number()?.add(&b.to_number()?);
            Ok(Decimal(sum.to_f64()))
        }
    }
}

/// Scale a scalar. Decimals stay decimals, fractions are re-simplified.
/// Text is returned unchanged.
pub fn multiply_numeric_value(v: &NumericValue, factor: &Number) -> NumericValue {
    match v {
        NumericValue::Decimal(d) => {
            NumericValue::Decimal(Number::from_f64(*d).mul(factor).to_f64())
        }
        NumericValue::Fraction { num, den } => match Number::from_ratio(*num, *den) {
            Ok(n) => NumericValue::from_number(&n.mul(factor)),
            Err(_) => v.clone(),
        },
        NumericValue::Text(_) => v.clone(),
    }
}

/// A point amount or an inclusive span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuantityValue {
    Fixed { value: NumericValue },
    Range { min: NumericValue, max: NumericValue },
}

impl QuantityValue {
    pub fn fixed(value: impl Into<NumericValue>) -> Self {
        QuantityValue::Fixed { value: value.into() }
    }

    pub fn decimal(d: f64) -> Self {
        QuantityValue::Fixed { value: NumericValue::Decimal(d) }
    }

    /// Fixed fraction, simplified. A zero denominator is an error.
    pub fn fraction(num: i64, den: i64) -> Result<Self, QuantityError> {
        Ok(QuantityValue::Fixed { value: simplify_fraction(num, den)? })
    }

    pub fn text(s: impl Into<String>) -> Self {
        QuantityValue::Fixed { value: NumericValue::Text(s.into()) }
    }

    pub fn range(min: impl Into<NumericValue>, max: impl Into<NumericValue>) -> Self {
        QuantityValue::Range { min: min.into(), max: max.into() }
    }

    pub fn zero() -> Self {
        Self::decimal(0.0)
    }

    /// Lower and upper bound; a fixed value is a degenerate range
    pub fn bounds(&self) -> (&NumericValue, &NumericValue) {
        match self {
            QuantityValue::Fixed { value } => (value, value),
            QuantityValue::Range { min, max } => (min, max),
        }
    }

    pub fn is_text(&self) -> bool {
        let (min, max) = self.bounds();
        min.is_text() || max.is_text()
    }

    pub fn is_integer_like(&self) -> bool {
        let (min, max) = self.bounds();
        min.is_integer_like() && max.is_integer_like()
    }

    /// Fixed value as-is, midpoint of a range
    pub fn average_value(&self) -> AverageValue {
        match self {
            QuantityValue::Fixed { value: NumericValue::Text(t) } => AverageValue::Text(t.clone()),
            QuantityValue::Fixed { value } => match value.to_number() {
                Ok(n) => AverageValue::Number(n),
                Err(_) => AverageValue::Text(value.to_string()),
            },
            QuantityValue::Range { min, max } => match (min.to_number(), max.to_number()) {
                (Ok(lo), Ok(hi)) => {
                    let two = Number::from_i64(2);
                    match lo.add(&hi).checked_div(&two) {
                        Ok(mid) => AverageValue::Number(mid),
                        Err(_) => AverageValue::Text(self.to_string()),
                    }
                }
                _ => AverageValue::Text(self.to_string()),
            },
        }
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Fixed { value } => write!(f, "{}", value),
            QuantityValue::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

/// Add two quantity values. Mixing a fixed value with a range widens the
/// fixed value to `[v, v]`.
pub fn add_quantity_values(a: &QuantityValue, b: &QuantityValue) -> Result<QuantityValue, QuantityError> {
    match (a, b) {
        (QuantityValue::Fixed { value: x }, QuantityValue::Fixed { value: y }) => {
            Ok(QuantityValue::Fixed { value: add_numeric_values(x, y)? })
        }
        _ => {
            let (a_min, a_max) = a.bounds();
            let (b_min, b_max) = b.bounds();
            Ok(QuantityValue::Range {
                min: add_numeric_values(a_min, b_min)?,
                max: add_numeric_values(a_max, b_max)?,
            })
        }
    }
}

/// Scale a quantity value
///
/// A fixed fraction keeps its exact form only when the factor or its
/// reciprocal is a whole number; otherwise the product is rounded to
/// `SCALE_DECIMAL_PLACES`. Range bounds are scaled independently.
pub fn multiply_quantity_value(v: &QuantityValue, factor: &Number) -> QuantityValue {
    match v {
        QuantityValue::Fixed { value } => {
            if value.is_text() {
                return v.clone();
            }
            let whole_ratio = factor.is_integer()
                || factor.recip().map(|r| r.is_integer()).unwrap_or(false);
            if whole_ratio {
                return QuantityValue::Fixed { value: multiply_numeric_value(value, factor) };
            }
            match value.to_number() {
                Ok(n) => {
                    let scaled = n.mul(factor).round_to(SCALE_DECIMAL_PLACES);
                    QuantityValue::Fixed { value: NumericValue::Decimal(scaled.to_f64()) }
                }
                Err(_) => v.clone(),
            }
        }
        QuantityValue::Range { min, max } => QuantityValue::Range {
            min: multiply_numeric_value(min, factor),
            max: multiply_numeric_value(max, factor),
        },
    }
}
