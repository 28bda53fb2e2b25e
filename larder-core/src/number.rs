//! Exact rational numbers using dashu
//!
//! Uses dashu-ratio (RBig) so that scaling factors such as 1/3 and unit
//! conversion ratios never pick up floating point tails. Values only leave
//! the exact domain when they are rendered or handed back as `f64`.

use dashu_base::Approximation;
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Arbitrary precision rational number
///
/// All operations return Results or new Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: RBig,
}

impl Number {
    // ========== Construction ==========

    /// Zero
    pub fn zero() -> Self {
        Self { inner: RBig::ZERO }
    }

    /// One
    pub fn one() -> Self {
        Self { inner: RBig::ONE }
    }

    /// Create from i64
    pub fn from_i64(n: i64) -> Self {
        Self { inner: RBig::from(IBig::from(n)) }
    }

    /// Create from ratio (exact division, reduced to lowest terms)
    pub fn from_ratio(num: i64, den: i64) -> Result<Self, NumberError> {
        if den == 0 {
            return Err(NumberError::DivisionByZero);
        }
        let numerator = if den < 0 { -IBig::from(num) } else { IBig::from(num) };
        let denominator = UBig::from(den.unsigned_abs());
        Ok(Self { inner: RBig::from_parts(numerator, denominator) })
    }

    /// Exact decimal `significand * 10^-places`, e.g. (236588, 3) is 236.588
    pub fn from_decimal_parts(significand: i64, places: u32) -> Self {
        Self { inner: RBig::from(IBig::from(significand)) / Self::pow10(places) }
    }

    /// Create from f64 using its shortest decimal representation
    ///
    /// `0.1` becomes exactly 1/10 rather than the binary expansion of the
    /// float. NaN and infinities become zero.
    pub fn from_f64(f: f64) -> Self {
        if !f.is_finite() {
            return Self::zero();
        }
        // Display for f64 never uses exponent notation
        Self::parse_decimal(&format!("{}", f)).unwrap_or_else(|_| Self::zero())
    }

    /// Create from string representation
    /// Supports: "123", "3.14", "-0.5", "1/3", "1.5/2"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        if let Some((num_str, den_str)) = s.split_once('/') {
            let num = Self::parse_decimal(num_str.trim())
                .map_err(|_| NumberError::ParseError(s.to_string()))?;
            let den = Self::parse_decimal(den_str.trim())
                .map_err(|_| NumberError::ParseError(s.to_string()))?;
            return num.checked_div(&den);
        }

        Self::parse_decimal(s)
    }

    fn parse_decimal(s: &str) -> Result<Self, NumberError> {
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if frac_part.starts_with(['-', '+']) || (int_part.is_empty() && frac_part.is_empty()) {
            return Err(NumberError::ParseError(s.to_string()));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let significand: IBig = digits
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        let mut denominator = UBig::ONE;
        for _ in 0..frac_part.len() {
            denominator = denominator * UBig::from(10u8);
        }

        Ok(Self { inner: RBig::from_parts(significand, denominator) })
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == RBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < RBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        self.inner.is_int()
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Reciprocal (1/x)
    pub fn recip(&self) -> Result<Self, NumberError> {
        Self::one().checked_div(self)
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            Self { inner: -self.inner.clone() }
        } else {
            self.clone()
        }
    }

    /// Round half away from zero to `places` decimal places, exactly
    pub fn round_to(&self, places: u32) -> Self {
        let scale = Self::pow10(places);
        let scaled = &self.inner * &scale;

        let num = scaled.numerator().clone();
        let den = IBig::from(scaled.denominator().clone());
        let two = IBig::from(2);
        let bias = if num < IBig::ZERO { -den.clone() } else { den.clone() };
        let rounded = (&num * &two + bias) / (&den * &two);

        Self { inner: RBig::from(rounded) / scale }
    }

    fn pow10(places: u32) -> RBig {
        let mut den = UBig::ONE;
        for _ in 0..places {
            den = den * UBig::from(10u8);
        }
        RBig::from(den)
    }

    // ========== Conversion ==========

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> f64 {
        match self.inner.to_f64() {
            Approximation::Exact(v) => v,
            Approximation::Inexact(v, _) => v,
        }
    }

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        i64::try_from(self.inner.numerator().clone()).ok()
    }

    /// Numerator and denominator in lowest terms, if both fit in i64.
    /// The denominator is always positive.
    pub fn to_fraction(&self) -> Option<(i64, i64)> {
        let num = i64::try_from(self.inner.numerator().clone()).ok()?;
        let den = u64::try_from(self.inner.denominator().clone()).ok()?;
        let den = i64::try_from(den).ok()?;
        Some((num, den))
    }

    // ========== Display ==========

    /// Render as decimal string with specified decimal places
    pub fn as_decimal(&self, places: u32) -> String {
        format!("{:.prec$}", self.to_f64(), prec = places as usize)
    }

    /// Render as "n" or "n/d"
    pub fn as_ratio(&self) -> String {
        if self.is_integer() {
            format!("{}", self.inner.numerator())
        } else {
            format!("{}/{}", self.inner.numerator(), self.inner.denominator())
        }
    }
}

// ========== Trait Implementations ==========

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.inner.numerator())
        } else {
            write!(f, "{}", self.to_f64())
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_ratio())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner
            .partial_cmp(&other.inner)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}
