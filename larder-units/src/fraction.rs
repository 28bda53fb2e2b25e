//! Display policy for showing small amounts as simple fractions

use serde::{Deserialize, Serialize};

/// Relative error allowed when approximating a value by a fraction
pub const DEFAULT_ACCURACY: f64 = 0.05;

/// Whether and how a unit's values may be shown as `whole num/den`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionsPolicy {
    pub enabled: bool,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    /// Allowed denominators, tried in order
    #[serde(default)]
    pub denominators: Vec<u32>,
    /// Largest whole part still shown as a mixed number
    #[serde(default)]
    pub max_whole: u32,
}

fn default_accuracy() -> f64 {
    DEFAULT_ACCURACY
}

impl FractionsPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            accuracy: DEFAULT_ACCURACY,
            denominators: Vec::new(),
            max_whole: 0,
        }
    }

    pub fn new(denominators: &[u32], max_whole: u32) -> Self {
        Self {
            enabled: true,
            accuracy: DEFAULT_ACCURACY,
            denominators: denominators.to_vec(),
            max_whole,
        }
    }
}

impl Default for FractionsPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Approximate `value` as `whole + num/den`
///
/// Returns `None` when fractions are disabled, the whole part exceeds the
/// policy's limit, or no allowed denominator lands within `accuracy`.
/// A whole number comes back as `(whole, 0, 1)`.
pub fn approximate_fraction(value: f64, policy: &FractionsPolicy) -> Option<(u32, u32, u32)> {
    if !policy.enabled || !value.is_finite() || value <= 0.0 {
        return None;
    }

    let whole = value.trunc();
    if whole > policy.max_whole as f64 {
        return None;
    }
    let rest = value - whole;

    for &den in &policy.denominators {
        if den == 0 {
            continue;
        }
        let num = (rest * den as f64).round();
        let approx = whole + num / den as f64;
        if approx <= 0.0 {
            continue;
        }
        if ((approx - value) / value).abs() > policy.accuracy {
            continue;
        }

        let (whole, num) = (whole as u32, num as u32);
        return Some(if num == 0 {
            (whole, 0, 1)
        } else if num == den {
            (whole + 1, 0, 1)
        } else {
            let g = gcd(num, den);
            (whole, num / g, den / g)
        });
    }
    None
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}
