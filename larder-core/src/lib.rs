//! Larder Core - Fundamental types
//!
//! This crate provides the core types used throughout Larder:
//! - `Number`: Exact rational numbers for scaling and conversion ratios
//! - `NumericValue` / `QuantityValue`: Amounts as written in a recipe
//! - `QuantityError`: Errors raised while combining amounts

mod number;
mod value;
mod error;

pub use number::{Number, NumberError};
pub use value::{
    add_numeric_values, add_quantity_values, multiply_numeric_value, multiply_quantity_value,
    simplify_fraction, AverageValue, NumericValue, QuantityValue, SCALE_DECIMAL_PLACES,
};
pub use error::{codes, QuantityError, Severity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumericValue, QuantityError, QuantityValue};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_i64(), Some(42));
        }

        #[test]
        fn test_from_str_decimal() {
            let n = Number::from_str("3.14").unwrap();
            assert!(!n.is_integer());
            assert_eq!(n, Number::from_ratio(157, 50).unwrap());
        }

        #[test]
        fn test_from_str_fraction() {
            let n = Number::from_str("1/3").unwrap();
            assert!(!n.is_integer());
            assert_eq!(n.to_fraction(), Some((1, 3)));
        }

        #[test]
        fn test_from_str_invalid() {
            assert!(Number::from_str("abc").is_err());
            assert!(Number::from_str("1.-2").is_err());
            assert_eq!(Number::from_str("1/0"), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_from_f64_is_decimal_exact() {
            // 0.1 is 1/10, not the nearest binary float
            assert_eq!(Number::from_f64(0.1), Number::from_ratio(1, 10).unwrap());
            assert_eq!(Number::from_f64(236.588), Number::from_str("236.588").unwrap());
            assert!(Number::from_f64(f64::NAN).is_zero());
        }

        #[test]
        fn test_from_decimal_parts() {
            let cup = Number::from_decimal_parts(236588, 3);
            assert_eq!(cup, Number::from_str("236.588").unwrap());
            assert_eq!(Number::from_decimal_parts(5, 0), Number::from_i64(5));
        }

        #[test]
        fn test_from_ratio_normalizes_sign() {
            let n = Number::from_ratio(2, -4).unwrap();
            assert_eq!(n.to_fraction(), Some((-1, 2)));
            assert!(n.is_negative());
        }

        #[test]
        fn test_third_times_three_is_exact() {
            let third = Number::from_ratio(1, 3).unwrap();
            let one = third.mul(&Number::from_i64(3));
            assert!(one.is_integer());
            assert_eq!(one.to_i64(), Some(1));
        }

        #[test]
        fn test_div_by_zero() {
            let a = Number::from_i64(42);
            assert!(a.checked_div(&Number::zero()).is_err());
            assert!(Number::zero().recip().is_err());
        }

        #[test]
        fn test_round_to() {
            let n = Number::from_ratio(2, 3).unwrap();
            assert_eq!(n.round_to(3), Number::from_str("0.667").unwrap());

            let neg = Number::from_str("-1.2345").unwrap();
            assert_eq!(neg.round_to(3), Number::from_str("-1.235").unwrap());

            let half = Number::from_str("2.5").unwrap();
            assert_eq!(half.round_to(0), Number::from_i64(3));
        }

        #[test]
        fn test_display_and_ratio() {
            assert_eq!(Number::from_i64(7).to_string(), "7");
            assert_eq!(Number::from_str("0.25").unwrap().to_string(), "0.25");
            assert_eq!(Number::from_ratio(3, 4).unwrap().as_ratio(), "3/4");
        }

        #[test]
        fn test_ordering() {
            let a = Number::from_ratio(1, 3).unwrap();
            let b = Number::from_str("0.34").unwrap();
            assert!(a < b);
            assert_eq!(a.abs(), a);
            assert_eq!(Number::from_i64(-2).abs(), Number::from_i64(2));
        }
    }

    mod value_tests {
        use super::*;

        fn frac(num: i64, den: i64) -> NumericValue {
            NumericValue::Fraction { num, den }
        }

        #[test]
        fn test_simplify_fraction() {
            assert_eq!(simplify_fraction(6, 3).unwrap(), NumericValue::Decimal(2.0));
            assert_eq!(simplify_fraction(2, 4).unwrap(), frac(1, 2));
            assert_eq!(simplify_fraction(3, -9).unwrap(), frac(-1, 3));
        }

        #[test]
        fn test_simplify_fraction_zero_denominator() {
            assert_eq!(simplify_fraction(1, 0), Err(QuantityError::DivisionByZero));
        }

        #[test]
        fn test_add_fractions_stays_exact() {
            let sum = add_numeric_values(&frac(1, 3), &frac(1, 6)).unwrap();
            assert_eq!(sum, frac(1, 2));

            let whole = add_numeric_values(&frac(1, 2), &frac(1, 2)).unwrap();
            assert_eq!(whole, NumericValue::Decimal(1.0));
        }

        #[test]
        fn test_add_zero_decimal_keeps_fraction() {
            let sum = add_numeric_values(&NumericValue::Decimal(0.0), &frac(2, 6)).unwrap();
            assert_eq!(sum, frac(1, 3));
        }

        #[test]
        fn test_add_decimal_and_fraction_is_decimal() {
            let sum = add_numeric_values(&NumericValue::Decimal(1.0), &frac(1, 4)).unwrap();
            assert_eq!(sum, NumericValue::Decimal(1.25));

            let sum = add_numeric_values(&NumericValue::Decimal(0.1), &NumericValue::Decimal(0.2)).unwrap();
            assert_eq!(sum, NumericValue::Decimal(0.3));
        }

        #[test]
        fn test_add_text_fails() {
            let err = add_numeric_values(&"a pinch".into(), &NumericValue::Decimal(1.0)).unwrap_err();
            assert_eq!(err, QuantityError::CannotAddTextValue("a pinch".to_string()));
            assert!(err.is_recoverable());
        }

        #[test]
        fn test_multiply_numeric_value() {
            let third = Number::from_ratio(1, 3).unwrap();
            assert_eq!(multiply_numeric_value(&frac(3, 4), &third), frac(1, 4));
            assert_eq!(
                multiply_numeric_value(&NumericValue::Decimal(1.5), &Number::from_i64(2)),
                NumericValue::Decimal(3.0)
            );
            assert_eq!(multiply_numeric_value(&"some".into(), &third), NumericValue::from("some"));
        }

        #[test]
        fn test_multiply_quantity_value_keeps_fraction_for_whole_factors() {
            let v = QuantityValue::fixed(frac(1, 3));
            let doubled = multiply_quantity_value(&v, &Number::from_i64(2));
            assert_eq!(doubled, QuantityValue::fixed(frac(2, 3)));

            let halved = multiply_quantity_value(&v, &Number::from_ratio(1, 2).unwrap());
            assert_eq!(halved, QuantityValue::fixed(frac(1, 6)));
        }

        #[test]
        fn test_multiply_quantity_value_rounds_other_factors() {
            let v = QuantityValue::fixed(frac(1, 3));
            let scaled = multiply_quantity_value(&v, &Number::from_ratio(2, 3).unwrap());
            assert_eq!(scaled, QuantityValue::decimal(0.222));

            let cup = Number::from_str("236.588").unwrap();
            let ml = multiply_quantity_value(&QuantityValue::decimal(1.5), &cup);
            assert_eq!(ml, QuantityValue::decimal(354.882));
        }

        #[test]
        fn test_multiply_range_scales_bounds() {
            let v = QuantityValue::range(1.0, 2.0);
            let scaled = multiply_quantity_value(&v, &Number::from_ratio(3, 2).unwrap());
            assert_eq!(scaled, QuantityValue::range(1.5, 3.0));
        }

        #[test]
        fn test_add_quantity_values() {
            let a = QuantityValue::decimal(1.0);
            let b = QuantityValue::decimal(2.0);
            assert_eq!(add_quantity_values(&a, &b).unwrap(), QuantityValue::decimal(3.0));

            let r = QuantityValue::range(1.0, 2.0);
            assert_eq!(add_quantity_values(&a, &r).unwrap(), QuantityValue::range(2.0, 3.0));
        }

        #[test]
        fn test_add_quantity_values_text() {
            let t = QuantityValue::text("to taste");
            assert!(matches!(
                add_quantity_values(&t, &QuantityValue::decimal(1.0)),
                Err(QuantityError::CannotAddTextValue(_))
            ));
        }

        #[test]
        fn test_integer_like() {
            assert!(QuantityValue::decimal(3.0).is_integer_like());
            assert!(!QuantityValue::decimal(2.5).is_integer_like());
            assert!(QuantityValue::fixed(frac(4, 2)).is_integer_like());
            assert!(!QuantityValue::fixed(frac(1, 2)).is_integer_like());
            assert!(QuantityValue::range(1.0, 2.0).is_integer_like());
            assert!(!QuantityValue::range(1.0, 2.5).is_integer_like());
            assert!(!QuantityValue::text("a few").is_integer_like());
        }

        #[test]
        fn test_average_value() {
            let avg = QuantityValue::range(1.0, 2.0).average_value();
            assert_eq!(avg.number(), Some(&Number::from_str("1.5").unwrap()));

            let fixed = QuantityValue::fixed(frac(1, 4)).average_value();
            assert_eq!(fixed.number(), Some(&Number::from_ratio(1, 4).unwrap()));

            let text = QuantityValue::text("a pinch").average_value();
            assert_eq!(text, AverageValue::Text("a pinch".to_string()));
        }

        #[test]
        fn test_display() {
            assert_eq!(QuantityValue::fixed(frac(1, 2)).to_string(), "1/2");
            assert_eq!(QuantityValue::range(1.0, 2.5).to_string(), "1-2.5");
        }

        #[test]
        fn test_serialize_shape() {
            let json = serde_json::to_value(QuantityValue::fixed(frac(1, 2))).unwrap();
            assert_eq!(json["type"], "fixed");
            assert_eq!(json["value"]["type"], "fraction");
            assert_eq!(json["value"]["value"]["den"], 2);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_codes_and_severity() {
            assert_eq!(QuantityError::DivisionByZero.code(), codes::DIV_ZERO);
            assert_eq!(QuantityError::DivisionByZero.severity(), Severity::Fatal);
            assert!(!QuantityError::DivisionByZero.is_recoverable());

            let err = QuantityError::incompatible("kg", "l");
            assert_eq!(err.code(), codes::INCOMPATIBLE_UNITS);
            assert_eq!(err.severity(), Severity::Error);
            assert!(err.is_recoverable());
        }

        #[test]
        fn test_every_error_has_a_severity() {
            let errors = [
                QuantityError::DivisionByZero,
                QuantityError::CannotAddTextValue("a pinch".into()),
                QuantityError::incompatible("kg", "l"),
                QuantityError::Parse("1//2".into()),
                QuantityError::InvalidFactor("0".into()),
            ];
            for err in &errors {
                let expected = if err.is_recoverable() { Severity::Error } else { Severity::Fatal };
                assert_eq!(err.severity(), expected, "{}", err);
            }
            assert_eq!(serde_json::to_value(Severity::Fatal).unwrap(), "fatal");
            let parsed: Severity = serde_json::from_str(r#""error""#).unwrap();
            assert_eq!(parsed, Severity::Error);
            assert!(serde_json::from_str::<Severity>(r#""warning""#).is_err());
        }

        #[test]
        fn test_from_number_error() {
            let err: QuantityError = NumberError::DivisionByZero.into();
            assert_eq!(err, QuantityError::DivisionByZero);
        }

        #[test]
        fn test_error_display() {
            let err = QuantityError::incompatible("kg", "l");
            assert_eq!(err.to_string(), "Incompatible units: 'kg' and 'l'");
        }
    }
}
