//! Errors raised while combining quantities
//!
//! Two kinds are recoverable: a caller that hits `CannotAddTextValue` or
//! `IncompatibleUnits` should list the offending mentions separately instead
//! of failing the whole computation.

use crate::NumberError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const TEXT_VALUE: &str = "TEXT_VALUE";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const INVALID_FACTOR: &str = "INVALID_FACTOR";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// This combination failed, others may proceed
    Error,
    /// Malformed input, nothing sensible can be produced
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Cannot add text value '{0}'")]
    CannotAddTextValue(String),

    #[error("Incompatible units: '{left}' and '{right}'")]
    IncompatibleUnits { left: String, right: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid scaling factor: {0}")]
    InvalidFactor(String),
}

impl QuantityError {
    pub fn incompatible(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::IncompatibleUnits {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::DivisionByZero => codes::DIV_ZERO,
            Self::CannotAddTextValue(_) => codes::TEXT_VALUE,
            Self::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
            Self::Parse(_) => codes::PARSE_ERROR,
            Self::InvalidFactor(_) => codes::INVALID_FACTOR,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::DivisionByZero | Self::Parse(_) | Self::InvalidFactor(_) => Severity::Fatal,
            Self::CannotAddTextValue(_) | Self::IncompatibleUnits { .. } => Severity::Error,
        }
    }

    /// True when the caller should degrade to listing items separately
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CannotAddTextValue(_) | Self::IncompatibleUnits { .. }
        )
    }
}

impl From<NumberError> for QuantityError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::DivisionByZero => Self::DivisionByZero,
            NumberError::ParseError(s) => Self::Parse(s),
        }
    }
}
