//! Loosely-typed numeric input.
//!
//! Product forms hand over prices and stock levels either as JSON numbers or
//! as the raw text the user typed. [`NumericValue`] accepts both so that the
//! stricter [`Price`](super::Price) and [`Stock`](super::Stock) types can
//! coerce them in one place.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when coercing a [`NumericValue`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    /// The input is not a number.
    #[error("'{0}' is not a number")]
    NotANumber(String),
    /// The input is a number but is below zero.
    #[error("{0} must not be negative")]
    Negative(String),
    /// The input has a fractional part where a whole number is required.
    #[error("{0} must be a whole number")]
    Fractional(String),
    /// The input does not fit the target type.
    #[error("{0} is out of range")]
    OutOfRange(String),
}

/// A number as it arrives from user input: integer, float, or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericValue {
    /// Convert to an exact decimal.
    ///
    /// Blank text counts as zero, matching an untouched form field.
    ///
    /// # Errors
    ///
    /// Returns `NumericError::NotANumber` for text that does not parse or for
    /// non-finite floats.
    pub fn to_decimal(&self) -> Result<Decimal, NumericError> {
        match self {
            Self::Integer(value) => Ok(Decimal::from(*value)),
            Self::Float(value) => {
                Decimal::try_from(*value).map_err(|_| NumericError::NotANumber(value.to_string()))
            }
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(Decimal::ZERO);
                }
                trimmed
                    .parse::<Decimal>()
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .map_err(|_| NumericError::NotANumber(text.clone()))
            }
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for NumericValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for NumericValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
