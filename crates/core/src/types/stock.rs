//! Stock level (units on hand).

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::numeric::{NumericError, NumericValue};

/// A non-negative whole number of units on hand.
///
/// Deserializes from JSON numbers or numeric strings. Fractional input is
/// rejected rather than truncated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "NumericValue", into = "u32")]
pub struct Stock(u32);

impl Stock {
    /// Zero units.
    pub const ZERO: Self = Self(0);

    /// Create a stock level from a unit count.
    #[must_use]
    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    /// Get the unit count.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Stock {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(NumericValue::from(s))
    }
}

impl TryFrom<NumericValue> for Stock {
    type Error = NumericError;

    fn try_from(value: NumericValue) -> Result<Self, Self::Error> {
        let amount = value.to_decimal()?;
        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(NumericError::Negative(format!("stock {value}")));
        }
        if amount.fract() != Decimal::ZERO {
            return Err(NumericError::Fractional(format!("stock {value}")));
        }
        amount
            .to_u32()
            .map(Self)
            .ok_or_else(|| NumericError::OutOfRange(format!("stock {value}")))
    }
}

impl From<u32> for Stock {
    fn from(units: u32) -> Self {
        Self(units)
    }
}

impl From<Stock> for u32 {
    fn from(stock: Stock) -> Self {
        stock.0
    }
}

impl From<Stock> for i64 {
    fn from(stock: Stock) -> Self {
        Self::from(stock.0)
    }
}
