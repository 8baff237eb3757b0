//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Mul;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount in the store currency.
///
/// Cart math uses decimal arithmetic throughout; floats never enter the
/// money path. Construction and deserialization reject negative amounts.
///
/// ## Examples
///
/// ```
/// use glow_beauty_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(2999, 2)).unwrap();
/// assert_eq!(price.to_string(), "$29.99");
///
/// assert!(Price::new(Decimal::from(-1)).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// The zero price (empty cart total).
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Whole-unit prices are always in range.
impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

/// A line total: unit price times quantity.
impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

/// Sum of non-negative prices is non-negative, so summing stays in the type.
impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|price| price.0).sum())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
