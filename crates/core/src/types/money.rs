//! Non-negative monetary amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
    /// The floating point input was NaN or infinite.
    #[error("amount is not a finite number")]
    NotFinite,
}

/// An order total in the store's single currency.
///
/// Always non-negative. Displayed with two decimal places and a `$` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create an amount from the JSON number the store returns.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NotFinite` for NaN or infinity and
    /// `MoneyError::Negative` for values below zero.
    pub fn from_f64(amount: f64) -> Result<Self, MoneyError> {
        let decimal = Decimal::from_f64_retain(amount).ok_or(MoneyError::NotFinite)?;
        Self::new(decimal.round_dp(2).normalize())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Money::new(Decimal::new(-1, 2)),
            Err(MoneyError::Negative(_))
        ));
        assert!(Money::from_f64(-3.5).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(Money::from_f64(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(Money::from_f64(f64::INFINITY), Err(MoneyError::NotFinite));
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Money::from_f64(42.5).unwrap().to_string(), "$42.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_f64(19.999).unwrap().to_string(), "$20.00");
    }
}
