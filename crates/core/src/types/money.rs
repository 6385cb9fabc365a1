//! Monetary amounts using decimal arithmetic.
//!
//! The admin only ever deals in a single store currency, so [`Money`] is a
//! non-negative decimal amount rounded to cents. Formatting always uses a
//! `$` prefix and two decimal places.

use core::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing or constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input is not a decimal number.
    #[error("'{0}' is not a valid amount")]
    Invalid(String),
    /// The amount is below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// The amount is above [`Money::MAX`].
    #[error("amount cannot exceed {}", Money::MAX)]
    TooLarge,
}

/// A non-negative amount of money, rounded to cents.
///
/// Constructed amounts are capped at [`Money::MAX`]. Sums and products
/// saturate instead of overflowing.
///
/// ```
/// use pressroom_core::Money;
///
/// let price = Money::parse("$12.5").unwrap();
/// assert_eq!(price.to_string(), "$12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount accepted from input: $1,000,000,000.00.
    pub const MAX: Self = Self(Decimal::from_parts(1_215_752_192, 23, 0, false, 2));

    /// Create an amount from a decimal, rounding half away from zero to cents.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] for amounts below zero and
    /// [`MoneyError::TooLarge`] for amounts above [`Money::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        if amount > Self::MAX.0 {
            return Err(MoneyError::TooLarge);
        }
        Ok(Self(round_cents(amount)))
    }

    /// Create an amount from whole cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse user input such as `"12"`, `"12.5"` or `"$1,299.00"`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Invalid`] for non-numeric input and
    /// [`MoneyError::Negative`] for amounts below zero.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let cleaned: String = input
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let amount = cleaned
            .parse::<Decimal>()
            .map_err(|_| MoneyError::Invalid(input.trim().to_string()))?;

        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a quantity (e.g. an order line).
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(round_cents(self.0.saturating_mul(Decimal::from(quantity))))
    }

    /// Reduce by a percentage (`percent` in `0..=100`), rounded to cents.
    ///
    /// Percentages outside the range are clamped.
    #[must_use]
    pub fn percent_off(&self, percent: Decimal) -> Self {
        let hundred = Decimal::ONE_HUNDRED;
        let percent = percent.clamp(Decimal::ZERO, hundred);
        Self(round_cents(self.0 * (hundred - percent) / hundred))
    }

    /// Amount as a plain string without the currency symbol (for form inputs).
    #[must_use]
    pub fn to_input_value(&self) -> String {
        format!("{:.2}", self.0)
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
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

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_inputs() {
        assert_eq!(Money::parse("12").unwrap().to_string(), "$12.00");
        assert_eq!(Money::parse(" $12.5 ").unwrap().to_string(), "$12.50");
        assert_eq!(Money::parse("1,299.99").unwrap().to_string(), "$1299.99");
    }

    #[test]
    fn test_parse_rounds_to_cents() {
        assert_eq!(Money::parse("0.125").unwrap().to_input_value(), "0.13");
        assert_eq!(Money::parse("0.124").unwrap().to_input_value(), "0.12");
    }

    #[test]
    fn test_parse_rejects_invalid_and_negative() {
        assert!(matches!(Money::parse("abc"), Err(MoneyError::Invalid(_))));
        assert_eq!(Money::parse("-1"), Err(MoneyError::Negative));
    }

    #[test]
    fn test_rejects_amounts_above_max() {
        assert_eq!(Money::MAX.to_string(), "$1000000000.00");
        assert_eq!(Money::parse("1000000000").unwrap(), Money::MAX);
        assert_eq!(Money::parse("1000000000.01"), Err(MoneyError::TooLarge));
        assert!(serde_json::from_str::<Money>("\"40000000000000000000000000000\"").is_err());
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = std::iter::repeat_n(Money::MAX, 1_000).sum();
        assert!(total > Money::MAX);
        let huge = Money(Decimal::MAX);
        assert_eq!(huge + Money::MAX, huge);
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Money::from_cents(1_250);
        assert_eq!(unit.times(3).to_string(), "$37.50");

        let total: Money = [unit, Money::from_cents(50)].into_iter().sum();
        assert_eq!(total, Money::from_cents(1_300));
    }

    #[test]
    fn test_percent_off() {
        let price = Money::from_cents(2_000);
        assert_eq!(price.percent_off(Decimal::new(25, 0)), Money::from_cents(1_500));
        assert_eq!(price.percent_off(Decimal::new(150, 0)), Money::ZERO);
        assert_eq!(
            Money::from_cents(999).percent_off(Decimal::new(15, 0)),
            Money::from_cents(849)
        );
    }

    #[test]
    fn test_serializes_with_two_decimals() {
        let json = serde_json::to_string(&Money::parse("12").unwrap()).unwrap();
        assert_eq!(json, "\"12.00\"");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Money>("\"-3.00\"").is_err());
        let ok: Money = serde_json::from_str("\"3.5\"").unwrap();
        assert_eq!(ok, Money::from_cents(350));
    }
}
