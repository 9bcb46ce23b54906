//! Money type for representing prices and totals.
//!
//! Amounts are held as integer cents so that cart totals add up exactly.
//! On the wire they are decimal numbers (`9.99`), which is what the
//! catalog API sends and what stored carts contain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest decimal amount accepted on the wire.
const MAX_DECIMAL: f64 = Money::MAX_CENTS as f64 / 100.0;

/// A monetary value in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Largest magnitude, in cents, that reads back exactly from its
    /// decimal form. Checked arithmetic fails past it.
    pub const MAX_CENTS: i64 = 1 << 50;

    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Create a Money value from a decimal amount, rounding to the cent.
    ///
    /// Returns `None` for NaN, infinities and amounts beyond
    /// [`Money::MAX_CENTS`].
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(49.99).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount.abs() > MAX_DECIMAL {
            return None;
        }
        Self::bounded((amount * 100.0).round() as i64)
    }

    fn bounded(amount_cents: i64) -> Option<Self> {
        (amount_cents.unsigned_abs() <= Self::MAX_CENTS as u64).then(|| Self::new(amount_cents))
    }

    /// Check that this amount is within [`Money::MAX_CENTS`].
    pub fn is_representable(&self) -> bool {
        Self::bounded(self.amount_cents).is_some()
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Add another amount, returning `None` past [`Money::MAX_CENTS`].
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.amount_cents
            .checked_add(other.amount_cents)
            .and_then(Money::bounded)
    }

    /// Multiply by a quantity, returning `None` past [`Money::MAX_CENTS`].
    pub fn checked_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).and_then(Money::bounded)
    }

    /// A percentage of this amount, rounded to the cent.
    pub fn percentage(&self, percent: f64) -> Money {
        Money::new((self.amount_cents as f64 * percent / 100.0).round() as i64)
    }

    /// Sum amounts, returning `None` past [`Money::MAX_CENTS`].
    pub fn try_sum(iter: impl IntoIterator<Item = Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Format without the currency symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl TryFrom<f64> for Money {
    type Error = String;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Money::from_decimal(amount).ok_or_else(|| format!("invalid amount: {}", amount))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}", Money::new(-self.amount_cents).display_amount())
        } else {
            write!(f, "${}", self.display_amount())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99), Some(Money::new(4999)));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::new(30)));
        assert_eq!(Money::from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).to_string(), "$49.99");
        assert_eq!(Money::new(5).to_string(), "$0.05");
        assert_eq!(Money::new(-499).to_string(), "-$4.99");
        assert_eq!(Money::new(2000).display_amount(), "20.00");
    }

    #[test]
    fn test_money_checked_arithmetic() {
        assert_eq!(
            Money::new(1000).checked_add(Money::new(500)),
            Some(Money::new(1500))
        );
        assert_eq!(Money::new(1000).checked_multiply(3), Some(Money::new(3000)));
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
        assert_eq!(Money::new(i64::MAX).checked_multiply(2), None);
        assert_eq!(Money::new(Money::MAX_CENTS).checked_add(Money::new(1)), None);
        assert_eq!(Money::new(Money::MAX_CENTS / 2 + 1).checked_multiply(2), None);
    }

    #[test]
    fn test_large_amounts_survive_the_wire() {
        for cents in [Money::MAX_CENTS, Money::MAX_CENTS - 1, 999_999_999_999_999, -Money::MAX_CENTS] {
            let money = Money::new(cents);
            let text = serde_json::to_string(&money).unwrap();
            assert_eq!(serde_json::from_str::<Money>(&text).unwrap(), money, "{}", text);
        }
        assert!(serde_json::from_str::<Money>("90071992547409.93").is_err());
        assert!(!Money::new(Money::MAX_CENTS + 1).is_representable());
        assert!(Money::new(-Money::MAX_CENTS).is_representable());
    }

    #[test]
    fn test_money_percentage() {
        assert_eq!(Money::new(10000).percentage(7.0), Money::new(700));
        // 7% of $12.34 is 86.38 cents, rounded to 86.
        assert_eq!(Money::new(1234).percentage(7.0), Money::new(86));
    }

    #[test]
    fn test_try_sum() {
        let total = Money::try_sum([Money::new(100), Money::new(250)]);
        assert_eq!(total, Some(Money::new(350)));
        assert_eq!(Money::try_sum([Money::new(i64::MAX), Money::new(1)]), None);
    }

    #[test]
    fn test_wire_format_is_decimal() {
        assert_eq!(serde_json::to_string(&Money::new(999)).unwrap(), "9.99");
        let parsed: Money = serde_json::from_str("9.99").unwrap();
        assert_eq!(parsed, Money::new(999));
        let whole: Money = serde_json::from_str("10").unwrap();
        assert_eq!(whole, Money::new(1000));
    }
}
