//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Integer Cents In, Numbers Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE MONEY LIVES                                                      │
//! │                                                                         │
//! │  sale_items.price_cents ──► SUM(...) ──► Money ──► to_major_units()     │
//! │        (INTEGER)              (i64)      (cents)       (f64, edge)      │
//! │                                                                         │
//! │  Storage and aggregation never touch floating point.                   │
//! │  Only the report payload handed to charts is a plain number.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let revenue: Money = [1099, 500].into_iter().map(Money::from_cents).sum();
//! assert_eq!(revenue.cents(), 1599);
//! assert_eq!(revenue.to_major_units(), 15.99);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// - **i64 (signed)**: refunds and corrections can make a sum negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates Money from an aggregate that may be NULL.
    ///
    /// `SUM()` over zero rows is NULL in SQL; a report treats that as $0.00.
    #[inline]
    pub fn from_nullable_cents(cents: Option<i64>) -> Self {
        Money(cents.unwrap_or(0))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts to a plain number in major units (`1599` cents → `15.99`).
    ///
    /// ## Note
    /// Only for report payloads consumed by charts and dashboards.
    /// Never feed the result back into arithmetic.
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a major-unit number back into cents, rounding to the nearest cent.
    pub fn from_major_units(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }
}

/// Serde adapter for cent fields that travel as major-unit numbers.
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Line {
///     #[serde(rename = "price", with = "tally_core::money::major_units")]
///     price_cents: i64,
/// }
///
/// let json = serde_json::to_string(&Line { price_cents: 150 }).unwrap();
/// assert_eq!(json, r#"{"price":1.5}"#);
/// ```
pub mod major_units {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(Money::from_cents(*cents).to_major_units())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_major_units(amount).cents())
    }
}

/// Display shows money as `$12.34` / `-$5.50` (logs and CLI summaries).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Line amount: unit price times quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_null_sum_is_zero() {
        assert!(Money::from_nullable_cents(None).is_zero());
        assert_eq!(Money::from_nullable_cents(Some(250)).cents(), 250);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_to_major_units() {
        assert_eq!(Money::from_cents(1599).to_major_units(), 15.99);
        assert_eq!(Money::zero().to_major_units(), 0.0);
        assert_eq!(Money::from_cents(-250).to_major_units(), -2.5);
    }

    #[test]
    fn test_sum_and_add_assign() {
        let total: Money = vec![Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);

        let mut running = Money::zero();
        running += Money::from_cents(40);
        running += Money::from_cents(2);
        assert_eq!(running.cents(), 42);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_from_major_units() {
        assert_eq!(Money::from_major_units(15.99).cents(), 1599);
        assert_eq!(Money::from_major_units(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_major_units(-2.5).cents(), -250);
    }

    #[test]
    fn test_major_units_adapter() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Priced {
            #[serde(rename = "price", with = "major_units")]
            price_cents: i64,
        }

        let json = serde_json::to_value(Priced { price_cents: 2599 }).unwrap();
        assert_eq!(json, serde_json::json!({ "price": 25.99 }));

        let back: Priced = serde_json::from_value(serde_json::json!({ "price": 1.5 })).unwrap();
        assert_eq!(back, Priced { price_cents: 150 });
    }

    #[test]
    fn test_mul_quantity() {
        assert_eq!((Money::from_cents(199) * 3).cents(), 597);
        assert!((Money::from_cents(199) * 0).is_zero());
    }
}
