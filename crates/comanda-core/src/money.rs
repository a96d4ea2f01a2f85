//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats, a cashier closing adds up many small prices:              │
//! │    7.00 + 0.10 + 0.20 = 7.300000000000001                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer centavos                                         │
//! │    700 + 10 + 20 = 730  → "R$ 7,30", exactly                            │
//! │                                                                         │
//! │  Only the rendering layer ever turns centavos into a decimal string.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comanda_core::money::Money;
//!
//! let price = Money::from_cents(1700); // R$ 17,00
//!
//! let line_total = price.multiply_quantity(3);  // R$ 51,00
//! let with_drink = line_total + Money::from_cents(700); // R$ 58,00
//!
//! assert_eq!(with_drink.to_string(), "R$ 58,00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos for BRL).
///
/// ## Design Decisions
/// - **i64 (signed)**: Matches the persisted JSON integer
/// - **Saturating arithmetic**: Sums of loaded ledger data clamp at
///   `i64::MAX` instead of panicking
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Newtype serde**: Persisted as a bare integer
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► OrderItem.line_total ──► WorkingOrder.total
///                                                   │
///                                                   ▼
///                    CompletedOrder.total ──► DailySummary.total_{cash,card,pix}
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let price = Money::from_cents(2500); // R$ 25,00
    /// assert_eq!(price.cents(), 2500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
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

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::money::Money;
    ///
    /// let coke = Money::from_cents(700);
    /// assert_eq!(coke.multiply_quantity(3).cents(), 2100);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian real formatting: `R$ 1234,50`.
///
/// Thousands separators are left to the rendering layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            self.reais().abs(),
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4200).to_string(), "R$ 42,00");
        assert_eq!(Money::from_cents(705).to_string(), "R$ 7,05");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5,50");
        assert_eq!(Money::zero().to_string(), "R$ 0,00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let mut running = Money::zero();
        running += a;
        running += b;
        assert_eq!(running.cents(), 1500);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX);

        let mut running = huge;
        running += huge;
        assert_eq!(running, huge);
        assert_eq!(huge + Money::from_cents(1), huge);
        assert_eq!(huge.multiply_quantity(999), huge);
    }

    #[test]
    fn test_sum_avoids_float_drift() {
        let prices = [
            Money::from_cents(700),
            Money::from_cents(10),
            Money::from_cents(20),
        ];
        let total: Money = prices.iter().sum();
        assert_eq!(total.cents(), 730);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::from_cents(-1).is_positive());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(2500)).unwrap();
        assert_eq!(json, "2500");
    }
}
