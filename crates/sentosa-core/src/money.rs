//! # Money Module
//!
//! Provides the `Money` type for prices and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rupiah has no minor unit in everyday retail, so one Money unit is      │
//! │  one rupiah. Every price, line total and order total is an i64.        │
//! │                                                                         │
//! │    2 packs × Rp 90.000 + 5 × Rp 10.000 = Rp 230.000   (exact)          │
//! │                                                                         │
//! │  No floats anywhere: a cart total is always the exact sum of lines.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sentosa_core::money::Money;
//!
//! let price = Money::from_minor(10_000);
//! let total = price * 3 + Money::from_minor(500);
//! assert_eq!(total.minor(), 30_500);
//! assert_eq!(total.to_string(), "Rp 30.500");
//! ```
//!
//! Arithmetic saturates at the i64 bounds instead of panicking; a
//! fat-fingered manual quantity must never take the register down.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest currency unit (whole rupiah).
///
/// ```text
/// ProductRecord.sell_price ──► CartLine snapshot ──► LineQuote.total
///                                                        │
///                                     CartLedger::total ◄┘ (sum of lines)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use sentosa_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(3_500);
    /// assert_eq!(unit_price.multiply_quantity(4).minor(), 14_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with a symbol and thousands separator.
    ///
    /// ```rust
    /// use sentosa_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1_234_567).format_with("Rp", '.'), "Rp 1.234.567");
    /// assert_eq!(Money::from_minor(-500).format_with("Rp", '.'), "-Rp 500");
    /// ```
    pub fn format_with(&self, symbol: &str, separator: char) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        if symbol.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{symbol} {grouped}")
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering in id-ID style. The register formats UI amounts
/// through its own config.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("Rp", '.'))
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
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
