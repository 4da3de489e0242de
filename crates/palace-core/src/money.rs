//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summed over a day of cookie sales, the drift shows up on the report.   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Sen                                              │
//! │    RM 0.10 + RM 0.20 = 10 sen + 20 sen = 30 sen                         │
//! │    Exact, every time, for any number of line items                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use palace_core::money::Money;
//!
//! // Create from sen (preferred inside the core)
//! let price = Money::from_cents(500); // RM 5.00
//!
//! // Or parse what the operator typed
//! let tendered: Money = "20.00".parse().unwrap();
//!
//! let subtotal = price.checked_mul(3).unwrap();
//! assert_eq!(tendered - subtotal, Money::from_cents(500));
//!
//! // Totals that would not fit in an i64 are refused, never wrapped
//! assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Number of fractional digits carried by [`Money`].
pub const MINOR_DIGITS: u32 = 2;

const MINOR_PER_MAJOR: i64 = 10_i64.pow(MINOR_DIGITS);

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (sen for RM, cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: change and differences may go negative mid-calculation
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support so snapshots serialize as plain integers
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.unit_price ──► CartLine.unit_price ──► CartLine.line_total        │
/// │                                                                         │
/// │  Cart.subtotal ──► Checkout (tendered - subtotal = change)              │
/// │                                                                         │
/// │  Transaction lines ──► ReportRow.line_total ──► CSV export              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use palace_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // RM 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount typed by the operator.
    ///
    /// ## Accepted Forms
    /// - `"5"`, `"5.5"`, `"5.50"`, surrounding whitespace ignored
    ///
    /// ## Rejected
    /// - signs, exponents, thousands separators
    /// - more than two fractional digits (`"5.005"`); the core never rounds
    ///   silently, so the operator has to say exactly what they mean
    ///
    /// `field` names the input in the returned error.
    pub fn parse(input: &str, field: &str) -> ValidationResult<Money> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };
        let too_large = || ValidationError::too_large(field);

        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        let (whole, frac) = match input.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (input, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must be a decimal number such as 12.50"));
        }
        if input.contains('.') && frac.is_empty() {
            return Err(invalid("must have digits after the decimal point"));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must be a decimal number such as 12.50"));
        }
        if frac.len() > MINOR_DIGITS as usize {
            return Err(invalid("must have at most two decimal places"));
        }

        let major: i64 = whole.parse().map_err(|_| too_large())?;
        let mut minor: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| too_large())?
        };
        // "5.5" means 50 sen, not 5
        for _ in frac.len()..MINOR_DIGITS as usize {
            minor *= 10;
        }

        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(minor))
            .map(Money)
            .ok_or_else(too_large)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (ringgit/dollars), truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use palace_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(500); // RM 5.00
    /// assert_eq!(unit_price.checked_mul(3), Some(Money::from_cents(1500)));
    /// ```
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplication clamped to the i64 range.
    ///
    /// For read-side totals only: carts and checkout refuse any amount that
    /// would reach the bounds, so on register data this is exact.
    #[inline]
    pub const fn saturating_mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Addition clamped to the i64 range. See [`Money::saturating_mul`].
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Sums amounts, or `None` as soon as the running total overflows.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`15.00`, `-5.50`).
///
/// The currency prefix belongs to the presentation layer, which knows the
/// configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s, "amount")
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Saturating sum; use [`Money::checked_sum`] where overflow must be seen.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
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
