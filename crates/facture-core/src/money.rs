//! # Money Module
//!
//! Provides the `Money` and `Quantity` types for handling monetary values
//! and billable quantities safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On an invoice with 40 lines that drift compounds until the printed    │
//! │  total disagrees with the sum of the printed lines.                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Integer Milli-Quantities                │
//! │    Unit price:  1099 cents          = $10.99                           │
//! │    Quantity:    2500 milli-units    = 2.5                              │
//! │    Line value:  1099 × 2500         = 2_747_500 milli-cents (exact)    │
//! │                                                                         │
//! │  Rounding happens exactly ONCE, when a cent amount is produced for     │
//! │  storage or display - never per accumulation step.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use facture_core::money::{Money, Quantity};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let total = price + Money::from_cents(500); // $15.99
//!
//! // Fractional quantities (2.5 hours)
//! let qty = Quantity::from_milli(2500);
//! assert_eq!(qty.to_string(), "2.5");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (e.g. balance math)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// LineItem.unit_price ──► line totals ──► Document.amount ──► tax ──► total
///                                                   │
///                                                   └──► remaining balance
/// ```
/// Every monetary value in the system flows through this type. Documents
/// reject negative prices and payments at their validation boundary, so a
/// persisted amount is always `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // If major is negative, minor subtracts: (-5, 50) = -$5.50
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Subtraction floored at zero.
    ///
    /// Used for the remaining balance on an invoice: an overpayment leaves
    /// a remaining amount of exactly `$0.00`, never a negative value.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let total = Money::from_cents(10900);
    /// let paid = Money::from_cents(15000);
    /// assert_eq!(total.saturating_sub_floor(paid), Money::zero());
    /// ```
    #[inline]
    pub fn saturating_sub_floor(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Renderers format currency themselves
/// to handle localization properly.
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

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (whole-unit quantities).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A billable quantity in thousandths of a unit (milli-units).
///
/// ## Why Thousandths?
/// Services are billed in fractional units all the time: 2.5 hours,
/// 0.75 days, 12.25 square meters. Three fractional digits cover every
/// quantity the app ever accepts while keeping all arithmetic in integers,
/// the same trick the tax rate plays with basis points.
///
/// ## Example
/// ```rust
/// use facture_core::money::Quantity;
///
/// let hours = Quantity::from_milli(2500); // 2.5
/// assert_eq!(hours.milli(), 2500);
///
/// let whole = Quantity::from_whole(40); // 40 hours
/// assert_eq!(whole.milli(), 40_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from milli-units (thousandths).
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Creates a whole-unit quantity.
    #[inline]
    pub const fn from_whole(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Returns the quantity in milli-units.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// One unit.
    #[inline]
    pub const fn one() -> Self {
        Quantity(1000)
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the quantity is negative (rejected at validation).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::one()
    }
}

/// Display trims trailing fractional zeros: `2.5`, not `2.500`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 1000).abs();
        let frac = (self.0 % 1000).abs();

        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }

        let frac = format!("{:03}", frac);
        write!(f, "{}{}.{}", sign, whole, frac.trim_end_matches('0'))
    }
}

// =============================================================================
// Exact Line Arithmetic
// =============================================================================

/// Computes the exact line value of `unit_price × quantity` in milli-cents.
///
/// i128 keeps the product exact for any realistic price/quantity pair.
/// The caller accumulates these and rounds once via [`round_milli_cents`].
#[inline]
pub fn exact_milli_cents(unit_price: Money, quantity: Quantity) -> i128 {
    unit_price.cents() as i128 * quantity.milli() as i128
}

/// Rounds a milli-cent value to whole cents, half away from zero.
///
/// ## Rounding Rule
/// Round-half-up is used consistently everywhere a cent amount is produced:
/// `(x + 500) / 1000` for non-negative values. `2_747_500` milli-cents
/// rounds to `2748` cents.
#[inline]
pub fn round_milli_cents(milli_cents: i128) -> i64 {
    if milli_cents >= 0 {
        ((milli_cents + 500) / 1000) as i64
    } else {
        ((milli_cents - 500) / 1000) as i64
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_saturating_sub_floor() {
        let total = Money::from_cents(10900);

        // Partial payment leaves a positive balance
        assert_eq!(
            total.saturating_sub_floor(Money::from_cents(10000)).cents(),
            900
        );
        // Exact payment leaves zero
        assert_eq!(
            total.saturating_sub_floor(Money::from_cents(10900)).cents(),
            0
        );
        // Overpayment floors at zero, never negative
        assert_eq!(
            total.saturating_sub_floor(Money::from_cents(15000)).cents(),
            0
        );
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from_whole(40).to_string(), "40");
        assert_eq!(Quantity::from_milli(2500).to_string(), "2.5");
        assert_eq!(Quantity::from_milli(1250).to_string(), "1.25");
        assert_eq!(Quantity::from_milli(1001).to_string(), "1.001");
        assert_eq!(Quantity::zero().to_string(), "0");
    }

    #[test]
    fn test_exact_line_arithmetic() {
        // $10.99 × 2.5 = $27.475 → 2748 cents after a single rounding
        let exact = exact_milli_cents(Money::from_cents(1099), Quantity::from_milli(2500));
        assert_eq!(exact, 2_747_500);
        assert_eq!(round_milli_cents(exact), 2748);
    }

    #[test]
    fn test_accumulation_rounds_once() {
        // Three lines of $0.333 each. Rounding per line would give 33×3 = 99;
        // exact accumulation gives 999 milli-cents → 100 cents.
        let line = exact_milli_cents(Money::from_cents(333), Quantity::one());
        assert_eq!(round_milli_cents(line * 3), 999);

        let third = exact_milli_cents(Money::from_cents(1), Quantity::from_milli(333));
        let sum: i128 = (0..3).map(|_| third).sum();
        assert_eq!(round_milli_cents(sum), 1);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}
