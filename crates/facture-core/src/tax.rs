//! # Tax Policy
//!
//! Tax rates and the policy object that turns a subtotal into a tax amount.
//!
//! ## Why Basis Points?
//! 1 basis point = 0.01% = 1/10000
//! 900 bps = 9.00% (the application default)
//!
//! ## No Singleton
//! The tax rate is deliberately NOT a process-wide singleton read implicitly
//! from anywhere. A `TaxPolicy` value is passed into every operation that
//! computes tax, so two documents can be recomputed under different rates in
//! parallel, and tests can pin any rate they like. A document snapshots the
//! tax amount it was last computed with; changing the configured rate later
//! does not rewrite already-issued documents.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Policy
// =============================================================================

/// The configured tax rule applied uniformly to a document subtotal.
///
/// ## Usage
/// ```rust
/// use facture_core::money::Money;
/// use facture_core::tax::{TaxPolicy, TaxRate};
///
/// let policy = TaxPolicy::new(TaxRate::from_bps(900)); // 9%
/// let tax = policy.tax(Money::from_cents(10_000));     // $100.00
/// assert_eq!(tax.cents(), 900);                        // $9.00
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPolicy {
    rate: TaxRate,
}

impl TaxPolicy {
    /// Creates a tax policy with the given rate.
    #[inline]
    pub const fn new(rate: TaxRate) -> Self {
        TaxPolicy { rate }
    }

    /// Returns the configured rate.
    #[inline]
    pub const fn rate(&self) -> TaxRate {
        self.rate
    }

    /// Computes the tax on an amount, rounded half up to whole cents.
    ///
    /// ## Implementation
    /// Integer math in i128 to prevent overflow on large amounts:
    /// `(amount_cents * bps + 5000) / 10000`. The +5000 term rounds the
    /// half-cent boundary up, e.g. $10.00 at 8.25% = $0.825 → $0.83.
    pub fn tax(&self, amount: Money) -> Money {
        let tax_cents = (amount.cents() as i128 * self.rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }
}

/// The default policy matches the application default of 9%.
impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::new(TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_default_policy_is_nine_percent() {
        let policy = TaxPolicy::default();
        assert_eq!(policy.rate().bps(), 900);
        assert_eq!(policy.tax(Money::from_cents(10_000)).cents(), 900);
    }

    #[test]
    fn test_tax_basic() {
        // $10.00 at 10% = $1.00
        let policy = TaxPolicy::new(TaxRate::from_bps(1000));
        assert_eq!(policy.tax(Money::from_cents(1000)).cents(), 100);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let policy = TaxPolicy::new(TaxRate::from_bps(825));
        assert_eq!(policy.tax(Money::from_cents(1000)).cents(), 83);
    }

    #[test]
    fn test_zero_rate() {
        let policy = TaxPolicy::new(TaxRate::zero());
        assert_eq!(policy.tax(Money::from_cents(123_456)).cents(), 0);
    }

    #[test]
    fn test_tax_depends_only_on_amount() {
        // The same subtotal must always produce the same tax, no matter
        // how many line items it came from.
        let policy = TaxPolicy::new(TaxRate::from_bps(900));
        assert_eq!(
            policy.tax(Money::from_cents(10_000)),
            policy.tax(Money::from_cents(3_333) + Money::from_cents(3_333) + Money::from_cents(3_334))
        );
    }
}
