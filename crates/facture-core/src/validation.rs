//! # Validation Module
//!
//! Input validation utilities for Facture.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host UI                                                      │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - the caller contract boundary                   │
//! │  ├── Negative quantities/prices rejected at construction               │
//! │  └── A document can never be created in an invalid state               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store (UNIQUE / NOT NULL constraints)                        │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Quantity};
use crate::MAX_DOCUMENT_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use facture_core::validation::validate_client_name;
///
/// assert!(validate_client_name("Acme Corporation").is_ok());
/// assert!(validate_client_name("   ").is_err());
/// ```
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "client name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "client name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a document number.
///
/// ## Rules
/// - Must not be empty after trimming (a document is never persisted
///   without a number)
/// - Must be at most 50 characters
///
/// Free-form numbers are allowed: an explicit user override is preserved
/// verbatim, so this does not enforce the `PREFIX-YEAR-SEQ` shape.
pub fn validate_document_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "document number".to_string(),
        });
    }

    if number.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "document number".to_string(),
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be zero or greater (a zero-quantity row contributes nothing but
///   is not an error; negative quantities are a caller contract violation)
pub fn validate_quantity(quantity: Quantity) -> ValidationResult<()> {
    if quantity.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be zero or greater (zero is allowed for no-charge rows)
///
/// ## Example
/// ```rust
/// use facture_core::money::Money;
/// use facture_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0); zero or negative payments are meaningless
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of line items on a document.
///
/// ## Rules
/// - Must not exceed MAX_DOCUMENT_ITEMS (100)
pub fn validate_item_count(current_items: usize) -> ValidationResult<()> {
    if current_items > MAX_DOCUMENT_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 0,
            max: MAX_DOCUMENT_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_client_name() {
        assert!(validate_client_name("Acme Corporation").is_ok());
        assert!(validate_client_name("  padded  ").is_ok());

        assert!(validate_client_name("").is_err());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_document_number() {
        assert!(validate_document_number("INV-2025-001").is_ok());
        assert!(validate_document_number("custom-42").is_ok());

        assert!(validate_document_number("").is_err());
        assert!(validate_document_number("   ").is_err());
        assert!(validate_document_number(&"9".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::from_whole(5)).is_ok());
        assert!(validate_quantity(Quantity::zero()).is_ok());
        assert!(validate_quantity(Quantity::from_milli(-1)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(0)).is_ok());
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(Money::from_cents(100)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
        assert!(validate_payment_amount(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(900).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_item_count() {
        assert!(validate_item_count(0).is_ok());
        assert!(validate_item_count(100).is_ok());
        assert!(validate_item_count(101).is_err());
    }
}
