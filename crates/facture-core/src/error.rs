//! # Error Types
//!
//! Domain-specific error types for facture-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  facture-core errors (this file)                                       │
//! │  ├── CoreError        - Lifecycle / domain rule violations             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  facture-store errors (separate crate)                                 │
//! │  └── StoreError       - Persistence operation failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → host application     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, document number, status)
//!    so a host UI can show a specific, actionable message
//! 3. Errors are enum variants, never String
//! 4. No panics: every fallible operation returns a Result

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document creation was attempted with an empty item list.
    ///
    /// Totals are well-defined for an empty list (all zero), but a document
    /// is never *created* without at least one billable row.
    #[error("document must contain at least one line item")]
    EmptyItems,

    /// A line item referenced by id does not exist on the document.
    #[error("line item not found: {id}")]
    ItemNotFound { id: Uuid },

    /// The document is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Recording a payment on an already-paid invoice
    /// - Approving or declining a non-pending estimate
    #[error("{document} is {status}, cannot {operation}")]
    InvalidStatus {
        document: String,
        operation: String,
        status: String,
    },

    /// A payment collaborator reported a non-successful transaction.
    ///
    /// Failed and cancelled transactions are never recorded against an
    /// invoice; the caller decides whether to retry or abandon.
    #[error("transaction was not successful: {status}")]
    TransactionNotSuccessful { status: String },

    /// A computed amount no longer fits in the currency representation.
    #[error("amount overflow while computing document totals")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed document number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidStatus {
            document: "estimate EST-2025-003".to_string(),
            operation: "approve".to_string(),
            status: "Declined".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "estimate EST-2025-003 is Declined, cannot approve"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "client name".to_string(),
        };
        assert_eq!(err.to_string(), "client name is required");

        let err = ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "client name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
