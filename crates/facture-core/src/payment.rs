//! # Payment Boundary Types
//!
//! What crosses the boundary between this core and a payment collaborator
//! (tap-to-pay terminal, wallet sheet, manual entry):
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Payment Flow                                        │
//! │                                                                         │
//! │  Invoice.total() ──► collaborator charges the card/wallet              │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                     TransactionResult                                   │
//! │                     { status, amount, timestamp, reference }            │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  Invoice::apply_transaction() ──► status = Paid { .. }                 │
//! │                              │                                          │
//! │                              └──► Payment record (for the ledger)      │
//! │                                                                         │
//! │  Failed / cancelled results are never recorded.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How an invoice was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
    CreditCard,
    Online,
    ApplePay,
    TapToPay,
}

impl PaymentMethod {
    /// Human-readable label for receipts and logs.
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Check => "Check",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Online => "Online Payment",
            PaymentMethod::ApplePay => "Apple Pay",
            PaymentMethod::TapToPay => "Tap to Pay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Transaction Result
// =============================================================================

/// Outcome reported by a payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    Failed,
    Cancelled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Success => write!(f, "success"),
            TransactionStatus::Failed => write!(f, "failed"),
            TransactionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The full result handed back by a payment collaborator.
///
/// `amount` is what was actually collected - it may differ from the invoice
/// total (partial payment, tip, rounding at the terminal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub status: TransactionStatus,
    pub amount: Money,
    pub timestamp: DateTime<Utc>,
    /// External reference (card auth code, wallet transaction id, etc.).
    pub reference: String,
}

// =============================================================================
// Payment Record
// =============================================================================

/// A recorded payment, kept as its own ledger entry alongside the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    /// The invoice this payment settled, by its human-readable number.
    pub invoice_number: String,
    pub client_name: String,
    pub amount: Money,
    pub method: PaymentMethod,
    pub date: DateTime<Utc>,
    /// External reference (transaction id, check number, etc.).
    pub reference: String,
}

impl Payment {
    /// Creates a payment record.
    pub fn new(
        invoice_number: impl Into<String>,
        client_name: impl Into<String>,
        amount: Money,
        method: PaymentMethod,
        date: DateTime<Utc>,
        reference: impl Into<String>,
    ) -> Self {
        Payment {
            id: Uuid::new_v4(),
            invoice_number: invoice_number.into(),
            client_name: client_name.into(),
            amount,
            method,
            date,
            reference: reference.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_labels() {
        assert_eq!(PaymentMethod::BankTransfer.label(), "Bank Transfer");
        assert_eq!(PaymentMethod::TapToPay.to_string(), "Tap to Pay");
    }

    #[test]
    fn test_method_serializes_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::ApplePay).unwrap();
        assert_eq!(json, "\"apple_pay\"");
    }
}
