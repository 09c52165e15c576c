//! # facture-core: Pure Business Logic for Facture
//!
//! This crate is the **heart** of Facture. It contains all invoicing
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Facture Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Host Application                            │   │
//! │  │    Document editors ──► Payment sheet ──► PDF / share          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ facture-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │    tax    │  │   item    │  │ document  │  │   │
//! │  │   │   Money   │  │ TaxPolicy │  │ LineItem  │  │  Invoice  │  │   │
//! │  │   │ Quantity  │  │  TaxRate  │  │ ItemList  │  │ Estimate  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ numbering │  │  payment  │  │  client   │  │ validation│  │   │
//! │  │   │ max + 1   │  │  methods  │  │  records  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  facture-store (Persistence Layer)              │   │
//! │  │          SQLite / in-memory repositories, change events         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money and Quantity with integer arithmetic (no floating point!)
//! - [`tax`] - TaxRate and the injected TaxPolicy
//! - [`item`] - LineItem and the self-recomputing ItemList
//! - [`document`] - Invoice and Estimate aggregates with their lifecycles
//! - [`numbering`] - Sequential, year-scoped document numbers
//! - [`payment`] - Payment methods, transaction results, ledger records
//! - [`client`] - Address-book client records
//! - [`business`] - The issuing business's profile
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Derived Totals**: `total` is always `amount + tax`, recomputed on every
//!    mutation, never stored where it could go stale
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use facture_core::document::{ClientSnapshot, Invoice};
//! use facture_core::item::LineItem;
//! use facture_core::money::{Money, Quantity};
//! use facture_core::tax::TaxPolicy;
//!
//! // Create money from cents (never from floats!)
//! let rate = Money::from_cents(12_500); // $125.00/hr
//!
//! let invoice = Invoice::new(
//!     "INV-2025-001",
//!     ClientSnapshot::new("Acme Corporation"),
//!     vec![LineItem::new("Consulting", Quantity::from_milli(2_500), rate).unwrap()],
//!     &TaxPolicy::default(),
//!     Utc::now(),
//!     None,
//!     "",
//! ).unwrap();
//!
//! // 2.5 hours × $125.00 = $312.50; tax at the default 9% = $28.13
//! assert_eq!(invoice.amount().cents(), 31_250);
//! assert_eq!(invoice.tax().cents(), 2_813);
//! assert_eq!(invoice.total(), invoice.amount() + invoice.tax());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod business;
pub mod client;
pub mod document;
pub mod error;
pub mod item;
pub mod money;
pub mod numbering;
pub mod payment;
pub mod tax;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use facture_core::Invoice` instead of
// `use facture_core::document::Invoice`

pub use business::BusinessProfile;
pub use client::Client;
pub use document::{ClientSnapshot, Estimate, EstimateStatus, Invoice, InvoiceStatus};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{ItemList, LineItem};
pub use money::{Money, Quantity};
pub use numbering::{next_number, resolve_number, DocumentKind};
pub use payment::{Payment, PaymentMethod, TransactionResult, TransactionStatus};
pub use tax::{TaxPolicy, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate in basis points: 9.00%.
///
/// ## Why a constant?
/// The rate a fresh installation starts with before the user configures
/// their own. Stored policy always wins - this is only the fallback that
/// [`tax::TaxPolicy::default`] uses.
pub const DEFAULT_TAX_RATE_BPS: u32 = 900;

/// Default payment terms: due/expiry dates fall this many days after the
/// document date when the caller doesn't supply one.
pub const DEFAULT_NET_DAYS: i64 = 30;

/// Maximum line items allowed on a single document
///
/// ## Business Reason
/// Prevents runaway documents and keeps rendering and totals recomputation
/// cheap. Can be made configurable in future versions.
pub const MAX_DOCUMENT_ITEMS: usize = 100;
