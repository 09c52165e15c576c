//! # Documents: Invoice and Estimate
//!
//! The two document aggregates, their client snapshot, their lifecycle
//! state machines, and estimate→invoice conversion.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Lifecycle                                   │
//! │                                                                         │
//! │  Invoice:    Active ──record_payment()──► Paid { method, date, amount }│
//! │                                                                         │
//! │  Estimate:   Pending ──approve()──► Approved   (terminal)              │
//! │                  │                                                      │
//! │                  └─────decline()──► Declined   (terminal)              │
//! │                                                                         │
//! │  Estimate ──convert_to_invoice()──► fresh Active Invoice               │
//! │  (conversion never mutates the estimate; approval is independent)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Paid Implies Payment Info
//! `InvoiceStatus::Paid` carries the payment method, date and collected
//! amount as associated data. There is no way to construct a paid invoice
//! without them, and no nullable payment fields to keep in sync on an
//! active one.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::Client;
use crate::error::{CoreError, CoreResult};
use crate::item::{ItemList, LineItem};
use crate::money::Money;
use crate::numbering::{next_number, DocumentKind};
use crate::payment::{Payment, PaymentMethod, TransactionResult, TransactionStatus};
use crate::tax::TaxPolicy;
use crate::validation::{validate_client_name, validate_document_number, validate_payment_amount};
use crate::DEFAULT_NET_DAYS;

// =============================================================================
// Client Snapshot
// =============================================================================

/// A point-in-time copy of client contact details.
///
/// Copied onto the document at creation; never a live reference to the
/// client record, so later edits to the address book leave issued
/// documents untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ClientSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        ClientSnapshot {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Pre-fills a snapshot from an address-book client.
    pub fn from_client(client: &Client) -> Self {
        let opt = |s: &str| {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };
        ClientSnapshot {
            name: client.name.clone(),
            phone: opt(&client.phone),
            email: opt(&client.email),
            address: opt(&client.address),
        }
    }
}

// =============================================================================
// Statuses
// =============================================================================

/// Invoice status. `Paid` carries the payment details as associated data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvoiceStatus {
    Active,
    Paid {
        method: PaymentMethod,
        paid_date: DateTime<Utc>,
        /// The amount actually collected - may differ from the total.
        amount: Money,
    },
}

impl InvoiceStatus {
    /// Short name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            InvoiceStatus::Active => "Active",
            InvoiceStatus::Paid { .. } => "Paid",
        }
    }
}

/// Estimate status. Approved and Declined are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Pending,
    Approved,
    Declined,
}

impl EstimateStatus {
    pub fn name(self) -> &'static str {
        match self {
            EstimateStatus::Pending => "Pending",
            EstimateStatus::Approved => "Approved",
            EstimateStatus::Declined => "Declined",
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// An invoice: a numbered, dated bill with line items and a payment state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    id: Uuid,
    number: String,
    client: ClientSnapshot,
    items: ItemList,
    date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    status: InvoiceStatus,
    notes: String,
}

impl Invoice {
    /// Creates a new active invoice.
    ///
    /// ## Validation
    /// - `number` must be non-empty after trimming (stored trimmed)
    /// - client name must be non-empty after trimming
    /// - at least one line item
    ///
    /// `due_date` defaults to `date + 30 days` when not supplied.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use facture_core::document::{ClientSnapshot, Invoice};
    /// use facture_core::item::LineItem;
    /// use facture_core::money::{Money, Quantity};
    /// use facture_core::tax::TaxPolicy;
    ///
    /// let invoice = Invoice::new(
    ///     "INV-2025-001",
    ///     ClientSnapshot::new("Acme Corporation"),
    ///     vec![LineItem::new("Design", Quantity::from_whole(20), Money::from_cents(12_500)).unwrap()],
    ///     &TaxPolicy::default(),
    ///     Utc::now(),
    ///     None,
    ///     "Thank you for your business!",
    /// ).unwrap();
    /// assert_eq!(invoice.total(), invoice.amount() + invoice.tax());
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        number: &str,
        client: ClientSnapshot,
        items: Vec<LineItem>,
        policy: &TaxPolicy,
        date: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
        notes: impl Into<String>,
    ) -> CoreResult<Self> {
        validate_document_number(number)?;
        validate_client_name(&client.name)?;
        if items.is_empty() {
            return Err(CoreError::EmptyItems);
        }

        Ok(Invoice {
            id: Uuid::new_v4(),
            number: number.trim().to_string(),
            client,
            items: ItemList::new(items, policy)?,
            date,
            due_date: due_date.unwrap_or(date + Duration::days(DEFAULT_NET_DAYS)),
            status: InvoiceStatus::Active,
            notes: notes.into(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The human-readable number. Immutable once assigned.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[inline]
    pub fn client(&self) -> &ClientSnapshot {
        &self.client
    }

    #[inline]
    pub fn items(&self) -> &ItemList {
        &self.items
    }

    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[inline]
    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    #[inline]
    pub fn status(&self) -> &InvoiceStatus {
        &self.status
    }

    #[inline]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Subtotal at last recompute.
    #[inline]
    pub fn amount(&self) -> Money {
        self.items.amount()
    }

    /// Tax snapshot at last recompute.
    #[inline]
    pub fn tax(&self) -> Money {
        self.items.tax()
    }

    /// Grand total. Always `amount + tax`, never stored.
    #[inline]
    pub fn total(&self) -> Money {
        self.items.total()
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status, InvoiceStatus::Paid { .. })
    }

    /// The unpaid balance, floored at zero.
    ///
    /// The full total while active; after payment, `total - collected`
    /// with overpayment clamped to `$0.00`.
    pub fn remaining_amount(&self) -> Money {
        match &self.status {
            InvoiceStatus::Active => self.total(),
            InvoiceStatus::Paid { amount, .. } => self.total().saturating_sub_floor(*amount),
        }
    }

    // -------------------------------------------------------------------------
    // Mutation (totals always refreshed by ItemList)
    // -------------------------------------------------------------------------

    pub fn add_item(&mut self, item: LineItem, policy: &TaxPolicy) -> CoreResult<()> {
        self.items.push(item, policy)
    }

    pub fn remove_item(&mut self, id: Uuid, policy: &TaxPolicy) -> CoreResult<LineItem> {
        self.items.remove(id, policy)
    }

    pub fn update_item<F>(&mut self, id: Uuid, f: F, policy: &TaxPolicy) -> CoreResult<()>
    where
        F: FnOnce(&mut LineItem) -> CoreResult<()>,
    {
        self.items.update(id, f, policy)
    }

    pub fn move_item(&mut self, from: usize, to: usize, policy: &TaxPolicy) -> CoreResult<()> {
        self.items.move_item(from, to, policy)
    }

    /// Re-snapshots amount/tax under the given policy.
    pub fn retax(&mut self, policy: &TaxPolicy) -> CoreResult<()> {
        self.items.retax(policy)
    }

    /// Replaces the client snapshot. The name rule still applies.
    pub fn set_client(&mut self, client: ClientSnapshot) -> CoreResult<()> {
        validate_client_name(&client.name)?;
        self.client = client;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_due_date(&mut self, due_date: DateTime<Utc>) {
        self.due_date = due_date;
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Records a payment: `Active → Paid`.
    ///
    /// `amount` is what was actually collected and may differ from the
    /// total - `remaining_amount()` reflects partial payments; an
    /// overpayment leaves a remaining amount of zero. Line items and
    /// totals are not touched.
    ///
    /// ## Errors
    /// - `InvalidStatus` if the invoice is already paid
    /// - `Validation` if the amount is not positive
    pub fn record_payment(
        &mut self,
        method: PaymentMethod,
        amount: Money,
        paid_date: DateTime<Utc>,
    ) -> CoreResult<()> {
        if let InvoiceStatus::Paid { .. } = self.status {
            return Err(CoreError::InvalidStatus {
                document: format!("invoice {}", self.number),
                operation: "record a payment".to_string(),
                status: self.status.name().to_string(),
            });
        }
        validate_payment_amount(amount)?;

        self.status = InvoiceStatus::Paid {
            method,
            paid_date,
            amount,
        };
        Ok(())
    }

    /// Applies a payment collaborator's transaction result.
    ///
    /// A successful transaction becomes a recorded payment plus a ledger
    /// `Payment` entry; failed and cancelled transactions are rejected
    /// without touching the invoice.
    pub fn apply_transaction(
        &mut self,
        method: PaymentMethod,
        result: &TransactionResult,
    ) -> CoreResult<Payment> {
        if result.status != TransactionStatus::Success {
            return Err(CoreError::TransactionNotSuccessful {
                status: result.status.to_string(),
            });
        }

        self.record_payment(method, result.amount, result.timestamp)?;

        Ok(Payment::new(
            self.number.clone(),
            self.client.name.clone(),
            result.amount,
            method,
            result.timestamp,
            result.reference.clone(),
        ))
    }
}

// =============================================================================
// Estimate
// =============================================================================

/// An estimate: a numbered quote that can be approved, declined, or
/// converted into an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    id: Uuid,
    number: String,
    client: ClientSnapshot,
    items: ItemList,
    date: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    status: EstimateStatus,
    notes: String,
}

impl Estimate {
    /// Creates a new pending estimate.
    ///
    /// Same validation rules as [`Invoice::new`]; `expiry_date` defaults
    /// to `date + 30 days`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        number: &str,
        client: ClientSnapshot,
        items: Vec<LineItem>,
        policy: &TaxPolicy,
        date: DateTime<Utc>,
        expiry_date: Option<DateTime<Utc>>,
        notes: impl Into<String>,
    ) -> CoreResult<Self> {
        validate_document_number(number)?;
        validate_client_name(&client.name)?;
        if items.is_empty() {
            return Err(CoreError::EmptyItems);
        }

        Ok(Estimate {
            id: Uuid::new_v4(),
            number: number.trim().to_string(),
            client,
            items: ItemList::new(items, policy)?,
            date,
            expiry_date: expiry_date.unwrap_or(date + Duration::days(DEFAULT_NET_DAYS)),
            status: EstimateStatus::Pending,
            notes: notes.into(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[inline]
    pub fn client(&self) -> &ClientSnapshot {
        &self.client
    }

    #[inline]
    pub fn items(&self) -> &ItemList {
        &self.items
    }

    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[inline]
    pub fn expiry_date(&self) -> DateTime<Utc> {
        self.expiry_date
    }

    #[inline]
    pub fn status(&self) -> EstimateStatus {
        self.status
    }

    #[inline]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[inline]
    pub fn amount(&self) -> Money {
        self.items.amount()
    }

    #[inline]
    pub fn tax(&self) -> Money {
        self.items.tax()
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.items.total()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    pub fn add_item(&mut self, item: LineItem, policy: &TaxPolicy) -> CoreResult<()> {
        self.items.push(item, policy)
    }

    pub fn remove_item(&mut self, id: Uuid, policy: &TaxPolicy) -> CoreResult<LineItem> {
        self.items.remove(id, policy)
    }

    pub fn update_item<F>(&mut self, id: Uuid, f: F, policy: &TaxPolicy) -> CoreResult<()>
    where
        F: FnOnce(&mut LineItem) -> CoreResult<()>,
    {
        self.items.update(id, f, policy)
    }

    pub fn move_item(&mut self, from: usize, to: usize, policy: &TaxPolicy) -> CoreResult<()> {
        self.items.move_item(from, to, policy)
    }

    pub fn retax(&mut self, policy: &TaxPolicy) -> CoreResult<()> {
        self.items.retax(policy)
    }

    pub fn set_client(&mut self, client: ClientSnapshot) -> CoreResult<()> {
        validate_client_name(&client.name)?;
        self.client = client;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_expiry_date(&mut self, expiry_date: DateTime<Utc>) {
        self.expiry_date = expiry_date;
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// `Pending → Approved`. Terminal states reject the transition.
    pub fn approve(&mut self) -> CoreResult<()> {
        self.transition(EstimateStatus::Approved, "approve")
    }

    /// `Pending → Declined`. Terminal states reject the transition.
    pub fn decline(&mut self) -> CoreResult<()> {
        self.transition(EstimateStatus::Declined, "decline")
    }

    fn transition(&mut self, to: EstimateStatus, operation: &str) -> CoreResult<()> {
        if self.status != EstimateStatus::Pending {
            return Err(CoreError::InvalidStatus {
                document: format!("estimate {}", self.number),
                operation: operation.to_string(),
                status: self.status.name().to_string(),
            });
        }
        self.status = to;
        Ok(())
    }

    /// Produces a new active invoice from this estimate.
    ///
    /// ## What Carries Over
    /// - Client snapshot, notes: copied
    /// - Items: cloned under fresh identities, so the two documents never
    ///   share mutable ownership
    /// - Amount and tax: copied verbatim - the estimate's snapshot is what
    ///   the client agreed to, not whatever today's configured rate says
    ///
    /// ## What Doesn't
    /// - The number: a fresh invoice number is generated from
    ///   `existing_invoice_numbers` (invoice sequence, independent of the
    ///   estimate's)
    /// - The estimate itself: conversion never mutates it; whether only
    ///   approved estimates may convert is the caller's confirmation
    ///   policy, checked against `status()` before calling
    pub fn convert_to_invoice<'a, I>(
        &self,
        existing_invoice_numbers: I,
        date: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
    ) -> Invoice
    where
        I: IntoIterator<Item = &'a str>,
    {
        let number = next_number(DocumentKind::Invoice, existing_invoice_numbers, date.year());

        let items = self
            .items
            .items()
            .iter()
            .map(|item| item.clone_with_new_id())
            .collect();

        Invoice {
            id: Uuid::new_v4(),
            number,
            client: self.client.clone(),
            items: ItemList::from_parts(items, self.items.amount(), self.items.tax()),
            date,
            due_date: due_date.unwrap_or(date + Duration::days(DEFAULT_NET_DAYS)),
            status: InvoiceStatus::Active,
            notes: self.notes.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Quantity;
    use crate::tax::TaxRate;
    use chrono::TimeZone;

    fn nine_percent() -> TaxPolicy {
        TaxPolicy::new(TaxRate::from_bps(900))
    }

    fn line(description: &str, qty: i64, price_cents: i64) -> LineItem {
        LineItem::new(
            description,
            Quantity::from_whole(qty),
            Money::from_cents(price_cents),
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn sample_invoice() -> Invoice {
        Invoice::new(
            "INV-2025-001",
            ClientSnapshot::new("Acme Corporation"),
            vec![line("Web Development Services", 40, 25_000)],
            &nine_percent(),
            date(2025, 3, 1),
            None,
            "Thank you for your business!",
        )
        .unwrap()
    }

    fn sample_estimate() -> Estimate {
        Estimate::new(
            "EST-2025-001",
            ClientSnapshot::new("New Client Corp"),
            vec![
                line("Website Development", 30, 25_000),
                line("SEO Services", 10, 10_000),
            ],
            &nine_percent(),
            date(2025, 3, 1),
            None,
            "Valid for 30 days",
        )
        .unwrap()
    }

    #[test]
    fn test_creation_validation() {
        let policy = nine_percent();
        let items = vec![line("x", 1, 100)];

        // Blank number
        assert!(Invoice::new(
            "  ",
            ClientSnapshot::new("Acme"),
            items.clone(),
            &policy,
            date(2025, 1, 1),
            None,
            "",
        )
        .is_err());

        // Blank client name
        assert!(Invoice::new(
            "INV-2025-001",
            ClientSnapshot::new("   "),
            items.clone(),
            &policy,
            date(2025, 1, 1),
            None,
            "",
        )
        .is_err());

        // Empty item list
        assert!(matches!(
            Invoice::new(
                "INV-2025-001",
                ClientSnapshot::new("Acme"),
                Vec::new(),
                &policy,
                date(2025, 1, 1),
                None,
                "",
            ),
            Err(CoreError::EmptyItems)
        ));

        // Number is stored trimmed
        let invoice = Invoice::new(
            " INV-2025-009 ",
            ClientSnapshot::new("Acme"),
            items,
            &policy,
            date(2025, 1, 1),
            None,
            "",
        )
        .unwrap();
        assert_eq!(invoice.number(), "INV-2025-009");
    }

    #[test]
    fn test_due_date_defaults_to_net_30() {
        let invoice = sample_invoice();
        assert_eq!(invoice.due_date(), invoice.date() + Duration::days(30));

        let estimate = sample_estimate();
        assert_eq!(estimate.expiry_date(), estimate.date() + Duration::days(30));
    }

    #[test]
    fn test_total_always_amount_plus_tax() {
        let policy = nine_percent();
        let mut invoice = sample_invoice();
        assert_eq!(invoice.total(), invoice.amount() + invoice.tax());

        invoice
            .add_item(line("UI/UX Design", 20, 12_500), &policy)
            .unwrap();
        assert_eq!(invoice.total(), invoice.amount() + invoice.tax());
        assert_eq!(invoice.amount().cents(), 1_250_000);
        assert_eq!(invoice.tax().cents(), 112_500);
    }

    #[test]
    fn test_record_payment_partial_and_over() {
        // total = $109.00
        let policy = nine_percent();
        let base = Invoice::new(
            "INV-2025-010",
            ClientSnapshot::new("Acme"),
            vec![line("Service", 1, 10_000)],
            &policy,
            date(2025, 3, 1),
            None,
            "",
        )
        .unwrap();
        assert_eq!(base.total().cents(), 10_900);
        assert_eq!(base.remaining_amount().cents(), 10_900);

        // Partial payment: $100.00 leaves $9.00
        let mut partial = base.clone();
        partial
            .record_payment(
                PaymentMethod::Check,
                Money::from_cents(10_000),
                date(2025, 3, 5),
            )
            .unwrap();
        assert!(partial.is_paid());
        assert_eq!(partial.remaining_amount().cents(), 900);

        // Exact payment leaves zero
        let mut exact = base.clone();
        exact
            .record_payment(
                PaymentMethod::Cash,
                Money::from_cents(10_900),
                date(2025, 3, 5),
            )
            .unwrap();
        assert_eq!(exact.remaining_amount().cents(), 0);

        // Overpayment floors at zero
        let mut over = base.clone();
        over.record_payment(
            PaymentMethod::BankTransfer,
            Money::from_cents(15_000),
            date(2025, 3, 5),
        )
        .unwrap();
        assert_eq!(over.remaining_amount().cents(), 0);
    }

    #[test]
    fn test_payment_does_not_touch_totals() {
        let mut invoice = sample_invoice();
        let (amount, tax) = (invoice.amount(), invoice.tax());

        invoice
            .record_payment(
                PaymentMethod::CreditCard,
                Money::from_cents(1_000),
                date(2025, 4, 1),
            )
            .unwrap();
        assert_eq!(invoice.amount(), amount);
        assert_eq!(invoice.tax(), tax);
    }

    #[test]
    fn test_cannot_pay_twice() {
        let mut invoice = sample_invoice();
        invoice
            .record_payment(
                PaymentMethod::Cash,
                Money::from_cents(100),
                date(2025, 4, 1),
            )
            .unwrap();

        let err = invoice
            .record_payment(
                PaymentMethod::Cash,
                Money::from_cents(100),
                date(2025, 4, 2),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatus { .. }));
    }

    #[test]
    fn test_paid_status_carries_payment_info() {
        let mut invoice = sample_invoice();
        invoice
            .record_payment(
                PaymentMethod::TapToPay,
                Money::from_cents(1_090_000),
                date(2025, 4, 2),
            )
            .unwrap();

        match invoice.status() {
            InvoiceStatus::Paid {
                method,
                paid_date,
                amount,
            } => {
                assert_eq!(*method, PaymentMethod::TapToPay);
                assert_eq!(*paid_date, date(2025, 4, 2));
                assert_eq!(amount.cents(), 1_090_000);
            }
            other => panic!("expected Paid, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_transaction() {
        let mut invoice = sample_invoice();

        // Cancelled transactions leave the invoice untouched
        let cancelled = TransactionResult {
            status: TransactionStatus::Cancelled,
            amount: Money::from_cents(500),
            timestamp: date(2025, 4, 2),
            reference: "TXN-X".to_string(),
        };
        assert!(matches!(
            invoice.apply_transaction(PaymentMethod::TapToPay, &cancelled),
            Err(CoreError::TransactionNotSuccessful { .. })
        ));
        assert!(!invoice.is_paid());

        // Successful transactions record and return a ledger entry
        let success = TransactionResult {
            status: TransactionStatus::Success,
            amount: Money::from_cents(1_090_000),
            timestamp: date(2025, 4, 3),
            reference: "TXN-2025-001".to_string(),
        };
        let payment = invoice
            .apply_transaction(PaymentMethod::TapToPay, &success)
            .unwrap();
        assert!(invoice.is_paid());
        assert_eq!(payment.invoice_number, "INV-2025-001");
        assert_eq!(payment.client_name, "Acme Corporation");
        assert_eq!(payment.amount.cents(), 1_090_000);
        assert_eq!(payment.reference, "TXN-2025-001");
    }

    #[test]
    fn test_estimate_approval_flow() {
        let mut estimate = sample_estimate();
        assert_eq!(estimate.status(), EstimateStatus::Pending);

        estimate.approve().unwrap();
        assert_eq!(estimate.status(), EstimateStatus::Approved);

        // Approved is terminal
        assert!(estimate.approve().is_err());
        assert!(estimate.decline().is_err());
    }

    #[test]
    fn test_declined_is_terminal() {
        let mut estimate = sample_estimate();
        estimate.decline().unwrap();
        assert_eq!(estimate.status(), EstimateStatus::Declined);

        let err = estimate.approve().unwrap_err();
        match err {
            CoreError::InvalidStatus { status, .. } => assert_eq!(status, "Declined"),
            other => panic!("expected InvalidStatus, got {:?}", other),
        }
        assert_eq!(estimate.status(), EstimateStatus::Declined);
    }

    #[test]
    fn test_conversion_fidelity() {
        let mut estimate = sample_estimate();
        estimate.approve().unwrap();

        // amount = 30×$250 + 10×$100 = $8,500.00; tax 9% = $765.00
        assert_eq!(estimate.amount().cents(), 850_000);
        assert_eq!(estimate.tax().cents(), 76_500);

        let existing = ["INV-2025-001", "INV-2025-002"];
        let invoice = estimate.convert_to_invoice(existing, date(2025, 6, 1), None);

        // Amount and tax preserved exactly, fresh invoice number, Active
        assert_eq!(invoice.amount().cents(), 850_000);
        assert_eq!(invoice.tax().cents(), 76_500);
        assert_eq!(invoice.number(), "INV-2025-003");
        assert_ne!(invoice.number(), estimate.number());
        assert_eq!(*invoice.status(), InvoiceStatus::Active);
        assert_eq!(invoice.due_date(), date(2025, 6, 1) + Duration::days(30));

        // Client snapshot and items copied; item identities are fresh
        assert_eq!(invoice.client(), estimate.client());
        assert_eq!(invoice.items().len(), estimate.items().len());
        for (a, b) in invoice.items().items().iter().zip(estimate.items().items()) {
            assert_ne!(a.id(), b.id());
            assert_eq!(a.description(), b.description());
            assert_eq!(a.quantity(), b.quantity());
            assert_eq!(a.unit_price(), b.unit_price());
        }

        // The estimate itself is untouched
        assert_eq!(estimate.status(), EstimateStatus::Approved);
    }

    #[test]
    fn test_conversion_preserves_tax_snapshot_not_current_rate() {
        // An estimate taxed at 9% converts with its own snapshot even if
        // today's configured rate differs.
        let estimate = sample_estimate();
        let invoice = estimate.convert_to_invoice([], date(2025, 6, 1), None);
        assert_eq!(invoice.tax(), estimate.tax());
        assert_eq!(invoice.total(), estimate.total());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut invoice = sample_invoice();
        invoice
            .record_payment(
                PaymentMethod::BankTransfer,
                Money::from_cents(500_000),
                date(2025, 4, 9),
            )
            .unwrap();

        let json = serde_json::to_string(&invoice).unwrap();
        let back: Invoice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, invoice);
        assert_eq!(back.remaining_amount(), invoice.remaining_amount());
    }
}
