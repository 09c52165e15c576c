//! # Line Items and the Totals Engine
//!
//! One billable row (`LineItem`) and the ordered list that owns them
//! (`ItemList`), which doubles as the document totals engine.
//!
//! ## Staleness Is Structurally Impossible
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Totals Engine Invariant                              │
//! │                                                                         │
//! │  Every mutation entry point recomputes the snapshot before returning:  │
//! │                                                                         │
//! │  push(item) ──────┐                                                    │
//! │  remove(id) ──────┤                                                    │
//! │  update(id, f) ───┼──► recompute(policy) ──► amount, tax refreshed     │
//! │  move_item(a, b) ─┤                                                    │
//! │  retax(policy) ───┘                                                    │
//! │                                                                         │
//! │  total() is NEVER stored - it is always amount() + tax().              │
//! │  There is no code path that edits items without refreshing totals.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Numeric Semantics
//! Line values accumulate exactly in i128 milli-cents; the subtotal is
//! rounded to cents exactly once. `line_total()` on an individual item is a
//! display value rounded the same way, so across many fractional-quantity
//! lines the stored subtotal can differ from the sum of displayed line
//! totals by at most a cent - the subtotal is the authoritative value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::{exact_milli_cents, round_milli_cents, Money, Quantity};
use crate::tax::TaxPolicy;
use crate::validation::{validate_item_count, validate_quantity, validate_unit_price};

// =============================================================================
// Line Item
// =============================================================================

/// One billable row: description, quantity, unit price.
///
/// The line total is always derived from quantity × unit price - it is not
/// a field, so it can never go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: Uuid,
    description: String,
    quantity: Quantity,
    unit_price: Money,
}

impl LineItem {
    /// Creates a new line item.
    ///
    /// ## Errors
    /// Rejects negative quantities and negative unit prices - these are
    /// caller contract violations, not recoverable states.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::item::LineItem;
    /// use facture_core::money::{Money, Quantity};
    ///
    /// let item = LineItem::new(
    ///     "Web Development Services",
    ///     Quantity::from_whole(40),
    ///     Money::from_cents(25_000),
    /// ).unwrap();
    /// assert_eq!(item.line_total().cents(), 1_000_000); // $10,000.00
    /// ```
    pub fn new(
        description: impl Into<String>,
        quantity: Quantity,
        unit_price: Money,
    ) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        validate_unit_price(unit_price)?;

        Ok(LineItem {
            id: Uuid::new_v4(),
            description: description.into(),
            quantity,
            unit_price,
        })
    }

    /// Opaque, unique identity. Immutable for the life of the item.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Updates the quantity. Rejects negative values.
    pub fn set_quantity(&mut self, quantity: Quantity) -> CoreResult<()> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Updates the unit price. Rejects negative values.
    pub fn set_unit_price(&mut self, unit_price: Money) -> CoreResult<()> {
        validate_unit_price(unit_price)?;
        self.unit_price = unit_price;
        Ok(())
    }

    /// The derived line total: quantity × unit price, rounded to cents.
    ///
    /// Display value only - the subtotal accumulates the exact products.
    pub fn line_total(&self) -> Money {
        Money::from_cents(round_milli_cents(self.exact_milli_cents()))
    }

    /// Exact line value in milli-cents, for unrounded accumulation.
    pub(crate) fn exact_milli_cents(&self) -> i128 {
        exact_milli_cents(self.unit_price, self.quantity)
    }

    /// Clones the item under a fresh identity.
    ///
    /// Used by estimate→invoice conversion so the two documents never share
    /// mutable item ownership.
    pub(crate) fn clone_with_new_id(&self) -> LineItem {
        LineItem {
            id: Uuid::new_v4(),
            description: self.description.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

// =============================================================================
// Item List (Totals Engine)
// =============================================================================

/// The ordered line items of a document, together with the amount/tax
/// snapshot computed from them.
///
/// ## Invariants
/// - Insertion order is meaningful: it is display and print order
/// - `amount` always equals the rounded sum of exact line values
/// - `tax` always equals the policy applied to `amount` at last mutation
/// - Both are refreshed inside every mutation entry point; `total()` is
///   computed, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    items: Vec<LineItem>,
    amount: Money,
    tax: Money,
}

impl ItemList {
    /// Creates an item list and computes its initial snapshot.
    ///
    /// Defined for the empty list: amount, tax and total are all zero.
    pub fn new(items: Vec<LineItem>, policy: &TaxPolicy) -> CoreResult<Self> {
        validate_item_count(items.len())?;

        let mut list = ItemList {
            items,
            amount: Money::zero(),
            tax: Money::zero(),
        };
        list.recompute(policy)?;
        Ok(list)
    }

    /// An empty list with zero totals.
    pub fn empty() -> Self {
        ItemList {
            items: Vec::new(),
            amount: Money::zero(),
            tax: Money::zero(),
        }
    }

    /// Rebuilds a list from persisted parts without recomputing.
    ///
    /// Conversion and deserialization paths preserve the amount/tax
    /// snapshot verbatim; a later rate change must not silently rewrite an
    /// already-issued document.
    pub(crate) fn from_parts(items: Vec<LineItem>, amount: Money, tax: Money) -> Self {
        ItemList { items, amount, tax }
    }

    /// Appends an item and refreshes the snapshot.
    pub fn push(&mut self, item: LineItem, policy: &TaxPolicy) -> CoreResult<()> {
        validate_item_count(self.items.len() + 1)?;
        self.items.push(item);
        self.recompute(policy)
    }

    /// Removes an item by id and refreshes the snapshot.
    pub fn remove(&mut self, id: Uuid, policy: &TaxPolicy) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(CoreError::ItemNotFound { id })?;

        let removed = self.items.remove(index);
        self.recompute(policy)?;
        Ok(removed)
    }

    /// Edits an item in place and refreshes the snapshot.
    ///
    /// The closure works on the item through its validated setters, so an
    /// edit can fail without leaving stale totals behind: the snapshot is
    /// recomputed from whatever state the items are in when the closure
    /// returns.
    pub fn update<F>(&mut self, id: Uuid, f: F, policy: &TaxPolicy) -> CoreResult<()>
    where
        F: FnOnce(&mut LineItem) -> CoreResult<()>,
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(CoreError::ItemNotFound { id })?;

        let result = f(item);
        self.recompute(policy)?;
        result
    }

    /// Moves an item to a new position (drag-to-reorder).
    ///
    /// Order never changes the sum, but the snapshot is refreshed anyway -
    /// recompute is idempotent and keeping one code path is cheaper than
    /// proving each mutation pure.
    pub fn move_item(&mut self, from: usize, to: usize, policy: &TaxPolicy) -> CoreResult<()> {
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(CoreError::Validation(
                crate::error::ValidationError::OutOfRange {
                    field: "item position".to_string(),
                    min: 0,
                    max: len.saturating_sub(1) as i64,
                },
            ));
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.recompute(policy)
    }

    /// Re-snapshots amount and tax under the given policy.
    ///
    /// Called when the configured rate changes and the user asks for the
    /// draft to be refreshed under it.
    pub fn retax(&mut self, policy: &TaxPolicy) -> CoreResult<()> {
        self.recompute(policy)
    }

    /// The totals engine: subtotal from exact line accumulation, then tax.
    fn recompute(&mut self, policy: &TaxPolicy) -> CoreResult<()> {
        let exact: i128 = self.items.iter().map(|item| item.exact_milli_cents()).sum();
        let rounded = if exact >= 0 {
            (exact + 500) / 1000
        } else {
            (exact - 500) / 1000
        };

        // A realistic document can't overflow i64 cents, but a corrupted
        // one must fail loudly instead of wrapping.
        let cents = i64::try_from(rounded).map_err(|_| CoreError::AmountOverflow)?;

        self.amount = Money::from_cents(cents);
        self.tax = policy.tax(self.amount);
        Ok(())
    }

    /// Subtotal: sum of line values at last mutation.
    #[inline]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Tax: policy applied to the subtotal at last mutation.
    #[inline]
    pub fn tax(&self) -> Money {
        self.tax
    }

    /// Grand total. Always `amount + tax`, never stored.
    #[inline]
    pub fn total(&self) -> Money {
        self.amount + self.tax
    }

    /// The items in display/print order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
