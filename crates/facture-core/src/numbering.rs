//! # Document Numbering Engine
//!
//! Generates the next sequential, year-scoped document number for invoices
//! and estimates.
//!
//! ## Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Number Format                                       │
//! │                                                                         │
//! │      INV-2025-001                EST-2025-007                          │
//! │      ─┬─ ──┬─ ─┬─                                                      │
//! │       │    │   └── sequence, zero-padded to 3 digits minimum           │
//! │       │    └────── 4-digit calendar year                               │
//! │       └─────────── kind prefix: INV or EST                             │
//! │                                                                         │
//! │  The "<PREFIX>-<YEAR>-" scope key is a stable micro-protocol against   │
//! │  persisted data: collision detection depends on this exact spelling.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not a Counter
//! The next number is re-derived from the full collection on every call
//! (filter → parse → max + 1). That self-heals when documents are deleted
//! or created out of order, at the cost of needing the collection in
//! memory - the right trade-off for a single-user or small-team dataset.
//! Under concurrent multi-writer sync the read-max-add-one scheme has a
//! race window; that deployment needs a server-side atomic counter or
//! optimistic retry on a uniqueness conflict when persisting.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Document Kind
// =============================================================================

/// The two document kinds, each with an independent numbering sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Estimate,
}

impl DocumentKind {
    /// The number prefix for this kind.
    #[inline]
    pub const fn prefix(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Estimate => "EST",
        }
    }

    /// The collection name this kind is persisted under.
    #[inline]
    pub const fn collection(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoices",
            DocumentKind::Estimate => "estimates",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Invoice => write!(f, "invoice"),
            DocumentKind::Estimate => write!(f, "estimate"),
        }
    }
}

// =============================================================================
// Number Generation
// =============================================================================

/// The `"<PREFIX>-<YEAR>-"` scope key for a kind and calendar year.
pub fn scope_key(kind: DocumentKind, year: i32) -> String {
    format!("{}-{:04}-", kind.prefix(), year)
}

/// Returns the next available number for a new document of `kind` in `year`.
///
/// ## Algorithm
/// 1. Keep only numbers starting with the scope key
/// 2. Parse each numeric suffix; entries that don't parse are skipped -
///    a hand-edited number must never crash the sequence
/// 3. Take the maximum (0 when none exist this year) and add one
/// 4. Format zero-padded to 3 digits minimum; the minimum-width pad widens
///    by itself past 999, so `INV-2025-1000` follows `INV-2025-999` - the
///    sequence is never truncated back into collisions
///
/// ## Example
/// ```rust
/// use facture_core::numbering::{next_number, DocumentKind};
///
/// let existing = ["INV-2025-001", "INV-2025-002", "INV-2025-005"];
/// assert_eq!(
///     next_number(DocumentKind::Invoice, existing, 2025),
///     "INV-2025-006"
/// );
/// ```
pub fn next_number<'a, I>(kind: DocumentKind, existing: I, year: i32) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let scope = scope_key(kind, year);

    let max = existing
        .into_iter()
        .filter_map(|number| number.strip_prefix(scope.as_str()))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    format!("{}{:03}", scope, max + 1)
}

/// Resolves the number a document is saved under.
///
/// An explicit user override is preserved verbatim (whitespace-trimmed);
/// a field left blank falls back to the generated number.
pub fn resolve_number(user_input: &str, generated: &str) -> String {
    let trimmed = user_input.trim();
    if trimmed.is_empty() {
        generated.to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number_of_the_year() {
        assert_eq!(
            next_number(DocumentKind::Invoice, [], 2025),
            "INV-2025-001"
        );
        assert_eq!(
            next_number(DocumentKind::Estimate, [], 2025),
            "EST-2025-001"
        );
    }

    #[test]
    fn test_gaps_do_not_reuse_numbers() {
        // Suffixes {1, 2, 5} → next is 006, not 003
        let existing = ["INV-2025-001", "INV-2025-002", "INV-2025-005"];
        assert_eq!(
            next_number(DocumentKind::Invoice, existing, 2025),
            "INV-2025-006"
        );
    }

    #[test]
    fn test_malformed_suffixes_are_skipped() {
        let existing = ["INV-2025-abc", "INV-2025-002", "INV-2025-"];
        assert_eq!(
            next_number(DocumentKind::Invoice, existing, 2025),
            "INV-2025-003"
        );
    }

    #[test]
    fn test_year_scoping_restarts_sequence() {
        let existing = ["INV-2024-010"];
        assert_eq!(
            next_number(DocumentKind::Invoice, existing, 2025),
            "INV-2025-001"
        );
        assert_eq!(
            next_number(DocumentKind::Invoice, existing, 2024),
            "INV-2024-011"
        );
    }

    #[test]
    fn test_kinds_have_independent_sequences() {
        let existing = ["EST-2025-004"];
        assert_eq!(
            next_number(DocumentKind::Invoice, existing, 2025),
            "INV-2025-001"
        );
    }

    #[test]
    fn test_padding_widens_past_999() {
        let existing = ["INV-2025-999"];
        assert_eq!(
            next_number(DocumentKind::Invoice, existing, 2025),
            "INV-2025-1000"
        );

        let existing = ["INV-2025-1000"];
        assert_eq!(
            next_number(DocumentKind::Invoice, existing, 2025),
            "INV-2025-1001"
        );
    }

    #[test]
    fn test_resolve_number_override() {
        // Blank or whitespace-only input uses the generated number
        assert_eq!(resolve_number("", "INV-2025-006"), "INV-2025-006");
        assert_eq!(resolve_number("   ", "INV-2025-006"), "INV-2025-006");

        // Explicit override wins, trimmed only
        assert_eq!(
            resolve_number("  CUSTOM-42 ", "INV-2025-006"),
            "CUSTOM-42"
        );
    }

    #[test]
    fn test_scope_key_is_exact() {
        assert_eq!(scope_key(DocumentKind::Invoice, 2025), "INV-2025-");
        assert_eq!(scope_key(DocumentKind::Estimate, 2025), "EST-2025-");
    }
}
