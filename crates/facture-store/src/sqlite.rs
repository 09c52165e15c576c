//! # SQLite Store
//!
//! The durable [`Repository`] backend. Every record kind lives in one flat
//! `documents` table as a JSON payload keyed by (collection, id):
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      documents table                                    │
//! │                                                                         │
//! │  collection   id          payload                        updated_at    │
//! │  ──────────   ──────────  ────────────────────────────   ─────────────  │
//! │  invoices     9b2f…       {"number":"INV-2025-001",…}    2025-03-01…   │
//! │  invoices     4c81…       {"number":"INV-2025-002",…}    2025-03-04…   │
//! │  estimates    77aa…       {"number":"EST-2025-001",…}    2025-03-02…   │
//! │  clients      d905…       {"name":"John Smith",…}        2025-02-11…   │
//! │                                                                         │
//! │  The store never indexes into the payload. Filtering, numbering and    │
//! │  totals are core concerns computed over deserialized records.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are last-write-wins upserts; each write broadcasts a
//! [`ChangeEvent`] to every subscriber of this store (clones included).

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::repository::{ChangeEvent, ChangeKind, Record, Repository};

/// Capacity of the change event channel before slow receivers lag.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// SQLite-backed repository over the `documents` table.
///
/// Cloning is cheap; clones share the pool and the event channel.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    events: broadcast::Sender<ChangeEvent>,
}

impl SqliteStore {
    /// Creates a store over an existing pool.
    ///
    /// Each call creates an independent event channel; obtain the store
    /// once (or via [`crate::Database::store`]) and clone it so observers
    /// share one channel.
    pub fn new(pool: SqlitePool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        SqliteStore { pool, events }
    }

    /// The underlying pool, for queries the store doesn't cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn broadcast(&self, collection: &'static str, id: Uuid, kind: ChangeKind) {
        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.events.send(ChangeEvent {
            collection,
            id,
            kind,
        });
    }
}

impl<T: Record> Repository<T> for SqliteStore {
    async fn get(&self, id: Uuid) -> StoreResult<Option<T>> {
        let row = sqlx::query(
            r#"
            SELECT payload
            FROM documents
            WHERE collection = ?1 AND id = ?2
            "#,
        )
        .bind(T::COLLECTION)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let payload: String = row.try_get("payload")?;
                Ok(Some(serde_json::from_str(&payload)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        let rows = sqlx::query(
            r#"
            SELECT payload
            FROM documents
            WHERE collection = ?1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(T::COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let payload: String = row.try_get("payload")?;
                Ok(serde_json::from_str(&payload)?)
            })
            .collect()
    }

    async fn put(&self, record: &T) -> StoreResult<()> {
        let id = record.record_id();
        let payload = serde_json::to_string(record)?;
        let updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, payload, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (collection, id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(T::COLLECTION)
        .bind(id.to_string())
        .bind(payload)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        debug!(collection = T::COLLECTION, %id, "Record stored");
        self.broadcast(T::COLLECTION, id, ChangeKind::Put);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = ?1 AND id = ?2
            "#,
        )
        .bind(T::COLLECTION)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        let existed = result.rows_affected() > 0;
        if existed {
            debug!(collection = T::COLLECTION, %id, "Record deleted");
            self.broadcast(T::COLLECTION, id, ChangeKind::Delete);
        }
        Ok(existed)
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Datelike, TimeZone};
    use facture_core::numbering::{next_number, DocumentKind};
    use facture_core::{
        ClientSnapshot, Estimate, Invoice, LineItem, Money, PaymentMethod, Quantity, TaxPolicy,
    };

    async fn test_store() -> SqliteStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.store()
    }

    fn sample_invoice(number: &str) -> Invoice {
        Invoice::new(
            number,
            ClientSnapshot::new("Acme Corporation"),
            vec![LineItem::new(
                "Web Development Services",
                Quantity::from_whole(40),
                Money::from_cents(25_000),
            )
            .unwrap()],
            &TaxPolicy::default(),
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            None,
            "Thank you for your business!",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = test_store().await;
        let invoice = sample_invoice("INV-2025-001");

        store.put(&invoice).await.unwrap();
        let loaded: Option<Invoice> = store.get(invoice.id()).await.unwrap();
        assert_eq!(loaded, Some(invoice));
    }

    #[tokio::test]
    async fn test_paid_invoice_survives_storage() {
        let store = test_store().await;
        let mut invoice = sample_invoice("INV-2025-001");
        invoice
            .record_payment(
                PaymentMethod::BankTransfer,
                Money::from_cents(1_090_000),
                Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
            )
            .unwrap();

        store.put(&invoice).await.unwrap();
        let loaded: Invoice = store.get(invoice.id()).await.unwrap().unwrap();
        assert!(loaded.is_paid());
        assert_eq!(loaded.remaining_amount(), Money::zero());
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = test_store().await;
        let mut invoice = sample_invoice("INV-2025-001");
        store.put(&invoice).await.unwrap();

        invoice.set_notes("Net 30");
        store.put(&invoice).await.unwrap();

        let invoices: Vec<Invoice> = store.list().await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].notes(), "Net 30");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = test_store().await;
        let invoice = sample_invoice("INV-2025-001");
        store.put(&invoice).await.unwrap();

        assert!(Repository::<Invoice>::delete(&store, invoice.id())
            .await
            .unwrap());
        assert!(!Repository::<Invoice>::delete(&store, invoice.id())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = test_store().await;
        store.put(&sample_invoice("INV-2025-001")).await.unwrap();

        let estimates: Vec<Estimate> = store.list().await.unwrap();
        assert!(estimates.is_empty());
    }

    #[tokio::test]
    async fn test_change_events() {
        let store = test_store().await;
        let mut events = Repository::<Invoice>::subscribe(&store);

        let invoice = sample_invoice("INV-2025-001");
        store.put(&invoice).await.unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.collection, "invoices");
        assert_eq!(event.id, invoice.id());
        assert_eq!(event.kind, ChangeKind::Put);
    }

    #[tokio::test]
    async fn test_numbering_over_stored_collection() {
        // The numbering engine runs over whatever the store holds - gaps
        // from deletions are not reused.
        let store = test_store().await;
        let first = sample_invoice("INV-2025-001");
        let second = sample_invoice("INV-2025-002");
        store.put(&first).await.unwrap();
        store.put(&second).await.unwrap();
        Repository::<Invoice>::delete(&store, first.id())
            .await
            .unwrap();

        let invoices: Vec<Invoice> = store.list().await.unwrap();
        let existing: Vec<&str> = invoices.iter().map(|i| i.number()).collect();
        let next = next_number(DocumentKind::Invoice, existing, first.date().year());
        assert_eq!(next, "INV-2025-003");
    }
}
