//! # In-Memory Store
//!
//! A `HashMap`-backed [`Repository`] implementation. Used by tests and by
//! callers that want the full storage behavior (including change events)
//! without touching disk.
//!
//! Records are held as `serde_json::Value`, the same payload shape the
//! SQLite backend persists, so the two backends can't drift apart on what
//! a stored record looks like.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::repository::{ChangeEvent, ChangeKind, Record, Repository};

/// Capacity of the change event channel before slow receivers lag.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// In-memory repository backend.
///
/// Cloning is cheap and clones share the same data and event channel.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<(&'static str, Uuid), serde_json::Value>>>,
    events: broadcast::Sender<ChangeEvent>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        MemoryStore {
            records: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
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

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl<T: Record> Repository<T> for MemoryStore {
    async fn get(&self, id: Uuid) -> StoreResult<Option<T>> {
        let records = self.records.read().await;
        match records.get(&(T::COLLECTION, id)) {
            Some(payload) => Ok(Some(serde_json::from_value(payload.clone())?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|((collection, _), _)| *collection == T::COLLECTION)
            .map(|(_, payload)| Ok(serde_json::from_value(payload.clone())?))
            .collect()
    }

    async fn put(&self, record: &T) -> StoreResult<()> {
        let id = record.record_id();
        let payload = serde_json::to_value(record)?;

        let mut records = self.records.write().await;
        records.insert((T::COLLECTION, id), payload);
        drop(records);

        debug!(collection = T::COLLECTION, %id, "Record stored");
        self.broadcast(T::COLLECTION, id, ChangeKind::Put);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let existed = records.remove(&(T::COLLECTION, id)).is_some();
        drop(records);

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
    use chrono::Utc;
    use facture_core::{Client, ClientSnapshot, Invoice, LineItem, Money, Quantity, TaxPolicy};

    fn sample_invoice(number: &str) -> Invoice {
        Invoice::new(
            number,
            ClientSnapshot::new("Acme Corporation"),
            vec![LineItem::new(
                "Consulting",
                Quantity::from_whole(2),
                Money::from_cents(10_000),
            )
            .unwrap()],
            &TaxPolicy::default(),
            Utc::now(),
            None,
            "",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = MemoryStore::new();
        let invoice = sample_invoice("INV-2025-001");

        store.put(&invoice).await.unwrap();
        let loaded: Option<Invoice> = store.get(invoice.id()).await.unwrap();
        assert_eq!(loaded, Some(invoice));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Invoice> = store.get(Uuid::new_v4()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store.put(&sample_invoice("INV-2025-001")).await.unwrap();
        store.put(&Client::new("John Smith")).await.unwrap();

        let invoices: Vec<Invoice> = store.list().await.unwrap();
        let clients: Vec<Client> = store.list().await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(clients.len(), 1);
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = MemoryStore::new();
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
        let store = MemoryStore::new();
        let invoice = sample_invoice("INV-2025-001");
        store.put(&invoice).await.unwrap();

        assert!(Repository::<Invoice>::delete(&store, invoice.id())
            .await
            .unwrap());
        assert!(!Repository::<Invoice>::delete(&store, invoice.id())
            .await
            .unwrap());

        let loaded: Option<Invoice> = store.get(invoice.id()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_change_events() {
        let store = MemoryStore::new();
        let mut events = Repository::<Invoice>::subscribe(&store);

        let invoice = sample_invoice("INV-2025-001");
        store.put(&invoice).await.unwrap();
        Repository::<Invoice>::delete(&store, invoice.id())
            .await
            .unwrap();

        let put = events.recv().await.unwrap();
        assert_eq!(put.collection, "invoices");
        assert_eq!(put.id, invoice.id());
        assert_eq!(put.kind, ChangeKind::Put);

        let delete = events.recv().await.unwrap();
        assert_eq!(delete.kind, ChangeKind::Delete);
    }
}
