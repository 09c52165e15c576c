//! # Generic Record Repository
//!
//! One repository abstraction over every record kind. Invoices, estimates,
//! clients and payments all share the same storage shape - a collection
//! name plus a JSON payload - so they share one trait pair instead of a
//! per-entity interface each.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Abstraction                               │
//! │                                                                         │
//! │  Record (what can be stored)          Repository<T> (where)            │
//! │  ┌─────────────────────────┐          ┌──────────────────────────┐     │
//! │  │ COLLECTION: "invoices"  │          │ get / list / put / delete│     │
//! │  │ record_id() → Uuid      │ ───────► │ subscribe() → events     │     │
//! │  │ Serialize + Deserialize │          └──────────────────────────┘     │
//! │  └─────────────────────────┘                   │                        │
//! │                                    ┌───────────┴───────────┐           │
//! │                                    ▼                       ▼           │
//! │                              SqliteStore             MemoryStore       │
//! │                              (documents table)       (HashMap, tests)  │
//! │                                                                         │
//! │  Every write broadcasts a ChangeEvent; observers re-read what they     │
//! │  care about. No per-entity repository traits, ever.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use facture_core::{Client, Estimate, Invoice, Payment};

use crate::error::StoreResult;

// =============================================================================
// Record
// =============================================================================

/// A value that can be persisted: a collection name plus a stable identity.
///
/// The payload shape is whatever the type serializes to - the store never
/// looks inside it.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection this record kind lives in.
    const COLLECTION: &'static str;

    /// The record's stable identity within its collection.
    fn record_id(&self) -> Uuid;
}

impl Record for Invoice {
    const COLLECTION: &'static str = "invoices";

    fn record_id(&self) -> Uuid {
        self.id()
    }
}

impl Record for Estimate {
    const COLLECTION: &'static str = "estimates";

    fn record_id(&self) -> Uuid {
        self.id()
    }
}

impl Record for Client {
    const COLLECTION: &'static str = "clients";

    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Record for Payment {
    const COLLECTION: &'static str = "payments";

    fn record_id(&self) -> Uuid {
        self.id
    }
}

// =============================================================================
// Change Events
// =============================================================================

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Inserted or replaced.
    Put,
    /// Removed.
    Delete,
}

/// A persisted change, broadcast to every subscriber.
///
/// Carries identity only, not the payload - an observer re-reads the
/// records it cares about, which keeps a slow subscriber from pinning
/// large payloads in the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: &'static str,
    pub id: Uuid,
    pub kind: ChangeKind,
}

// =============================================================================
// Repository
// =============================================================================

/// Storage operations over one record kind.
///
/// Implemented generically by each backend, so `SqliteStore` is a
/// `Repository<Invoice>`, a `Repository<Estimate>` and so on through one
/// blanket impl each.
#[allow(async_fn_in_trait)]
pub trait Repository<T: Record> {
    /// Fetches one record by id. `Ok(None)` when absent.
    async fn get(&self, id: Uuid) -> StoreResult<Option<T>>;

    /// Fetches every record in the collection.
    async fn list(&self) -> StoreResult<Vec<T>>;

    /// Inserts or replaces a record (last write wins), then broadcasts.
    async fn put(&self, record: &T) -> StoreResult<()>;

    /// Deletes a record by id, then broadcasts. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Subscribes to change events across ALL collections of this backend.
    ///
    /// Filter on [`ChangeEvent::collection`] to watch one kind. A receiver
    /// that falls behind sees `RecvError::Lagged` and should re-read.
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
