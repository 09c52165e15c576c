//! # facture-store: Persistence Layer for Facture
//!
//! This crate persists the facture-core record types. It uses SQLite for
//! local storage with sqlx for async operations, plus an in-memory backend
//! for tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Facture Data Flow                                │
//! │                                                                         │
//! │  Host application (editors, payment sheet, renderers)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   facture-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (generic)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SqliteStore   │    │ 001_docs.sql │  │   │
//! │  │   │ WAL mode      │    │ MemoryStore   │    │ ...          │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ broadcast                     │   │
//! │  │                                ▼                               │   │
//! │  │                          ChangeEvent ──► observers re-read     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (one flat `documents` table of JSON payloads)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - The generic Record/Repository traits and change events
//! - [`sqlite`] - SQLite-backed store
//! - [`memory`] - In-memory store for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use facture_core::Invoice;
//! use facture_store::{Database, DbConfig, Repository};
//!
//! // Create database with default config (runs migrations)
//! let db = Database::new(DbConfig::new("path/to/facture.db")).await?;
//!
//! // One store over every record kind
//! let store = db.store();
//! store.put(&invoice).await?;
//! let invoices: Vec<Invoice> = store.list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use repository::{ChangeEvent, ChangeKind, Record, Repository};
pub use sqlite::SqliteStore;
