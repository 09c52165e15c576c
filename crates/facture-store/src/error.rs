//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error) / JSON Error (serde_json::Error)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Host application maps it to its own surface                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
///
/// These errors wrap sqlx and serde_json errors and provide additional
/// context for debugging and user feedback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found in the store.
    ///
    /// ## When This Occurs
    /// - An operation requires the record to exist and it doesn't
    /// - ID was deleted by another code path
    #[error("{collection} record not found: {id}")]
    NotFound { collection: String, id: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A persisted payload could not be (de)serialized.
    ///
    /// ## When This Occurs
    /// - Hand-edited or corrupted payload JSON
    /// - Reading data written by an incompatible newer version
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a collection and record id.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → StoreError::NotFound
/// sqlx::Error::Database       → StoreError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StoreError::PoolExhausted
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                collection: "unknown".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
