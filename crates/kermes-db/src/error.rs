//! # Ledger Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / MigrateError / CoreError                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← categorized by the operation that failed   │
//! │       │     InitFailed   - pool could not be opened or migrated        │
//! │       │     WriteFailed  - append did not commit                       │
//! │       │     ReadFailed   - listing/aggregation could not read          │
//! │       ▼                                                                 │
//! │  ApiError (register app) ← serialized for the UI                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same `sqlx::Error` can mean different things depending on whether
//! it surfaced while opening, writing or reading, so there is no blanket
//! `From<sqlx::Error>`; each call site picks the category.

use kermes_core::ValidationError;
use thiserror::Error;

/// Transaction ledger errors. All are recoverable by the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage could not be opened or migrated.
    ///
    /// ## When This Occurs
    /// - Parent directory of the database file is missing or read-only
    /// - The path points at a directory
    /// - A migration failed
    ///
    /// The store stays uninitialized; the next call tries again.
    #[error("Ledger initialization failed: {0}")]
    InitFailed(String),

    /// An append did not durably commit. No record is visible.
    #[error("Ledger write failed: {0}")]
    WriteFailed(String),

    /// A listing or aggregation query could not read the ledger.
    #[error("Ledger read failed: {0}")]
    ReadFailed(String),

    /// The transaction was rejected before reaching storage.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] ValidationError),
}

impl StoreError {
    pub(crate) fn init(err: impl std::fmt::Display) -> Self {
        StoreError::InitFailed(err.to_string())
    }

    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        StoreError::WriteFailed(err.to_string())
    }

    pub(crate) fn read(err: impl std::fmt::Display) -> Self {
        StoreError::ReadFailed(err.to_string())
    }

    /// Whether calling the same operation again may succeed.
    ///
    /// Storage failures may be transient; a rejected transaction will be
    /// rejected again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, StoreError::InvalidTransaction(_))
    }
}

/// Result type for ledger operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(StoreError::InitFailed("disk".into()).is_retryable());
        assert!(StoreError::WriteFailed("full".into()).is_retryable());
        assert!(StoreError::ReadFailed("io".into()).is_retryable());

        let rejected: StoreError = ValidationError::Required {
            field: "payment_method".into(),
        }
        .into();
        assert!(!rejected.is_retryable());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            StoreError::write("database is locked").to_string(),
            "Ledger write failed: database is locked"
        );
    }
}
