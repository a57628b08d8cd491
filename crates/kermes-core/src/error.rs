//! # Error Types
//!
//! Domain-specific error types for kermes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kermes-core errors (this file)                                        │
//! │  ├── CoreError        - Domain failures (corrupt snapshot, ...)        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kermes-db errors                                                      │
//! │  └── StoreError       - InitFailed / WriteFailed / ReadFailed          │
//! │                                                                         │
//! │  kermes-print errors                                                   │
//! │  └── PrintError       - PrintFailed / InvalidCart / config             │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError / PrintError → ApiError → UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted cart snapshot could not be decoded back into cart items.
    ///
    /// ## When This Occurs
    /// - The `items_snapshot` column was edited by hand
    /// - A snapshot written by an incompatible build
    #[error("Snapshot of transaction {id} is corrupt: {reason}")]
    CorruptSnapshot { id: i64, reason: String },

    /// A cart could not be encoded into a snapshot.
    #[error("Failed to encode cart snapshot: {0}")]
    SnapshotEncoding(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// They are raised before anything reaches the ledger or the printer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A computed amount or unit count does not fit in 64 bits.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Declared total does not match the computed line totals.
    #[error("total {declared} does not match line totals {computed}")]
    TotalMismatch { declared: i64, computed: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CorruptSnapshot {
            id: 7,
            reason: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Snapshot of transaction 7 is corrupt: expected value"
        );

        let err = ValidationError::TotalMismatch {
            declared: 900,
            computed: 1000,
        };
        assert_eq!(err.to_string(), "total 900 does not match line totals 1000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "payment_method".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
