//! # API Error Type
//!
//! Unified error type for register operations, shaped for a UI layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kermes POS                             │
//! │                                                                         │
//! │  Register::record_sale ── StoreError ──┐                               │
//! │                                        ├──► ApiError { code, message } │
//! │  Register::print_cart ─── PrintError ──┘          │                    │
//! │                                                    ▼                    │
//! │                                   UI shows `message`, branches on      │
//! │                                   `code` (e.g. offer "print again")    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage details are logged here and replaced by a generic message;
//! validation messages are passed through because the cashier can act on
//! them.

use kermes_db::StoreError;
use kermes_print::PrintError;
use serde::Serialize;

/// Error returned from register operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PRINT_ERROR",
///   "message": "Failed to print receipt. Please try again."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Ledger could not be opened, written or read
    DatabaseError,

    /// Receipt did not reach the printer
    PrintError,

    /// Printer settings could not be loaded, saved or were invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts ledger errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InitFailed(e) => {
                tracing::error!("Ledger initialization failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Sales ledger is unavailable")
            }
            StoreError::WriteFailed(e) => {
                tracing::error!("Ledger write failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not record the sale")
            }
            StoreError::ReadFailed(e) => {
                tracing::error!("Ledger read failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not read the sales ledger")
            }
            StoreError::InvalidTransaction(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts printing errors to API errors.
impl From<PrintError> for ApiError {
    fn from(err: PrintError) -> Self {
        match err {
            PrintError::PrintFailed(e) => {
                tracing::warn!("Print failed: {}", e);
                ApiError::new(
                    ErrorCode::PrintError,
                    "Failed to print receipt. Please try again.",
                )
            }
            PrintError::InvalidCart(e) => ApiError::validation(e.to_string()),
            e @ (PrintError::ConfigLoadFailed(_)
            | PrintError::ConfigSaveFailed(_)
            | PrintError::InvalidConfig(_)) => ApiError::new(ErrorCode::ConfigError, e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use kermes_core::ValidationError;

    #[test]
    fn test_store_errors_hide_details() {
        let api: ApiError = StoreError::WriteFailed("disk I/O error at page 7".into()).into();
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert!(!api.message.contains("page 7"));
    }

    #[test]
    fn test_validation_passes_through() {
        let api: ApiError = StoreError::InvalidTransaction(ValidationError::Required {
            field: "payment_method".into(),
        })
        .into();
        assert_eq!(api, ApiError::validation("payment_method is required"));
    }

    #[test]
    fn test_print_failure_message() {
        let api: ApiError = PrintError::PrintFailed("TSP100III declined the job".into()).into();
        assert_eq!(api.code, ErrorCode::PrintError);
        assert_eq!(api.message, "Failed to print receipt. Please try again.");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(ApiError::new(ErrorCode::ConfigError, "bad width")).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "CONFIG_ERROR", "message": "bad width" }));
    }
}
