//! # kermes-core: Pure Business Logic for Kermes POS
//!
//! Everything in this crate is deterministic and free of I/O: the cart
//! value types, the ledger record shape, the statistics derived from the
//! ledger, and the receipt printer control-code encoder.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kermes POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Register (apps/kermes-register)                 │   │
//! │  │        print_cart ───────────────┐     record_sale ──┐          │   │
//! │  └──────────────────────────────────┼───────────────────┼──────────┘   │
//! │                                     │                   │              │
//! │  ┌──────────────────────────────────▼──┐ ┌──────────────▼───────────┐  │
//! │  │ kermes-print (PrintSink)            │ │ kermes-db (ledger)       │  │
//! │  └──────────────────────────────────┬──┘ └──────────────┬───────────┘  │
//! │                                     │                   │              │
//! │  ┌──────────────────────────────────▼───────────────────▼───────────┐  │
//! │  │               ★ kermes-core (THIS CRATE) ★                       │  │
//! │  │                                                                  │  │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐  │  │
//! │  │   │  types  │ │  money  │ │ snapshot │ │  stats  │ │ receipt │  │  │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘  │  │
//! │  │                                                                  │  │
//! │  │   NO I/O • NO DATABASE • NO PRINTER • PURE FUNCTIONS            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, TransactionRecord, stats rows)
//! - [`money`] - Money type with integer arithmetic
//! - [`snapshot`] - Cart snapshot encoding stored with each transaction
//! - [`stats`] - Daily and per-category aggregation over ledger records
//! - [`receipt`] - Printer directives, per-item slip encoding, byte rendering
//! - [`printer`] - Printer device profile
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kermes_core::money::Money;
//! use kermes_core::receipt::ReceiptEncoder;
//!
//! let price = Money::from_cents(500);
//! assert_eq!(price.to_string(), "5.00");
//!
//! // An empty cart encodes to the final reset only
//! let bytes = ReceiptEncoder::default().encode(&[]);
//! assert_eq!(bytes, vec![0x1B, 0x40]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod printer;
pub mod receipt;
pub mod snapshot;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use printer::{DeviceProfile, ProfileOverrides};
pub use receipt::{Directive, ReceiptEncoder, ReceiptLayout};
pub use types::*;
