//! # kermes-db: Transaction Ledger for Kermes POS
//!
//! Durable, append-only storage of completed sales plus the statistics
//! derived from it. SQLite via sqlx; opened lazily on first use.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kermes POS Data Flow                             │
//! │                                                                         │
//! │  Register (record_sale / daily report)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kermes-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐  ┌───────────────┐  ┌──────────────┐    │   │
//! │  │   │ TransactionStore │  │  Repository   │  │  Migrations  │    │   │
//! │  │   │   (store.rs)     │─►│(transaction.rs)│  │  (embedded)  │    │   │
//! │  │   │ lazy OnceCell    │  │  SQL only     │  │ 001_tx.sql   │    │   │
//! │  │   │ validate + stats │  │               │  │              │    │   │
//! │  │   └──────────────────┘  └───────────────┘  └──────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: $KERMES_DB_PATH or <data dir>/kermes-pos/kermes.db    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The ledger handle: append, list, stats, process-wide instance
//! - [`pool`] - Configuration and pool creation
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - SQL for the `transactions` table
//! - [`error`] - Ledger error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! let records = kermes_db::global().list_all().await?;
//! let today = kermes_db::global().daily_stats().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{StoreConfig, StoreLocation};
pub use repository::transaction::TransactionRepository;
pub use store::{global, TransactionStore};
