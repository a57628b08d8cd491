//! # Repository Module
//!
//! Raw SQL access for the ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TransactionStore::append(items, total, method)                        │
//! │       │  validate, snapshot, timestamp                                  │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── insert(&NewTransaction) -> id                                     │
//! │  ├── list_all()                                                        │
//! │  ├── list_between(from, to)                                            │
//! │  └── count()                                                           │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite `transactions` table                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod transaction;
