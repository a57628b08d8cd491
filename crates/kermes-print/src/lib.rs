//! # kermes-print: Receipt Printing for Kermes POS
//!
//! Bridges the pure receipt encoder in `kermes-core` and whatever moves
//! bytes to the printer.
//!
//! ## Print Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  print_cart(items, profile)                                            │
//! │       │                                                                 │
//! │       ├── validate_cart()  ── Err ──► PrintError::InvalidCart          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReceiptEncoder::encode(items) → ESC/POS bytes                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PrintSink::send(bytes, profile)   (called exactly once)               │
//! │       │                                                                 │
//! │       ├── Ok(true)            ──► Ok(())                               │
//! │       └── Ok(false) / Err(_)  ──► PrintError::PrintFailed              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sink`] - `PrintSink` transport trait and the dry-run `LogSink`
//! - [`service`] - `PrinterService`: print carts, list printers
//! - [`config`] - `printer.toml` plus environment overrides
//! - [`error`] - `PrintError`, `SinkError`

pub mod config;
pub mod error;
pub mod service;
pub mod sink;

pub use config::{PrinterConfig, ReceiptSettings};
pub use error::{PrintError, PrintResult, SinkError};
pub use service::PrinterService;
pub use sink::{LogSink, PrintSink};
