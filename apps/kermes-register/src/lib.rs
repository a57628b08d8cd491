//! # Kermes Register Library
//!
//! The application layer of Kermes POS: what a till UI calls.
//!
//! ## Module Organization
//! ```text
//! kermes_register/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── register.rs     ◄─── Register: print_cart, record_sale, report
//! └── error.rs        ◄─── ApiError for the UI
//! ```

pub mod error;
pub mod register;

pub use error::{ApiError, ErrorCode};
pub use register::{Register, SalesReport};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kermes_db=trace` - Trace for one crate only
/// - Default: `info,kermes=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kermes=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
