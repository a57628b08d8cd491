//! # Receipt Encoding
//!
//! Turns cart contents into the control-code stream a receipt printer
//! understands. Encoding happens in two steps so the protocol can be
//! inspected and tested without looking at bytes:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────┐     ┌─────────────┐
//! │ &[CartItem]  │ ──► │ ReceiptProgram        │ ──► │  Vec<u8>    │
//! │              │     │ (segments of          │     │  ESC/POS    │
//! │              │     │  Directive) + Reset   │     │  bytes      │
//! └──────────────┘     └──────────────────────┘     └─────────────┘
//!     program_at()                render()
//! ```
//!
//! Encoding never fails or panics. Carts should be validated before they
//! get here (see [`crate::validation::validate_cart`]); an amount that does
//! not fit in an i64 prints saturated.

mod directive;
mod encoder;

pub use directive::{render, Alignment, Directive, FontSize};
pub use encoder::{ReceiptEncoder, ReceiptLayout, ReceiptProgram, Segment};
