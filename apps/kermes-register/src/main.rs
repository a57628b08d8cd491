//! # Kermes Register Entry Point
//!
//! Command-line front for the register.
//!
//! ## Usage
//! ```bash
//! # Sales statistics as JSON (default)
//! kermes-register report
//!
//! # Printers the configured transport can reach
//! kermes-register printers
//!
//! # Print and record a sample cart through the dry-run printer
//! kermes-register demo
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, `RUST_LOG`)
//! 2. Load `printer.toml` + `KERMES_PRINTER_*` overrides
//! 3. Bind the process-wide ledger (`KERMES_DB_PATH`), opened on first use
//! 4. Run the command

use std::sync::Arc;

use kermes_core::{CartItem, Money, Product};
use kermes_print::{LogSink, PrinterConfig};
use kermes_register::{init_tracing, ApiError, Register};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let command = std::env::args().nth(1).unwrap_or_else(|| "report".to_string());

    let printer_config = PrinterConfig::load_or_default(None);
    let register = Register::from_config(kermes_db::global(), Arc::new(LogSink::new()), &printer_config);

    info!(command = %command, device = %register.profile().device_name, "Starting Kermes register");

    match command.as_str() {
        "report" => {
            let report = register.report().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "printers" => {
            for name in register.available_printers().await {
                println!("{}", name);
            }
        }
        "demo" => demo(&register).await?,
        "--help" | "-h" | "help" => print_help(),
        other => {
            print_help();
            return Err(ApiError::validation(format!("unknown command: {}", other)).into());
        }
    }

    Ok(())
}

/// Prints a two-line cart and records it as a cash sale.
async fn demo(register: &Register<'_>) -> Result<(), ApiError> {
    let cart = vec![
        CartItem::new(Product::new("demo-1", "Gözleme", "food", Money::from_cents(450)), 2),
        CartItem::new(Product::new("demo-2", "Ayran", "drink", Money::from_cents(150)), 1),
    ];

    // Independent: a failed print still records the sale
    if let Err(e) = register.print_cart(&cart).await {
        eprintln!("{}", e);
    }

    let record = register.record_sale(&cart, "cash").await?;
    println!(
        "Recorded transaction #{} ({} items, {})",
        record.id,
        record.items_count,
        record.total_amount.format_with_glyph('€')
    );
    Ok(())
}

fn print_help() {
    println!("Kermes POS Register");
    println!();
    println!("Usage: kermes-register [COMMAND]");
    println!();
    println!("Commands:");
    println!("  report     Daily and per-category sales as JSON (default)");
    println!("  printers   List reachable printers");
    println!("  demo       Print and record a sample cart (dry-run printer)");
    println!();
    println!("Environment:");
    println!("  KERMES_DB_PATH          Ledger file location");
    println!("  KERMES_PRINTER_NAME     Printer device name");
    println!("  KERMES_PAPER_WIDTH_MM   Paper width in millimetres");
    println!("  RUST_LOG                Log filter");
}
