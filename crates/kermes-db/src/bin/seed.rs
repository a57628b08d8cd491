//! # Demo Sales Generator
//!
//! Fills a ledger with sample festival sales for development, then prints
//! the resulting statistics.
//!
//! ## Usage
//! ```bash
//! # Record 50 sales (default) into ./kermes_dev.db
//! cargo run -p kermes-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p kermes-db --bin seed -- --count 200 --db ./data/kermes.db
//! ```
//!
//! Every cart holds one to three distinct items drawn from a small menu
//! of food, drinks and desserts; quantities run from 1 to 4.

use std::env;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use kermes_core::{cart_total, CartItem, Money, Product};
use kermes_db::{StoreConfig, TransactionStore};

/// Menu: (category, name, price in cents)
const MENU: &[(&str, &str, i64)] = &[
    ("food", "Kebab", 500),
    ("food", "Gözleme", 450),
    ("food", "Lahmacun", 400),
    ("food", "Köfte", 550),
    ("drink", "Ayran", 150),
    ("drink", "Turkish Tea", 100),
    ("drink", "Turkish Coffee", 250),
    ("drink", "Lemonade", 200),
    ("dessert", "Baklava", 350),
    ("dessert", "Künefe", 450),
    ("dessert", "Lokum", 200),
];

const PAYMENT_METHODS: &[&str] = &["cash", "card"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./kermes_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kermes POS Demo Sales Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of sales to record (default: 50)");
                println!("  -d, --db <PATH>    Ledger file path (default: ./kermes_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kermes POS Demo Sales Generator");
    println!("==================================");
    println!("Ledger: {}", db_path);
    println!("Sales:  {}", count);
    println!();

    let store = TransactionStore::new(StoreConfig::new(&db_path));

    let existing = store.count().await?;
    println!("✓ Ledger open ({} existing transactions)", existing);

    let menu = menu();
    let start = std::time::Instant::now();

    let mut recorded = 0usize;
    for seed in 0..count {
        let items = generate_cart(&menu, seed);
        let method = PAYMENT_METHODS[seed % PAYMENT_METHODS.len()];

        match store.append(&items, cart_total(&items), method).await {
            Ok(_) => recorded += 1,
            Err(e) => eprintln!("Failed to record sale {}: {}", seed, e),
        }
    }

    if recorded == count {
        println!("✓ Recorded {} sales in {:?}", recorded, start.elapsed());
    } else {
        println!(
            "⚠ Recorded {} of {} sales in {:?}",
            recorded,
            count,
            start.elapsed()
        );
    }
    println!();

    println!("Daily totals:");
    for day in store.daily_stats().await? {
        println!(
            "  {}  {:>4} sales  {:>10}  {:>5} items",
            day.date,
            day.transaction_count,
            day.total_revenue.format_with_glyph('€'),
            day.total_items
        );
    }

    println!();
    println!("Units per category:");
    for row in store.category_stats().await? {
        println!("  {:<10} {:>6}", row.category, row.count);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn menu() -> Vec<Product> {
    MENU.iter()
        .map(|(category, name, cents)| {
            Product::new(
                Uuid::new_v4().to_string(),
                *name,
                *category,
                Money::from_cents(*cents),
            )
        })
        .collect()
}

/// Deterministic cart for `seed`: 1-3 distinct products, 1-4 units each.
fn generate_cart(menu: &[Product], seed: usize) -> Vec<CartItem> {
    let lines = 1 + seed % 3;

    (0..lines)
        .map(|line| {
            let product = &menu[(seed * 7 + line * 5) % menu.len()];
            let quantity = 1 + ((seed + line * 3) % 4) as i64;
            CartItem::new(product.clone(), quantity)
        })
        .collect()
}
