//! # Domain Types
//!
//! Core domain types used throughout Kermes POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │◄──│    CartItem     │   │ TransactionRecord   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  product        │   │  id (autoincrement) │   │
//! │  │  name           │   │  quantity ≥ 1   │   │  timestamp (UTC)    │   │
//! │  │  category       │   └─────────────────┘   │  total_amount       │   │
//! │  │  price (Money)  │            │            │  items_count        │   │
//! │  │  in_stock       │            └──snapshot──►  items_snapshot     │   │
//! │  └─────────────────┘                         │  payment_method     │   │
//! │                                              └─────────┬───────────┘   │
//! │                                                        │ derived       │
//! │                               ┌────────────────────────┴──────┐        │
//! │                               ▼                               ▼        │
//! │                      ┌─────────────────┐            ┌─────────────────┐│
//! │                      │   DailyStats    │            │  CategoryStats  ││
//! │                      │  date (UTC)     │            │  category       ││
//! │                      │  count/revenue  │            │  count (units)  ││
//! │                      └─────────────────┘            └─────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A transaction freezes the cart as it was when the sale completed. The
//! product catalog may change later; the ledger never follows it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::snapshot;

// =============================================================================
// Product
// =============================================================================

/// A product as referenced by a cart line.
///
/// The catalog that owns products lives outside this crate; a cart only
/// carries a copy. Every field survives the snapshot round trip verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display name, printed as the slip headline.
    pub name: String,

    /// Category label. Kept as-is: no trimming, no case folding.
    pub category: String,

    /// Unit price.
    pub price: Money,

    /// Availability flag from the catalog.
    pub in_stock: bool,
}

impl Product {
    /// Creates an in-stock product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            in_stock: true,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart: one product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub product: Product,
    /// Units of the product. Must be at least 1 (see [`crate::validation`]).
    pub quantity: i64,
}

impl CartItem {
    pub fn new(product: Product, quantity: i64) -> Self {
        CartItem { product, quantity }
    }

    /// Unit price × quantity, saturating on overflow.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, or `None` on overflow.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.product.price.checked_multiply_quantity(self.quantity)
    }
}

/// Sum of all line totals, saturating on overflow.
///
/// Exact for every cart that passes [`crate::validation::validate_cart`].
pub fn cart_total(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// Sum of all line totals, or `None` if any step overflows.
pub fn checked_cart_total(items: &[CartItem]) -> Option<Money> {
    items.iter().try_fold(Money::zero(), |acc, item| {
        acc.checked_add(item.checked_line_total()?)
    })
}

/// Sum of all quantities, saturating on overflow.
pub fn cart_units(items: &[CartItem]) -> i64 {
    items
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
}

/// Sum of all quantities, or `None` on overflow.
pub fn checked_cart_units(items: &[CartItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, item| acc.checked_add(item.quantity))
}

// =============================================================================
// Transaction Record
// =============================================================================

/// One completed sale in the ledger.
///
/// Records are append-only. `id` gives the ledger's total order;
/// `timestamp` is informational and is not corrected for clock skew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionRecord {
    pub id: i64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub total_amount: Money,
    pub items_count: i64,
    /// Serialized copy of the cart at the time of sale.
    pub items_snapshot: String,
    pub payment_method: String,
}

impl TransactionRecord {
    /// Decodes the cart snapshot back into line items.
    pub fn items(&self) -> CoreResult<Vec<CartItem>> {
        snapshot::decode(self.id, &self.items_snapshot)
    }

    /// The UTC calendar date of the record, as `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        self.timestamp.date_naive().format("%Y-%m-%d").to_string()
    }
}

// =============================================================================
// Derived Statistics
// =============================================================================

/// Sales totals for one UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyStats {
    /// `YYYY-MM-DD`
    pub date: String,
    pub transaction_count: i64,
    pub total_revenue: Money,
    pub total_items: i64,
}

/// Units sold for one category across the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryStats {
    pub category: String,
    pub count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
