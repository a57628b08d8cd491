//! # Sales Statistics
//!
//! Aggregations over ledger records. Both functions borrow the record set
//! immutably and are deterministic, so the store can hand them a full
//! scan and tests can hand them a hand-built slice.
//!
//! ## Aggregations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records ──► group by UTC date ──► DailyStats   (date DESC)            │
//! │                                                                         │
//! │  records ──► decode snapshots ──► sum quantity per category            │
//! │                                  ──► CategoryStats (count DESC,        │
//! │                                      ties: first seen)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conservation
//! - Σ `DailyStats.total_revenue` == Σ `record.total_amount`
//! - Σ `CategoryStats.count` == Σ `record.items_count`

use std::collections::{BTreeMap, HashMap};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{CategoryStats, DailyStats, TransactionRecord};

/// Buckets records by UTC calendar date, newest date first.
///
/// An empty slice yields an empty vector.
pub fn daily_stats(records: &[TransactionRecord]) -> Vec<DailyStats> {
    let mut buckets: BTreeMap<String, DailyStats> = BTreeMap::new();

    for record in records {
        let date = record.date_key();
        let bucket = buckets.entry(date.clone()).or_insert_with(|| DailyStats {
            date,
            transaction_count: 0,
            total_revenue: Money::zero(),
            total_items: 0,
        });
        bucket.transaction_count += 1;
        bucket.total_revenue += record.total_amount;
        bucket.total_items = bucket.total_items.saturating_add(record.items_count);
    }

    // `YYYY-MM-DD` sorts lexicographically; reverse for descending.
    buckets.into_values().rev().collect()
}

/// Units sold per category, highest first.
///
/// Records are visited in ascending `id` order regardless of the order of
/// the slice, so equal counts keep the category that appeared earliest in
/// the ledger first. Categories are compared as raw strings.
pub fn category_stats(records: &[TransactionRecord]) -> CoreResult<Vec<CategoryStats>> {
    let mut ordered: Vec<&TransactionRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.id);

    let mut rows: Vec<CategoryStats> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in ordered {
        for item in record.items()? {
            match positions.get(&item.product.category) {
                Some(&idx) => rows[idx].count = rows[idx].count.saturating_add(item.quantity),
                None => {
                    positions.insert(item.product.category.clone(), rows.len());
                    rows.push(CategoryStats {
                        category: item.product.category,
                        count: item.quantity,
                    });
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================
