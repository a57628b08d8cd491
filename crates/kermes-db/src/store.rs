//! # Transaction Store
//!
//! The ledger handle the rest of the application talks to.
//!
//! ## Lazy, Exactly-Once Initialization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  TransactionStore::new(config)     nothing opened, cannot fail         │
//! │       │                                                                 │
//! │       ▼  any operation                                                  │
//! │  OnceCell::get_or_try_init(connect)                                    │
//! │       │                                                                 │
//! │       ├── already set    ──► reuse pool                                │
//! │       ├── being set      ──► wait for the in-flight attempt            │
//! │       ├── attempt Ok     ──► store pool, every waiter proceeds         │
//! │       └── attempt Err    ──► InitFailed, cell stays empty,             │
//! │                              the next call tries again                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Append Path
//! ```text
//!   append(items, total, method)
//!     1. validate_transaction()  ── Err ──► InvalidTransaction (no write)
//!     2. snapshot::encode(items) ── Err ──► WriteFailed (no write)
//!     3. timestamp = now (UTC, ms)
//!     4. INSERT                  ── Err ──► WriteFailed (no record)
//!     5. return the full record with its new id
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::pool::{self, StoreConfig};
use crate::repository::transaction::{NewTransaction, TransactionRepository};
use kermes_core::validation::validate_transaction;
use kermes_core::{
    cart_units, snapshot, stats, CartItem, CategoryStats, DailyStats, Money, TransactionRecord,
};

// =============================================================================
// Transaction Store
// =============================================================================

/// Durable, append-only transaction ledger.
///
/// Cheap to construct; the database is opened on the first operation.
/// Safe to share between tasks (`&TransactionStore` or `Arc`).
///
/// ## Example
/// ```rust,no_run
/// # async fn demo() -> kermes_db::StoreResult<()> {
/// use kermes_core::{CartItem, Money, Product};
/// use kermes_db::{StoreConfig, TransactionStore};
///
/// let store = TransactionStore::new(StoreConfig::in_memory());
/// let tea = Product::new("p-1", "Tea", "drink", Money::from_cents(250));
/// let record = store
///     .append(&[CartItem::new(tea, 2)], Money::from_cents(500), "cash")
///     .await?;
/// assert_eq!(record.items_count, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TransactionStore {
    config: StoreConfig,
    pool: OnceCell<SqlitePool>,
    init_attempts: AtomicU32,
}

impl TransactionStore {
    pub fn new(config: StoreConfig) -> Self {
        TransactionStore {
            config,
            pool: OnceCell::new(),
            init_attempts: AtomicU32::new(0),
        }
    }

    /// Same as [`global`].
    pub fn global() -> &'static TransactionStore {
        global()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether the ledger has been opened successfully.
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// How many times opening the ledger has been attempted.
    pub fn init_attempts(&self) -> u32 {
        self.init_attempts.load(Ordering::SeqCst)
    }

    async fn pool(&self) -> StoreResult<&SqlitePool> {
        self.pool
            .get_or_try_init(|| async {
                let attempt = self.init_attempts.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(attempt, "Initializing transaction ledger");

                pool::connect(&self.config).await.map_err(|e| {
                    warn!(attempt, error = %e, "Ledger initialization failed");
                    e
                })
            })
            .await
    }

    async fn repo(&self) -> StoreResult<TransactionRepository> {
        Ok(TransactionRepository::new(self.pool().await?.clone()))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Records a completed sale.
    ///
    /// ## Rules
    /// - Every quantity ≥ 1, every price ≥ 0
    /// - `total` equals the sum of the line totals
    /// - `payment_method` is not blank
    ///
    /// ## Returns
    /// The stored record: a fresh id greater than every earlier id, the
    /// current UTC time, `items_count` = Σ quantity and the cart snapshot.
    pub async fn append(
        &self,
        items: &[CartItem],
        total: Money,
        payment_method: &str,
    ) -> StoreResult<TransactionRecord> {
        self.append_at(items, total, payment_method, Utc::now()).await
    }

    pub(crate) async fn append_at(
        &self,
        items: &[CartItem],
        total: Money,
        payment_method: &str,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<TransactionRecord> {
        validate_transaction(items, total, payment_method)?;

        let items_snapshot = snapshot::encode(items).map_err(StoreError::write)?;
        let new = NewTransaction {
            // Stored with millisecond precision; truncate so the returned
            // record equals what a later read yields.
            timestamp: timestamp.trunc_subsecs(3),
            total_amount: total,
            items_count: cart_units(items),
            items_snapshot,
            payment_method: payment_method.to_string(),
        };

        let id = self.repo().await?.insert(&new).await?;

        info!(
            id,
            total = %total,
            items = new.items_count,
            payment_method = %new.payment_method,
            "Transaction recorded"
        );

        Ok(TransactionRecord {
            id,
            timestamp: new.timestamp,
            total_amount: new.total_amount,
            items_count: new.items_count,
            items_snapshot: new.items_snapshot,
            payment_method: new.payment_method,
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every record, ascending by id.
    pub async fn list_all(&self) -> StoreResult<Vec<TransactionRecord>> {
        self.repo().await?.list_all().await
    }

    /// Records with `from <= timestamp < to`, ordered by timestamp then id.
    pub async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<TransactionRecord>> {
        self.repo().await?.list_between(from, to).await
    }

    /// Number of records in the ledger.
    pub async fn count(&self) -> StoreResult<i64> {
        self.repo().await?.count().await
    }

    /// Per-day totals, newest date first.
    pub async fn daily_stats(&self) -> StoreResult<Vec<DailyStats>> {
        let records = self.list_all().await?;
        Ok(stats::daily_stats(&records))
    }

    /// Units sold per category, most sold first.
    ///
    /// A record whose snapshot cannot be decoded fails the whole call with
    /// [`StoreError::ReadFailed`].
    pub async fn category_stats(&self) -> StoreResult<Vec<CategoryStats>> {
        let records = self.list_all().await?;
        stats::category_stats(&records).map_err(StoreError::read)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens the ledger (if needed) and runs `SELECT 1`.
    pub async fn health_check(&self) -> bool {
        match self.pool().await {
            Ok(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Closes the pool if it was opened and empties the cell, so the next
    /// operation opens the ledger again.
    ///
    /// The process-wide instance from [`global`] is shared and cannot be
    /// closed; it lives until the process exits.
    pub async fn close(&mut self) {
        if let Some(pool) = self.pool.take() {
            info!("Closing transaction ledger");
            pool.close().await;
        }
    }
}

// =============================================================================
// Process-wide Instance
// =============================================================================

static GLOBAL: OnceLock<TransactionStore> = OnceLock::new();

/// The process-wide ledger, configured from the environment
/// (see [`StoreConfig::from_env`]). Opened on first use.
pub fn global() -> &'static TransactionStore {
    GLOBAL.get_or_init(|| TransactionStore::new(StoreConfig::from_env()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kermes_core::{Product, ValidationError};
    use std::sync::Arc;

    fn product(id: &str, name: &str, category: &str, cents: i64) -> Product {
        Product::new(id, name, category, Money::from_cents(cents))
    }

    fn store() -> TransactionStore {
        TransactionStore::new(StoreConfig::in_memory())
    }

    async fn sell(store: &TransactionStore, items: Vec<CartItem>) -> TransactionRecord {
        let total = kermes_core::cart_total(&items);
        store.append(&items, total, "cash").await.unwrap()
    }

    #[tokio::test]
    async fn test_append_single_sale() {
        let store = store();
        let kebab = product("p-1", "Kebab", "food", 500);

        let record = store
            .append(&[CartItem::new(kebab, 2)], Money::from_cents(1000), "cash")
            .await
            .unwrap();

        assert_eq!(record.total_amount, Money::from_cents(1000));
        assert_eq!(record.items_count, 2);
        assert_eq!(record.payment_method, "cash");

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![record.clone()]);

        let daily = store.daily_stats().await.unwrap();
        assert_eq!(
            daily,
            vec![DailyStats {
                date: record.date_key(),
                transaction_count: 1,
                total_revenue: Money::from_cents(1000),
                total_items: 2,
            }]
        );

        let categories = store.category_stats().await.unwrap();
        assert_eq!(
            categories,
            vec![CategoryStats {
                category: "food".into(),
                count: 2
            }]
        );
    }

    #[tokio::test]
    async fn test_ids_increase_and_timestamps_are_stamped() {
        let store = store();
        let tea = product("p-2", "Tea", "drink", 150);

        let before = Utc::now().trunc_subsecs(3);
        let first = sell(&store, vec![CartItem::new(tea.clone(), 1)]).await;
        let second = sell(&store, vec![CartItem::new(tea, 3)]).await;
        let after = Utc::now();

        assert_eq!(second.id, first.id + 1);
        assert!(first.timestamp >= before && second.timestamp <= after);
        assert_eq!(store.count().await.unwrap(), 2);

        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_two_days_two_categories() {
        let store = store();
        let kebab = product("p-1", "Kebab", "food", 500);
        let ayran = product("p-3", "Ayran", "drink", 200);

        let may_1 = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let may_2 = Utc.with_ymd_and_hms(2026, 5, 2, 18, 30, 0).unwrap();

        store
            .append_at(&[CartItem::new(kebab.clone(), 2)], Money::from_cents(1000), "cash", may_1)
            .await
            .unwrap();
        store
            .append_at(
                &[CartItem::new(kebab, 1), CartItem::new(ayran, 3)],
                Money::from_cents(1100),
                "card",
                may_2,
            )
            .await
            .unwrap();

        let daily = store.daily_stats().await.unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, "2026-05-02");
        assert_eq!(daily[0].total_revenue, Money::from_cents(1100));
        assert_eq!(daily[0].total_items, 4);
        assert_eq!(daily[1].date, "2026-05-01");

        let categories = store.category_stats().await.unwrap();
        assert_eq!(
            categories,
            vec![
                CategoryStats { category: "food".into(), count: 3 },
                CategoryStats { category: "drink".into(), count: 3 },
            ]
        );

        let first_day = store
            .list_between(may_1, Utc.with_ymd_and_hms(2026, 5, 2, 0, 0, 0).unwrap())
            .await
            .unwrap();
        assert_eq!(first_day.len(), 1);
        assert_eq!(first_day[0].timestamp, may_1);
    }

    #[tokio::test]
    async fn test_stats_are_idempotent_and_conserve_totals() {
        let store = store();
        let kebab = product("p-1", "Kebab", "food", 500);
        let baklava = product("p-4", "Baklava", "dessert", 350);

        sell(&store, vec![CartItem::new(kebab.clone(), 1)]).await;
        sell(&store, vec![CartItem::new(baklava, 4), CartItem::new(kebab, 2)]).await;

        let daily = store.daily_stats().await.unwrap();
        assert_eq!(daily, store.daily_stats().await.unwrap());

        let records = store.list_all().await.unwrap();
        let revenue: Money = records.iter().map(|r| r.total_amount).sum();
        let units: i64 = records.iter().map(|r| r.items_count).sum();

        assert_eq!(daily.iter().map(|d| d.total_revenue).sum::<Money>(), revenue);
        assert_eq!(daily.iter().map(|d| d.transaction_count).sum::<i64>(), 2);

        let categories = store.category_stats().await.unwrap();
        assert_eq!(categories, store.category_stats().await.unwrap());
        assert_eq!(categories.iter().map(|c| c.count).sum::<i64>(), units);
    }

    #[tokio::test]
    async fn test_empty_ledger() {
        let store = store();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.daily_stats().await.unwrap().is_empty());
        assert!(store.category_stats().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_transaction_is_not_written() {
        let store = store();
        let kebab = product("p-1", "Kebab", "food", 500);

        let err = store
            .append(&[CartItem::new(kebab.clone(), 0)], Money::zero(), "cash")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransaction(_)));

        let err = store
            .append(&[CartItem::new(kebab.clone(), 2)], Money::from_cents(999), "cash")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidTransaction(ValidationError::TotalMismatch { .. })
        ));

        let err = store
            .append(&[CartItem::new(kebab, 1)], Money::from_cents(500), "")
            .await
            .unwrap_err();
        assert!(!err.is_retryable());

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_overflowing_cart_is_not_written() {
        let store = store();
        let lokum = product("p-5", "Lokum", "dessert", 4);

        // 4 × (2^62 + 1) wraps to 4 cents without checked arithmetic
        let err = store
            .append(&[CartItem::new(lokum, (1 << 62) + 1)], Money::from_cents(4), "cash")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::InvalidTransaction(ValidationError::Overflow { .. })
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_fails_category_stats() {
        let store = store();
        let pool = store.pool().await.unwrap();

        sqlx::query(
            "INSERT INTO transactions (timestamp, total_cents, items_count, items_snapshot, payment_method)
             VALUES ('2026-05-01T10:00:00.000Z', 100, 1, 'not json', 'cash')",
        )
        .execute(pool)
        .await
        .unwrap();

        let err = store.category_stats().await.unwrap_err();
        assert!(matches!(err, StoreError::ReadFailed(_)));

        // Daily stats do not look at snapshots
        assert_eq!(store.daily_stats().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_init_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("ledger");
        let store = TransactionStore::new(StoreConfig::new(parent.join("kermes.db")));

        let err = store.count().await.unwrap_err();
        assert!(matches!(err, StoreError::InitFailed(_)));
        assert!(!store.is_initialized());
        assert!(!store.health_check().await);

        std::fs::create_dir_all(&parent).unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.is_initialized());
        assert_eq!(store.init_attempts(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_initialize_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(TransactionStore::new(StoreConfig::new(
            dir.path().join("kermes.db"),
        )));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.count().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 0);
        }

        assert_eq!(store.init_attempts(), 1);
    }

    #[tokio::test]
    async fn test_file_ledger_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kermes.db");
        let tea = product("p-2", "Tea", "drink", 150);

        let mut first = TransactionStore::new(StoreConfig::new(&path));
        let record = sell(&first, vec![CartItem::new(tea, 2)]).await;
        first.close().await;

        let reopened = TransactionStore::new(StoreConfig::new(&path));
        assert_eq!(reopened.list_all().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_closed_store_reopens_on_next_use() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TransactionStore::new(StoreConfig::new(dir.path().join("kermes.db")));
        let tea = product("p-2", "Tea", "drink", 150);

        let record = sell(&store, vec![CartItem::new(tea, 1)]).await;
        store.close().await;
        assert!(!store.is_initialized());

        assert_eq!(store.list_all().await.unwrap(), vec![record]);
        assert!(store.is_initialized());
        assert_eq!(store.init_attempts(), 2);
    }
}
