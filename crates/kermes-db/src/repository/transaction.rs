//! # Transaction Repository
//!
//! SQL for the `transactions` table. Validation, timestamping and
//! aggregation live in [`crate::store`]; this layer only moves rows.
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transactions (SQLite)             TransactionRecord (kermes-core)     │
//! │  ──────────────────────            ─────────────────────────────       │
//! │  id              INTEGER    ──►    id: i64                             │
//! │  timestamp       TEXT       ──►    timestamp: DateTime<Utc>            │
//! │  total_cents     INTEGER    ──►    total_amount: Money                 │
//! │  items_count     INTEGER    ──►    items_count: i64                    │
//! │  items_snapshot  TEXT       ──►    items_snapshot: String              │
//! │  payment_method  TEXT       ──►    payment_method: String              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use kermes_core::{Money, TransactionRecord};

/// Timestamps are stored as RFC 3339 UTC with millisecond precision, so
/// lexical order in SQLite equals chronological order.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A row as read from SQLite, before conversion into the domain type.
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    timestamp: String,
    total_cents: i64,
    items_count: i64,
    items_snapshot: String,
    payment_method: String,
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> StoreResult<Self> {
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| {
                StoreError::ReadFailed(format!(
                    "transaction {} has invalid timestamp '{}': {}",
                    row.id, row.timestamp, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(TransactionRecord {
            id: row.id,
            timestamp,
            total_amount: Money::from_cents(row.total_cents),
            items_count: row.items_count,
            items_snapshot: row.items_snapshot,
            payment_method: row.payment_method,
        })
    }
}

/// Fields of a record that does not have an id yet.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub timestamp: DateTime<Utc>,
    pub total_amount: Money,
    pub items_count: i64,
    pub items_snapshot: String,
    pub payment_method: String,
}

/// Repository for ledger rows.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Inserts one row and returns the assigned id.
    ///
    /// The statement runs in SQLite autocommit mode: when this returns
    /// `Ok`, the row is committed.
    pub async fn insert(&self, tx: &NewTransaction) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (
                timestamp, total_cents, items_count, items_snapshot, payment_method
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(format_timestamp(tx.timestamp))
        .bind(tx.total_amount.cents())
        .bind(tx.items_count)
        .bind(&tx.items_snapshot)
        .bind(&tx.payment_method)
        .execute(&self.pool)
        .await
        .map_err(StoreError::write)?;

        let id = result.last_insert_rowid();
        debug!(id, total_cents = tx.total_amount.cents(), "Inserted transaction");
        Ok(id)
    }

    /// Every row, ascending by id.
    pub async fn list_all(&self) -> StoreResult<Vec<TransactionRecord>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, timestamp, total_cents, items_count, items_snapshot, payment_method
            FROM transactions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::read)?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }

    /// Rows with `from <= timestamp < to`, ordered by timestamp then id.
    pub async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<TransactionRecord>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, timestamp, total_cents, items_count, items_snapshot, payment_method
            FROM transactions
            WHERE timestamp >= ?1 AND timestamp < ?2
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(format_timestamp(from))
        .bind(format_timestamp(to))
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::read)?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }

    /// Number of rows.
    pub async fn count(&self) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::read)
    }
}
