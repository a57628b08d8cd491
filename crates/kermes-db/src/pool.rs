//! # Ledger Pool Management
//!
//! Connection pool creation and configuration for the SQLite ledger.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Connection Pool                             │
//! │                                                                         │
//! │  StoreConfig::from_env() / StoreConfig::new(path) / in_memory()        │
//! │       │                                                                 │
//! │       ▼  (nothing is opened yet)                                       │
//! │  TransactionStore::new(config)                                         │
//! │       │                                                                 │
//! │       ▼  first operation                                               │
//! │  connect(&config) ← create pool + run migrations                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Durability
//! File-backed ledgers run in WAL mode with `synchronous = FULL`: a sale is
//! on disk once the insert returns. An in-memory ledger keeps a single
//! connection open forever, since closing it would drop the database.

use directories::ProjectDirs;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::migrations;

/// Environment variable overriding the ledger file location.
pub const DB_PATH_ENV: &str = "KERMES_DB_PATH";

/// File name used inside the platform data directory.
pub const DB_FILE_NAME: &str = "kermes.db";

// =============================================================================
// Configuration
// =============================================================================

/// Where the ledger lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A SQLite file, created on first use. Its parent directory must exist.
    File(PathBuf),
    /// A private in-memory database (tests, demos).
    InMemory,
}

/// Ledger configuration.
///
/// ## Example
/// ```rust
/// use kermes_db::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/kermes/kermes.db").max_connections(4);
/// assert_eq!(config.max_connections, 4);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub location: StoreLocation,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single register)
    pub max_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to run migrations on first use.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// A file-backed ledger at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            location: StoreLocation::File(path.into()),
            max_connections: 5,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// An isolated in-memory ledger.
    pub fn in_memory() -> Self {
        StoreConfig {
            location: StoreLocation::InMemory,
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Resolves the ledger location from the environment.
    ///
    /// `KERMES_DB_PATH` wins; otherwise the platform data directory
    /// (e.g. `~/.local/share/kermes-pos/kermes.db`), falling back to
    /// `./kermes.db` when no home directory is known.
    pub fn from_env() -> Self {
        match std::env::var(DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => StoreConfig::new(path),
            _ => StoreConfig::new(default_database_path()),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }
}

/// Platform data directory path for the ledger file.
///
/// Creates the directory when possible. A failure is only logged: the
/// connect attempt will report it as `InitFailed` and can be retried.
pub fn default_database_path() -> PathBuf {
    let Some(dirs) = ProjectDirs::from("org", "kermes", "kermes-pos") else {
        return PathBuf::from(DB_FILE_NAME);
    };

    let data_dir = dirs.data_dir();
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        warn!(dir = %data_dir.display(), error = %e, "Could not create data directory");
    }

    data_dir.join(DB_FILE_NAME)
}

// =============================================================================
// Connect
// =============================================================================

/// Opens the pool and applies migrations.
///
/// Every failure maps to [`StoreError::InitFailed`].
pub async fn connect(config: &StoreConfig) -> StoreResult<SqlitePool> {
    let (connect_options, pool_options) = match &config.location {
        StoreLocation::File(path) => {
            info!(path = %path.display(), "Opening transaction ledger");

            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Full);

            let pool = SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(1)
                .acquire_timeout(config.connect_timeout)
                .idle_timeout(Some(Duration::from_secs(600)));

            (options, pool)
        }
        StoreLocation::InMemory => {
            info!("Opening in-memory transaction ledger");

            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(StoreError::init)?;

            // One connection that never closes; each new connection to
            // :memory: would see an empty database.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .acquire_timeout(config.connect_timeout)
                .idle_timeout(None)
                .max_lifetime(None);

            (options, pool)
        }
    };

    debug!("Connection options configured");

    let pool = pool_options
        .connect_with(connect_options)
        .await
        .map_err(StoreError::init)?;

    if config.run_migrations {
        migrations::run_migrations(&pool).await?;
    }

    info!(max_connections = config.max_connections, "Ledger pool ready");
    Ok(pool)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_connect_runs_migrations() {
        let pool = connect(&StoreConfig::in_memory()).await.unwrap();

        let (total, applied) = migrations::migration_status(&pool).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_file_connect_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        connect(&StoreConfig::new(&path)).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_missing_parent_directory_is_init_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ledger.db");

        let err = connect(&StoreConfig::new(path)).await.unwrap_err();
        assert!(matches!(err, StoreError::InitFailed(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/ledger.db")
            .max_connections(10)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert!(!config.run_migrations);
        assert_eq!(
            config.location,
            StoreLocation::File(PathBuf::from("/tmp/ledger.db"))
        );
    }
}
