//! Postgres storage for report snapshots and cohort matrices.
//!
//! Only the commands that opt into `--store` (plus `history` and `db`) open a
//! pool; analysis itself never touches the database.

pub mod cohort_matrices;
pub mod report_snapshots;
pub mod snapshot_store;

use std::time::Duration;

use signalscope_core::AppConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

pub use cohort_matrices::{get_cohort_matrix, upsert_cohort_matrix, CohortMatrixRow};
pub use report_snapshots::{
    get_latest_snapshot_before, insert_report_snapshot, list_report_snapshots, ReportSnapshotRow,
};
pub use snapshot_store::PgSnapshotStore;

// Resolves to <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

const APPLIED_MIGRATIONS_SQL: &str =
    "SELECT COUNT(*) FROM _sqlx_migrations WHERE success = true";

/// Pool sizing, taken from [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }

    fn options(self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error("stored JSON does not match the expected shape: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open a pool against the configured `DATABASE_URL`.
///
/// # Errors
///
/// [`DbError::MissingDatabaseUrl`] when no URL is configured, otherwise
/// [`DbError::Sqlx`] if Postgres cannot be reached.
pub async fn connect_pool_from_config(config: &AppConfig) -> Result<PgPool, DbError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or(DbError::MissingDatabaseUrl)?;
    let pool = PoolConfig::from_app_config(config)
        .options()
        .connect(url)
        .await?;
    tracing::debug!(max_connections = config.db_max_connections, "database pool ready");
    Ok(pool)
}

/// Apply pending migrations and report how many ran.
///
/// # Errors
///
/// Returns [`DbError::Migration`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, DbError> {
    let before = applied_migration_count(pool).await;
    MIGRATOR.run(pool).await?;
    let ran = applied_migration_count(pool).await - before;
    tracing::info!(ran, "migrations applied");
    Ok(usize::try_from(ran).unwrap_or(0))
}

// The bookkeeping table is absent on a fresh database, which counts as zero.
async fn applied_migration_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>(APPLIED_MIGRATIONS_SQL)
        .fetch_one(pool)
        .await
        .unwrap_or(0)
}

/// Round-trip a trivial query to prove the pool can serve connections.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn health_check(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
