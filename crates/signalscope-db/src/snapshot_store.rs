//! Postgres-backed [`SnapshotStore`].

use chrono::{DateTime, Utc};
use signalscope_delta::{ProfileSnapshot, SnapshotStore};
use sqlx::PgPool;

use crate::report_snapshots::{
    get_latest_snapshot_before, insert_report_snapshot, list_report_snapshots, ReportSnapshotRow,
};
use crate::DbError;

#[derive(Debug, Clone)]
pub struct PgSnapshotStore {
    pool: PgPool,
}

impl PgSnapshotStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl SnapshotStore for PgSnapshotStore {
    type Error = DbError;

    async fn latest_before(
        &self,
        entity_url: &str,
        before: DateTime<Utc>,
    ) -> Result<Option<ProfileSnapshot>, DbError> {
        get_latest_snapshot_before(&self.pool, entity_url, before)
            .await?
            .map(ReportSnapshotRow::into_snapshot)
            .transpose()
    }

    async fn save(&self, snapshot: &ProfileSnapshot) -> Result<(), DbError> {
        let id = insert_report_snapshot(&self.pool, snapshot).await?;
        tracing::debug!(entity = %snapshot.entity_url, id, "report snapshot inserted");
        Ok(())
    }

    async fn list_recent(
        &self,
        entity_url: &str,
        limit: i64,
    ) -> Result<Vec<ProfileSnapshot>, DbError> {
        list_report_snapshots(&self.pool, entity_url, limit)
            .await?
            .into_iter()
            .map(ReportSnapshotRow::into_snapshot)
            .collect()
    }
}
