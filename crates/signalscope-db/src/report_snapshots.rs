//! Database operations for the `report_snapshots` table.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use signalscope_delta::ProfileSnapshot;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// Decimal places kept for `stability_score` (`NUMERIC(4,3)`).
const STABILITY_SCALE: u32 = 3;

/// A row from the `report_snapshots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportSnapshotRow {
    pub id: i64,
    pub public_id: Uuid,
    pub entity_url: String,
    pub captured_at: DateTime<Utc>,
    pub profile: Value,
    pub stability_score: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl ReportSnapshotRow {
    /// Decode the stored inferred profile.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Json`] if the stored profile no longer matches the
    /// current shape.
    pub fn into_snapshot(self) -> Result<ProfileSnapshot, DbError> {
        Ok(ProfileSnapshot {
            profile: serde_json::from_value(self.profile)?,
            entity_url: self.entity_url,
            captured_at: self.captured_at,
            stability_score: self.stability_score.and_then(|d| d.to_f64()),
        })
    }
}

/// Convert a `[0, 1]` score to the stored decimal, rounded to three places.
#[must_use]
pub fn stability_to_decimal(score: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(score.clamp(0.0, 1.0)).map(|d| d.round_dp(STABILITY_SCALE))
}

const SELECT_COLUMNS: &str =
    "SELECT id, public_id, entity_url, captured_at, profile, stability_score, created_at \
     FROM report_snapshots";

/// Insert a snapshot and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Json`] if the profile cannot be serialized, or
/// [`DbError::Sqlx`] if the insert fails.
pub async fn insert_report_snapshot(
    pool: &PgPool,
    snapshot: &ProfileSnapshot,
) -> Result<i64, DbError> {
    let profile = serde_json::to_value(&snapshot.profile)?;
    let stability = snapshot.stability_score.and_then(stability_to_decimal);

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO report_snapshots (entity_url, captured_at, profile, stability_score) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(&snapshot.entity_url)
    .bind(snapshot.captured_at)
    .bind(profile)
    .bind(stability)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Most recent snapshot for `entity_url` captured strictly before `before`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_latest_snapshot_before(
    pool: &PgPool,
    entity_url: &str,
    before: DateTime<Utc>,
) -> Result<Option<ReportSnapshotRow>, DbError> {
    let row = sqlx::query_as::<_, ReportSnapshotRow>(&format!(
        "{SELECT_COLUMNS} \
         WHERE entity_url = $1 AND captured_at < $2 \
         ORDER BY captured_at DESC, id DESC \
         LIMIT 1"
    ))
    .bind(entity_url)
    .bind(before)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// List snapshots for `entity_url`, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_report_snapshots(
    pool: &PgPool,
    entity_url: &str,
    limit: i64,
) -> Result<Vec<ReportSnapshotRow>, DbError> {
    let rows = sqlx::query_as::<_, ReportSnapshotRow>(&format!(
        "{SELECT_COLUMNS} \
         WHERE entity_url = $1 \
         ORDER BY captured_at DESC, id DESC \
         LIMIT $2"
    ))
    .bind(entity_url)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stability_is_rounded_and_clamped() {
        assert_eq!(stability_to_decimal(0.8), Some(Decimal::new(800, 3)));
        assert_eq!(stability_to_decimal(0.123_456), Some(Decimal::new(123, 3)));
        assert_eq!(stability_to_decimal(1.7), Some(Decimal::ONE));
        assert_eq!(stability_to_decimal(-0.2), Some(Decimal::ZERO));
    }
}
