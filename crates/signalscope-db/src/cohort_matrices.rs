//! Database operations for the `cohort_matrices` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use signalscope_cohort::CohortMatrix;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `cohort_matrices` table. One row per cohort id.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CohortMatrixRow {
    pub id: i64,
    pub cohort_id: String,
    pub anchor_url: String,
    pub matrix: Value,
    pub report_markdown: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CohortMatrixRow {
    /// # Errors
    ///
    /// Returns [`DbError::Json`] if the stored matrix cannot be decoded.
    pub fn decode_matrix(&self) -> Result<CohortMatrix, DbError> {
        Ok(serde_json::from_value(self.matrix.clone())?)
    }
}

/// Insert or replace the stored matrix for `cohort_id`, returning the row id.
///
/// # Errors
///
/// Returns [`DbError::Json`] if the matrix cannot be serialized, or
/// [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_cohort_matrix(
    pool: &PgPool,
    cohort_id: &str,
    anchor_url: &str,
    matrix: &CohortMatrix,
    report_markdown: Option<&str>,
) -> Result<i64, DbError> {
    let matrix_json = serde_json::to_value(matrix)?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO cohort_matrices (cohort_id, anchor_url, matrix, report_markdown) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (cohort_id) DO UPDATE SET \
             anchor_url = EXCLUDED.anchor_url, \
             matrix = EXCLUDED.matrix, \
             report_markdown = EXCLUDED.report_markdown, \
             updated_at = NOW() \
         RETURNING id",
    )
    .bind(cohort_id)
    .bind(anchor_url)
    .bind(matrix_json)
    .bind(report_markdown)
    .fetch_one(pool)
    .await?;

    tracing::info!(cohort = cohort_id, id, "cohort matrix stored");
    Ok(id)
}

/// Fetch the stored matrix for `cohort_id`, or `None` if it was never built.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_cohort_matrix(
    pool: &PgPool,
    cohort_id: &str,
) -> Result<Option<CohortMatrixRow>, DbError> {
    let row = sqlx::query_as::<_, CohortMatrixRow>(
        "SELECT id, cohort_id, anchor_url, matrix, report_markdown, created_at, updated_at \
         FROM cohort_matrices \
         WHERE cohort_id = $1",
    )
    .bind(cohort_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
