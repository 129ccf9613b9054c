//! Assemble a [`CohortMatrix`] from a cohort record and its job results.

use std::collections::HashMap;
use std::path::Path;

use signalscope_core::{CohortRecord, CohortsFile, JobResult};

use crate::error::CohortError;
use crate::normalize::{normalize_job_result, placeholder_target};
use crate::norms::{compute_cohort_norms, find_outliers};
use crate::types::{CohortMatrix, TargetSignals};

/// Build the comparison matrix for `record`.
///
/// `lookup` resolves a job id to its result. Jobs that are missing or not
/// complete contribute a placeholder vector so the target still appears in
/// the table.
pub fn build_cohort_matrix<F>(record: &CohortRecord, lookup: F) -> CohortMatrix
where
    F: Fn(&str) -> Option<JobResult>,
{
    let targets: Vec<TargetSignals> = record
        .job_ids
        .iter()
        .enumerate()
        .map(|(i, job_id)| {
            let url = record
                .confirmed_urls
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("unknown_{i}"));

            match lookup(job_id) {
                Some(job) if job.is_complete() => normalize_job_result(&job, &url),
                other => {
                    tracing::warn!(
                        cohort = %record.id,
                        job_id = %job_id,
                        status = ?other.map(|j| j.status),
                        "job not complete, using placeholder"
                    );
                    placeholder_target(&url, job_id)
                }
            }
        })
        .collect();

    let norms = compute_cohort_norms(&targets);
    let outliers = find_outliers(&targets, &norms);

    let anchor_deviations = outliers
        .iter()
        .find(|o| o.url == record.anchor_url)
        .map(|o| o.deviations.clone())
        .unwrap_or_default();

    tracing::info!(
        cohort = %record.id,
        targets = targets.len(),
        outliers = outliers.len(),
        "cohort matrix built"
    );

    CohortMatrix {
        targets,
        norms,
        outliers,
        anchor_deviations,
    }
}

/// Look up cohort `id` and build its matrix. The record is returned
/// alongside so callers can render against its anchor.
///
/// # Errors
///
/// Returns [`CohortError::NotFound`] if no cohort has that id.
pub fn build_cohort_matrix_by_id<'a, F>(
    cohorts: &'a CohortsFile,
    id: &str,
    lookup: F,
) -> Result<(&'a CohortRecord, CohortMatrix), CohortError>
where
    F: Fn(&str) -> Option<JobResult>,
{
    let record = cohorts
        .find(id)
        .ok_or_else(|| CohortError::NotFound(id.to_string()))?;
    Ok((record, build_cohort_matrix(record, lookup)))
}

/// Read a JSON object mapping job id to job result.
///
/// # Errors
///
/// Returns [`CohortError`] if the file cannot be read or parsed.
pub fn load_job_results(path: &Path) -> Result<HashMap<String, JobResult>, CohortError> {
    let content = std::fs::read_to_string(path).map_err(|source| CohortError::JobResultsIo {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
