//! Cross-entity comparison for peer cohorts.
//!
//! Each completed analysis is flattened into a [`TargetSignals`] vector,
//! the cohort's vectors are counted into [`CohortNorms`], and targets that
//! contradict the majority on two or more tracked signals become
//! [`CohortOutlier`]s.

pub mod error;
pub mod matrix;
pub mod normalize;
pub mod norms;
pub mod types;

pub use error::CohortError;
pub use matrix::{build_cohort_matrix, build_cohort_matrix_by_id, load_job_results};
pub use normalize::{extract_domain, normalize_job_result, placeholder_target};
pub use norms::{compute_cohort_norms, find_outliers};
pub use types::{
    CohortMatrix, CohortNorms, CohortOutlier, Direction, SeoHygiene, SocialVisibility,
    TargetSignals,
};
