use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A confirmed peer cohort: the anchor plus the analysis job launched for each
/// confirmed URL. `job_ids[i]` was started for `confirmed_urls[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortRecord {
    pub id: String,
    pub anchor_url: String,
    #[serde(default)]
    pub confirmed_urls: Vec<String>,
    #[serde(default)]
    pub job_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CohortsFile {
    pub cohorts: Vec<CohortRecord>,
}

impl CohortsFile {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CohortRecord> {
        self.cohorts.iter().find(|c| c.id == id)
    }
}

/// Load and validate cohort definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_cohorts(path: &Path) -> Result<CohortsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CohortsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_cohorts(&content)
}

fn parse_cohorts(content: &str) -> Result<CohortsFile, ConfigError> {
    let cohorts_file: CohortsFile =
        serde_yaml::from_str(content).map_err(ConfigError::CohortsFileParse)?;

    validate_cohorts(&cohorts_file)?;

    Ok(cohorts_file)
}

fn validate_cohorts(cohorts_file: &CohortsFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for cohort in &cohorts_file.cohorts {
        if cohort.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cohort id must be non-empty".to_string(),
            ));
        }

        if cohort.anchor_url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "cohort '{}' has an empty anchor_url",
                cohort.id
            )));
        }

        if !seen_ids.insert(cohort.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate cohort id: '{}'",
                cohort.id
            )));
        }
    }

    Ok(())
}
