use thiserror::Error;

#[derive(Debug, Error)]
pub enum CohortError {
    #[error("cohort not found: {0}")]
    NotFound(String),

    #[error("failed to read job results {path}: {source}")]
    JobResultsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse job results: {0}")]
    JobResultsParse(#[from] serde_json::Error),
}
