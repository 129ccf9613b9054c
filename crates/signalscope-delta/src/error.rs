use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeltaError {
    #[error("snapshot store lock poisoned")]
    StorePoisoned,

    #[error("failed to access snapshot file {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot JSON error: {0}")]
    SnapshotJson(#[from] serde_json::Error),
}
