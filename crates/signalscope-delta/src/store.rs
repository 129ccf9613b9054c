//! Snapshot repository seam and the analyze-then-compare flow built on it.

use std::future::Future;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signalscope_core::SignalProfile;
use signalscope_inference::{InferenceEngine, InferredProfile};

use crate::detector::ChangeDetector;
use crate::error::DeltaError;
use crate::types::DeltaReport;

/// One persisted analysis of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub entity_url: String,
    pub captured_at: DateTime<Utc>,
    pub profile: InferredProfile,
    /// Stability against the snapshot before this one, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability_score: Option<f64>,
}

/// Storage for inferred-profile snapshots keyed by entity URL.
pub trait SnapshotStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Most recent snapshot for `entity_url` captured strictly before `before`.
    fn latest_before(
        &self,
        entity_url: &str,
        before: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<ProfileSnapshot>, Self::Error>> + Send;

    fn save(
        &self,
        snapshot: &ProfileSnapshot,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Up to `limit` snapshots for `entity_url`, newest first.
    fn list_recent(
        &self,
        entity_url: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ProfileSnapshot>, Self::Error>> + Send;
}

/// In-process store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<Vec<ProfileSnapshot>>,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store, e.g. from a baseline file.
    #[must_use]
    pub fn with_snapshots(snapshots: Vec<ProfileSnapshot>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ProfileSnapshot>>, DeltaError> {
        self.snapshots.lock().map_err(|_| DeltaError::StorePoisoned)
    }

    /// Number of stored snapshots across all entities.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::StorePoisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, DeltaError> {
        Ok(self.lock()?.len())
    }

    /// # Errors
    ///
    /// Returns [`DeltaError::StorePoisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, DeltaError> {
        Ok(self.lock()?.is_empty())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    type Error = DeltaError;

    fn latest_before(
        &self,
        entity_url: &str,
        before: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<ProfileSnapshot>, Self::Error>> + Send {
        let result = self.lock().map(|snapshots| {
            snapshots
                .iter()
                .filter(|s| s.entity_url == entity_url && s.captured_at < before)
                .max_by_key(|s| s.captured_at)
                .cloned()
        });
        std::future::ready(result)
    }

    fn save(
        &self,
        snapshot: &ProfileSnapshot,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let result = self.lock().map(|mut snapshots| snapshots.push(snapshot.clone()));
        std::future::ready(result)
    }

    fn list_recent(
        &self,
        entity_url: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ProfileSnapshot>, Self::Error>> + Send {
        let take = usize::try_from(limit).unwrap_or(0);
        let result = self.lock().map(|snapshots| {
            let mut matching: Vec<ProfileSnapshot> = snapshots
                .iter()
                .filter(|s| s.entity_url == entity_url)
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
            matching.truncate(take);
            matching
        });
        std::future::ready(result)
    }
}

/// Result of one analysis run against stored history.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub snapshot: ProfileSnapshot,
    pub delta: Option<DeltaReport>,
}

/// Infer `raw`, compare it to the newest stored snapshot for `entity_url`,
/// and persist the new snapshot.
///
/// The baseline is read before the new snapshot is written. Concurrent runs
/// for the same entity are not serialized here.
///
/// # Errors
///
/// Returns the store's error if loading or saving fails. Inference itself
/// cannot fail.
pub async fn analyze_with_history<S: SnapshotStore>(
    engine: &InferenceEngine,
    store: &S,
    entity_url: &str,
    raw: &SignalProfile,
    now: DateTime<Utc>,
) -> Result<AnalysisOutcome, S::Error> {
    let profile = engine.infer(raw);

    let previous = store.latest_before(entity_url, now).await?;
    let delta = previous.as_ref().map(|prev| {
        tracing::info!(
            entity = entity_url,
            baseline = %prev.captured_at,
            "comparing against stored snapshot"
        );
        ChangeDetector::new().compute_delta(&profile, &prev.profile, now, prev.captured_at)
    });
    if previous.is_none() {
        tracing::info!(entity = entity_url, "no prior snapshot, skipping delta");
    }

    let snapshot = ProfileSnapshot {
        entity_url: entity_url.to_string(),
        captured_at: now,
        profile,
        stability_score: delta.as_ref().map(|d| d.overall_stability_score),
    };
    store.save(&snapshot).await?;
    tracing::info!(entity = entity_url, captured_at = %now, "snapshot saved");

    Ok(AnalysisOutcome { snapshot, delta })
}

/// Read a snapshot written by [`write_snapshot_file`].
///
/// # Errors
///
/// Returns [`DeltaError`] if the file cannot be read or is not a snapshot.
pub fn load_snapshot_file(path: &Path) -> Result<ProfileSnapshot, DeltaError> {
    let content = std::fs::read_to_string(path).map_err(|source| DeltaError::SnapshotIo {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// # Errors
///
/// Returns [`DeltaError`] if serialization or the write fails.
pub fn write_snapshot_file(path: &Path, snapshot: &ProfileSnapshot) -> Result<(), DeltaError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).map_err(|source| DeltaError::SnapshotIo {
        path: path.display().to_string(),
        source,
    })
}
