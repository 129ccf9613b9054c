//! Change and drift detection between two inferred profiles of the same
//! entity, plus the snapshot repository seam that supplies the baseline.
//!
//! `compute_delta` is pure. Loading and saving snapshots goes through
//! [`SnapshotStore`]; callers pick the backend.

pub mod detector;
pub mod error;
pub mod store;
pub mod types;

pub use detector::{stability_score, ChangeDetector};
pub use error::DeltaError;
pub use store::{
    analyze_with_history, load_snapshot_file, write_snapshot_file, AnalysisOutcome,
    MemorySnapshotStore, ProfileSnapshot, SnapshotStore,
};
pub use types::{DeltaReport, ShiftType, Significance, SignalShift, StabilityLabel};
