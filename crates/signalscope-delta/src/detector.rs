//! Status-transition diffing between two snapshots of one entity.

use chrono::{DateTime, Utc};
use signalscope_core::{DataStatus, Section};
use signalscope_inference::InferredProfile;

use crate::types::{DeltaReport, ShiftType, Significance, SignalShift};

const BASELINE_STABILITY: f64 = 1.0;
const HIGH_SHIFT_PENALTY: f64 = 0.2;
const MEDIUM_SHIFT_PENALTY: f64 = 0.05;

const _: () = assert!(HIGH_SHIFT_PENALTY > MEDIUM_SHIFT_PENALTY);
const _: () = assert!(HIGH_SHIFT_PENALTY <= BASELINE_STABILITY);

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Diffs `data_status` per section. Narrative text is never compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector;

impl ChangeDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compare `current` against `previous`.
    ///
    /// Only [`Section::DIFFED`] sections are examined. A `present` section
    /// that now reports `error` yields no shift: a failed probe says nothing
    /// about the entity.
    #[must_use]
    pub fn compute_delta(
        &self,
        current: &InferredProfile,
        previous: &InferredProfile,
        current_date: DateTime<Utc>,
        previous_date: DateTime<Utc>,
    ) -> DeltaReport {
        let shifts: Vec<SignalShift> = Section::DIFFED
            .into_iter()
            .filter_map(|section| {
                classify_transition(
                    section,
                    previous.get(section).data_status,
                    current.get(section).data_status,
                )
            })
            .collect();

        for shift in &shifts {
            tracing::info!(
                section = %shift.section,
                shift_type = %shift.shift_type,
                significance = %shift.significance,
                "signal shift detected"
            );
        }

        DeltaReport {
            baseline_date: previous_date,
            comparison_date: current_date,
            time_elapsed_days: elapsed_days(previous_date, current_date),
            overall_stability_score: stability_score(&shifts),
            shifts,
        }
    }
}

fn classify_transition(
    section: Section,
    previous: DataStatus,
    current: DataStatus,
) -> Option<SignalShift> {
    match (previous, current) {
        (DataStatus::Present, DataStatus::Present) => None,
        (DataStatus::Present, DataStatus::Error) => {
            tracing::debug!(section = %section, "present -> error treated as probe noise");
            None
        }
        (DataStatus::Present, now) => Some(SignalShift {
            section,
            shift_type: ShiftType::Breakage,
            description: format!(
                "{} signals have vanished (was present, now {now}).",
                section.label()
            ),
            significance: Significance::High,
        }),
        (before, DataStatus::Present) => Some(SignalShift {
            section,
            shift_type: ShiftType::Emergence,
            description: format!(
                "{} signals have emerged (previously {before}).",
                section.label()
            ),
            significance: Significance::High,
        }),
        _ => None,
    }
}

/// Start at 1.0, subtract per shift by significance, floor at 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stability_score(shifts: &[SignalShift]) -> f64 {
    let count = |level: Significance| shifts.iter().filter(|s| s.significance == level).count();

    let penalty = count(Significance::High) as f64 * HIGH_SHIFT_PENALTY
        + count(Significance::Medium) as f64 * MEDIUM_SHIFT_PENALTY;

    (BASELINE_STABILITY - penalty).max(0.0)
}

#[allow(clippy::cast_precision_loss)]
fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod tests;
