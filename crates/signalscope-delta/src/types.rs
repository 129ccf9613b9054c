use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signalscope_core::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    /// A visible signal disappeared.
    Breakage,
    /// A previously hidden signal appeared.
    Emergence,
    Stability,
    Volatility,
}

impl ShiftType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftType::Breakage => "breakage",
            ShiftType::Emergence => "emergence",
            ShiftType::Stability => "stability",
            ShiftType::Volatility => "volatility",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl Significance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Significance::High => "high",
            Significance::Medium => "medium",
            Significance::Low => "low",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One status transition for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalShift {
    pub section: Section,
    pub shift_type: ShiftType,
    pub description: String,
    pub significance: Significance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub baseline_date: DateTime<Utc>,
    pub comparison_date: DateTime<Utc>,
    /// Fractional days between the two snapshots.
    pub time_elapsed_days: f64,
    pub shifts: Vec<SignalShift>,
    /// In `[0.0, 1.0]`; 1.0 means nothing moved.
    pub overall_stability_score: f64,
}

impl DeltaReport {
    #[must_use]
    pub fn stability_label(&self) -> StabilityLabel {
        StabilityLabel::from_score(self.overall_stability_score)
    }

    #[must_use]
    pub fn has_shifts(&self) -> bool {
        !self.shifts.is_empty()
    }
}

/// Presentation bucket for a stability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityLabel {
    High,
    Medium,
    Low,
}

impl StabilityLabel {
    /// `> 0.8` is High, `> 0.5` is Medium, anything else Low.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            StabilityLabel::High
        } else if score > 0.5 {
            StabilityLabel::Medium
        } else {
            StabilityLabel::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StabilityLabel::High => "High",
            StabilityLabel::Medium => "Medium",
            StabilityLabel::Low => "Low",
        }
    }
}

impl fmt::Display for StabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
