use std::fmt;

use serde::{Deserialize, Serialize};
use signalscope_core::Confidence;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeoHygiene {
    Good,
    Fair,
    Poor,
    #[default]
    Unknown,
}

impl SeoHygiene {
    /// Bucket a structural issue count.
    #[must_use]
    pub fn from_issue_count(count: usize) -> Self {
        match count {
            0 => SeoHygiene::Good,
            1..=3 => SeoHygiene::Fair,
            _ => SeoHygiene::Poor,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SeoHygiene::Good => "good",
            SeoHygiene::Fair => "fair",
            SeoHygiene::Poor => "poor",
            SeoHygiene::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SeoHygiene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Low` is part of the stored vocabulary but normalization never emits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialVisibility {
    High,
    Low,
    #[default]
    None,
}

impl SocialVisibility {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialVisibility::High => "high",
            SocialVisibility::Low => "low",
            SocialVisibility::None => "none",
        }
    }
}

impl fmt::Display for SocialVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compact, cross-entity comparable signal vector for one target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSignals {
    pub url: String,
    pub name: Option<String>,
    pub tech_confidence: Confidence,
    pub probable_cms: Option<String>,
    pub pricing_visible: bool,
    pub docs_visible: bool,
    pub jobs_visible: bool,
    pub paid_ads_detected: bool,
    pub seo_hygiene: SeoHygiene,
    pub social_visibility: SocialVisibility,
    pub review_visibility: bool,
    /// At most five.
    pub evidence_snippets: Vec<String>,
    /// Collector failures, at most five.
    pub fetch_limits: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortNorms {
    pub total_targets: usize,
    pub pricing_visible_count: usize,
    pub docs_visible_count: usize,
    pub jobs_visible_count: usize,
    pub paid_ads_count: usize,
    pub seo_good_count: usize,
    pub social_high_count: usize,
    pub review_visible_count: usize,
    pub pricing_visible_pct: f64,
    pub docs_visible_pct: f64,
}

impl CohortNorms {
    /// Strict majority: more than half. A tie is not a majority.
    #[must_use]
    pub fn is_majority(&self, count: usize) -> bool {
        count * 2 > self.total_targets
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Shows signals the majority hides.
    Above,
    /// Hides signals the majority shows.
    Below,
    Mixed,
}

impl Direction {
    #[must_use]
    pub fn from_counts(up: usize, down: usize) -> Self {
        match up.cmp(&down) {
            std::cmp::Ordering::Greater => Direction::Above,
            std::cmp::Ordering::Less => Direction::Below,
            std::cmp::Ordering::Equal => Direction::Mixed,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
            Direction::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortOutlier {
    pub url: String,
    pub deviations: Vec<String>,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortMatrix {
    pub targets: Vec<TargetSignals>,
    pub norms: CohortNorms,
    #[serde(default)]
    pub outliers: Vec<CohortOutlier>,
    /// Deviations of the anchor, empty unless the anchor is an outlier.
    #[serde(default)]
    pub anchor_deviations: Vec<String>,
}
