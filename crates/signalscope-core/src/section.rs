//! Closed vocabularies shared by the inference, delta, and report layers.

use serde::{Deserialize, Serialize};

/// One public OSINT surface. The set is fixed; iteration order is the report
/// order (web, SEO, tech, reviews, social, hiring, ads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Web Presence")]
    Web,
    #[serde(rename = "SEO Diagnostics")]
    Seo,
    #[serde(rename = "Tech Stack")]
    TechStack,
    #[serde(rename = "Customer Voice")]
    Reviews,
    #[serde(rename = "Social Footprint")]
    Social,
    #[serde(rename = "Hiring Signals")]
    Hiring,
    #[serde(rename = "Paid Media")]
    Ads,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Web,
        Section::Seo,
        Section::TechStack,
        Section::Reviews,
        Section::Social,
        Section::Hiring,
        Section::Ads,
    ];

    /// Sections compared by the change detector, in comparison order.
    ///
    /// Customer Voice is not diffed; see DESIGN.md before adding it.
    pub const DIFFED: [Section; 6] = [
        Section::Web,
        Section::Seo,
        Section::TechStack,
        Section::Hiring,
        Section::Social,
        Section::Ads,
    ];

    /// Human-readable label used in inferences, shifts, and reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Section::Web => "Web Presence",
            Section::Seo => "SEO Diagnostics",
            Section::TechStack => "Tech Stack",
            Section::Reviews => "Customer Voice",
            Section::Social => "Social Footprint",
            Section::Hiring => "Hiring Signals",
            Section::Ads => "Paid Media",
        }
    }

    /// Key of this surface in a raw signal profile.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Section::Web => "web",
            Section::Seo => "seo",
            Section::TechStack => "tech_stack",
            Section::Reviews => "reviews",
            Section::Social => "social",
            Section::Hiring => "hiring",
            Section::Ads => "ads",
        }
    }

    /// Numbered markdown heading used by the sectioned report.
    #[must_use]
    pub fn report_heading(self) -> &'static str {
        match self {
            Section::Web => "1. Web Presence",
            Section::Seo => "2. SEO Diagnostics",
            Section::TechStack => "3. Tech Stack Fingerprint",
            Section::Reviews => "4. Customer Voice & Reviews",
            Section::Social => "5. Social Footprint",
            Section::Hiring => "6. Hiring & Org Signals",
            Section::Ads => "7. Ads & Growth Motions",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How much usable signal was observed for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    Present,
    Absent,
    Partial,
    Error,
}

impl DataStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DataStatus::Present => "present",
            DataStatus::Absent => "absent",
            DataStatus::Partial => "partial",
            DataStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for DataStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::None => "none",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    /// Parse a collector-supplied confidence label.
    ///
    /// Matching is case-insensitive. Labels outside the taxonomy are read as
    /// [`Confidence::None`]: an unreadable label tells us nothing.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Confidence::Low,
            "medium" => Confidence::Medium,
            "high" => Confidence::High,
            _ => Confidence::None,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
