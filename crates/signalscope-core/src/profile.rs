//! Typed signal profiles as delivered by the external collectors.
//!
//! Collectors are loose about shape: any key may be missing, `null`, or an
//! empty collection. Every field here defaults on absence so consumers never
//! null-check at the call site.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserialize `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returns `Some` only for non-blank strings.
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub h1: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub h2: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebData {
    pub raw_html: Option<String>,
    pub clean_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub meta: WebMeta,
    pub error: Option<String>,
}

impl WebData {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        non_blank(self.error.as_ref())
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        non_blank(self.meta.title.as_ref())
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_blank(self.meta.description.as_ref())
    }

    /// Page body used for keyword checks: raw HTML, else the cleaned text.
    #[must_use]
    pub fn body_text(&self) -> &str {
        non_blank(self.raw_html.as_ref())
            .or_else(|| non_blank(self.clean_text.as_ref()))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoData {
    #[serde(deserialize_with = "null_as_default")]
    pub meta_issues: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub heading_issues: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub keyword_summary: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub internal_link_summary: Vec<Value>,
    pub error: Option<String>,
}

impl SeoData {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        non_blank(self.error.as_ref())
    }

    /// Meta issues followed by heading issues.
    pub fn issues(&self) -> impl Iterator<Item = &str> {
        self.meta_issues
            .iter()
            .chain(self.heading_issues.iter())
            .map(String::as_str)
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.meta_issues.len() + self.heading_issues.len()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStackData {
    /// Collector confidence label (`none`/`low`/`medium`/`high`). Older
    /// collectors omit it.
    pub confidence: Option<String>,
    pub detected_framework: Option<String>,
    pub detected_cms: Option<String>,
    pub probable_framework: Option<String>,
    pub probable_cms: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub evidence: Vec<String>,
    pub absence_interpretation: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub limitations: Vec<String>,
    /// Legacy list: older collectors only reported confirmed frameworks here.
    #[serde(deserialize_with = "null_as_default")]
    pub frameworks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub analytics: Vec<String>,
    pub cms: Option<String>,
    pub cdn: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub other: Vec<String>,
    pub error: Option<String>,
}

impl TechStackData {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        non_blank(self.error.as_ref())
    }

    /// The collector's confidence label, read leniently.
    #[must_use]
    pub fn reported_confidence(&self) -> crate::Confidence {
        self.confidence
            .as_deref()
            .map_or(crate::Confidence::None, crate::Confidence::from_label)
    }

    #[must_use]
    pub fn detected_framework(&self) -> Option<&str> {
        non_blank(self.detected_framework.as_ref())
    }

    #[must_use]
    pub fn detected_cms(&self) -> Option<&str> {
        non_blank(self.detected_cms.as_ref())
    }

    #[must_use]
    pub fn probable_framework(&self) -> Option<&str> {
        non_blank(self.probable_framework.as_ref())
    }

    #[must_use]
    pub fn probable_cms(&self) -> Option<&str> {
        non_blank(self.probable_cms.as_ref())
    }

    #[must_use]
    pub fn absence_interpretation(&self) -> Option<&str> {
        non_blank(self.absence_interpretation.as_ref())
    }

    /// Best CMS name available: probable, then detected, then the legacy field.
    #[must_use]
    pub fn any_cms(&self) -> Option<&str> {
        self.probable_cms()
            .or_else(|| self.detected_cms())
            .or_else(|| non_blank(self.cms.as_ref()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewsData {
    #[serde(deserialize_with = "null_as_default")]
    pub sources: Vec<Value>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_complaints: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_praises: Vec<String>,
    pub error: Option<String>,
}

impl ReviewsData {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        non_blank(self.error.as_ref())
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        non_blank(self.summary.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    Twitter,
    Linkedin,
    Instagram,
    Youtube,
    Tiktok,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::Twitter,
        SocialPlatform::Linkedin,
        SocialPlatform::Instagram,
        SocialPlatform::Youtube,
        SocialPlatform::Tiktok,
    ];

    /// Platforms counted when comparing peers across a cohort (no TikTok).
    pub const COHORT_TRACKED: [SocialPlatform; 4] = [
        SocialPlatform::Twitter,
        SocialPlatform::Linkedin,
        SocialPlatform::Instagram,
        SocialPlatform::Youtube,
    ];
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialData {
    pub twitter: Option<Value>,
    pub linkedin: Option<Value>,
    pub instagram: Option<Value>,
    pub youtube: Option<Value>,
    pub tiktok: Option<Value>,
    pub error: Option<String>,
}

impl SocialData {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        non_blank(self.error.as_ref())
    }

    #[must_use]
    pub fn channel(&self, platform: SocialPlatform) -> Option<&Value> {
        match platform {
            SocialPlatform::Twitter => self.twitter.as_ref(),
            SocialPlatform::Linkedin => self.linkedin.as_ref(),
            SocialPlatform::Instagram => self.instagram.as_ref(),
            SocialPlatform::Youtube => self.youtube.as_ref(),
            SocialPlatform::Tiktok => self.tiktok.as_ref(),
        }
    }

    /// True if any of `platforms` carries a truthy handle or payload.
    #[must_use]
    pub fn has_any_channel(&self, platforms: &[SocialPlatform]) -> bool {
        platforms
            .iter()
            .any(|&p| self.channel(p).is_some_and(is_truthy))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HiringData {
    #[serde(deserialize_with = "null_as_default")]
    pub open_roles: Vec<Value>,
    pub inferred_focus: Option<String>,
    pub error: Option<String>,
}

impl HiringData {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        non_blank(self.error.as_ref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdsData {
    #[serde(deserialize_with = "null_as_default")]
    pub platforms: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub themes: Vec<String>,
    pub error: Option<String>,
}

impl AdsData {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        non_blank(self.error.as_ref())
    }
}

/// The normalized per-entity OSINT record consumed by the inference engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub company: CompanyInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub web: WebData,
    #[serde(deserialize_with = "null_as_default")]
    pub seo: SeoData,
    #[serde(deserialize_with = "null_as_default")]
    pub tech_stack: TechStackData,
    #[serde(deserialize_with = "null_as_default")]
    pub reviews: ReviewsData,
    #[serde(deserialize_with = "null_as_default")]
    pub social: SocialData,
    #[serde(deserialize_with = "null_as_default")]
    pub hiring: HiringData,
    #[serde(deserialize_with = "null_as_default")]
    pub ads: AdsData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Complete,
    Failed,
}

/// A finished (or unfinished) analysis job as seen by cohort aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobResult {
    pub status: JobStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub result: SignalProfile,
}

impl JobResult {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == JobStatus::Complete
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
