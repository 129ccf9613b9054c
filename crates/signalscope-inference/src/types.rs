use serde::{Deserialize, Serialize};
use signalscope_core::{Confidence, DataStatus, Section};

/// The engine's judgment about one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalInference {
    pub section: Section,
    pub data_status: DataStatus,
    pub confidence: Confidence,
    /// Candidate real-world explanations for the observed status, most
    /// likely first. Offered for transparency, never asserted as fact.
    pub plausible_causes: Vec<String>,
    /// Hedged narrative reading of the status. Never empty.
    pub strategic_implication: String,
    /// What cannot be verified because of the observed status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_note: Option<String>,
}

/// Seven section inferences plus the mandatory posture paragraph.
///
/// This is also the persisted snapshot shape used for later delta
/// comparison, so field names are part of the storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredProfile {
    pub web: SignalInference,
    pub seo: SignalInference,
    pub tech_stack: SignalInference,
    pub reviews: SignalInference,
    pub social: SignalInference,
    pub hiring: SignalInference,
    pub ads: SignalInference,
    pub strategic_posture: String,
}

impl InferredProfile {
    #[must_use]
    pub fn get(&self, section: Section) -> &SignalInference {
        match section {
            Section::Web => &self.web,
            Section::Seo => &self.seo,
            Section::TechStack => &self.tech_stack,
            Section::Reviews => &self.reviews,
            Section::Social => &self.social,
            Section::Hiring => &self.hiring,
            Section::Ads => &self.ads,
        }
    }

    /// Inferences in report order.
    pub fn sections(&self) -> impl Iterator<Item = &SignalInference> {
        Section::ALL.into_iter().map(move |s| self.get(s))
    }

    /// Number of sections with the given status.
    #[must_use]
    pub fn count_status(&self, status: DataStatus) -> usize {
        self.sections().filter(|i| i.data_status == status).count()
    }
}
