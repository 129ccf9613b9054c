//! Aggregate posture synthesis across all seven section inferences.

use signalscope_core::{DataStatus, Section};

use crate::types::SignalInference;

/// Every posture paragraph opens with this phrase. Downstream checks rely on it.
pub const POSTURE_MARKER: &str = "The target exhibits";

const STRUCTURE_SENTENCE: &str = "Structurally, the organization appears optimized for control \
     and stability rather than viral speed.";
const CLOSING_SENTENCE: &str = "Primary vulnerability is likely the gap between internal reality \
     and external perception.";

/// Overall public-signal transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureProfile {
    /// Opaque: absences outnumber presences more than two to one.
    DarkForest,
    /// Transparent: more surfaces present than absent.
    GlassHouse,
    Hybrid,
}

impl PostureProfile {
    /// Classify from section counts. `error` counts as absent; `partial`
    /// counts toward neither side.
    #[must_use]
    pub fn classify(inferences: &[&SignalInference]) -> Self {
        let present = inferences
            .iter()
            .filter(|i| i.data_status == DataStatus::Present)
            .count();
        let absent = inferences
            .iter()
            .filter(|i| matches!(i.data_status, DataStatus::Absent | DataStatus::Error))
            .count();

        if absent > present * 2 {
            PostureProfile::DarkForest
        } else if present > absent {
            PostureProfile::GlassHouse
        } else {
            PostureProfile::Hybrid
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PostureProfile::DarkForest => "Dark Forest",
            PostureProfile::GlassHouse => "Glass House",
            PostureProfile::Hybrid => "Hybrid",
        }
    }

    fn density_paragraph(self) -> &'static str {
        match self {
            PostureProfile::DarkForest => {
                "The target exhibits a 'Dark Forest' signals profile. Public data is scarce, \
                 indicating an organization that operates via private relationships, legacy channels, \
                 or intentional stealth."
            }
            PostureProfile::GlassHouse => {
                "The target exhibits a 'Glass House' signals profile. Digital operations are highly visible, \
                 suggesting a modern, transparent organization that competes in the open market."
            }
            PostureProfile::Hybrid => {
                "The target exhibits a 'Hybrid' signals profile, with strong visibility in some vectors \
                 and opacity in others (likely separating public brand from private operations)."
            }
        }
    }
}

fn has_status(inferences: &[&SignalInference], section: Section, status: DataStatus) -> bool {
    inferences
        .iter()
        .any(|i| i.section == section && i.data_status == status)
}

/// Pick the single most telling factor, by fixed priority: hidden customer
/// voice, then visible paid media, then a maintained website.
fn key_factor(inferences: &[&SignalInference]) -> &'static str {
    if has_status(inferences, Section::Reviews, DataStatus::Absent) {
        "It relies on reputation over public validation"
    } else if has_status(inferences, Section::Ads, DataStatus::Present) {
        "It uses capital to force-multiply growth"
    } else if has_status(inferences, Section::Web, DataStatus::Present) {
        "It treats its web presence as a primary asset"
    } else {
        "Unknown"
    }
}

/// Produce the mandatory strategic posture paragraph.
///
/// Always non-empty and always contains [`POSTURE_MARKER`].
#[must_use]
pub fn synthesize_posture(inferences: &[&SignalInference]) -> String {
    let profile = PostureProfile::classify(inferences);
    tracing::debug!(posture = profile.label(), "posture synthesized");

    format!(
        "{} {STRUCTURE_SENTENCE} {}. {CLOSING_SENTENCE}",
        profile.density_paragraph(),
        key_factor(inferences),
    )
}
