//! Per-surface classification rules.
//!
//! Each surface is judged independently by a small decision tree over the
//! shape of its collected block. Only posture synthesis looks across
//! surfaces.

use signalscope_core::{
    AdsData, Confidence, DataStatus, HiringData, ReviewsData, Section, SeoData, SignalProfile,
    SocialData, SocialPlatform, TechStackData, WebData,
};

use crate::posture::synthesize_posture;
use crate::types::{InferredProfile, SignalInference};

const TECH_NO_MARKERS: &str = "No identifiable framework markers found in HTML.";
const TECH_UNNAMED_STACK: &str = "an unlabelled but fingerprinted toolchain";

/// Evidence strings quoted inline for tentative tech detections.
const TECH_EVIDENCE_QUOTED: usize = 2;

/// Stateless, deterministic inference engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceEngine;

impl InferenceEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Interpret a collected profile.
    ///
    /// Total over its input: an empty profile yields seven populated
    /// inferences and a posture paragraph.
    #[must_use]
    pub fn infer(&self, raw: &SignalProfile) -> InferredProfile {
        let web = log_inference(infer_web(&raw.web));
        let seo = log_inference(infer_seo(&raw.seo));
        let tech_stack = log_inference(infer_tech(&raw.tech_stack));
        let reviews = log_inference(infer_reviews(&raw.reviews));
        let social = log_inference(infer_social(&raw.social));
        let hiring = log_inference(infer_hiring(&raw.hiring));
        let ads = log_inference(infer_ads(&raw.ads));

        let strategic_posture =
            synthesize_posture(&[&web, &seo, &tech_stack, &reviews, &social, &hiring, &ads]);

        InferredProfile {
            web,
            seo,
            tech_stack,
            reviews,
            social,
            hiring,
            ads,
            strategic_posture,
        }
    }
}

fn log_inference(inference: SignalInference) -> SignalInference {
    tracing::debug!(
        section = %inference.section,
        status = %inference.data_status,
        confidence = %inference.confidence,
        "section classified"
    );
    inference
}

fn inference(
    section: Section,
    data_status: DataStatus,
    confidence: Confidence,
    causes: &[&str],
    strategic_implication: String,
    risk_note: Option<String>,
) -> SignalInference {
    SignalInference {
        section,
        data_status,
        confidence,
        plausible_causes: causes.iter().map(|c| (*c).to_string()).collect(),
        strategic_implication,
        risk_note,
    }
}

fn infer_web(data: &WebData) -> SignalInference {
    let title = data.title();

    if data.error_message().is_some() || (title.is_none() && data.description().is_none()) {
        return inference(
            Section::Web,
            DataStatus::Absent,
            Confidence::Medium,
            &[
                "WAF Blocking",
                "Single-Page App (SPA) unrendered",
                "Private / Intranet site",
            ],
            "The organization maintains a shielded digital perimeter. \
             This suggests a strategy that prioritizes security or privacy over \
             broad public discoverability, common in specialized B2B or defense sectors."
                .to_string(),
            Some("Opacity prevents verification of public messaging alignment.".to_string()),
        );
    }

    inference(
        Section::Web,
        DataStatus::Present,
        Confidence::High,
        &["Standard public indexing"],
        format!(
            "The organization actively manages its digital front door, positioning itself via '{}'. \
             This indicates a reliance on inbound web traffic as a credibility signal.",
            title.unwrap_or("Untitled")
        ),
        None,
    )
}

fn infer_seo(data: &SeoData) -> SignalInference {
    if data.error_message().is_some() {
        return inference(
            Section::Seo,
            DataStatus::Error,
            Confidence::Low,
            &["Anti-bot defenses", "Malformed HTML structure"],
            "Technical barriers prevent standard SEO auditing. \
             Strategically, this implies organic search is not a primary growth lever, \
             or the brand relies on direct traffic and reputation."
                .to_string(),
            None,
        );
    }

    let Some(first_issue) = data.issues().next() else {
        return inference(
            Section::Seo,
            DataStatus::Present,
            Confidence::High,
            &["Mature marketing ops", "Technical SEO investment"],
            "Zero structural SEO issues detected. This signals a disciplined, \
             technically mature marketing operation that treats discoverability as a core asset."
                .to_string(),
            None,
        );
    };

    inference(
        Section::Seo,
        DataStatus::Partial,
        Confidence::Medium,
        &[
            "Legacy CMS",
            "Neglected maintenance",
            "Brand-focused vs Search-focused",
        ],
        format!(
            "Detected {} structural gaps between the brand's intent and its technical reality. \
             This friction suggests marketing execution lags behind strategy, \
             potentially bleeding organic traffic.",
            data.issue_count()
        ),
        Some(format!("Primary issue: {first_issue}")),
    )
}

/// Effective confidence for a tech block.
///
/// A collector error leaves nothing to judge. Older collectors sent only a
/// `frameworks` list of confirmed hits and no confidence label, so a
/// non-empty list without a label reads as high confidence.
fn tech_confidence(data: &TechStackData) -> Confidence {
    if data.error_message().is_some() {
        return Confidence::None;
    }
    match data.reported_confidence() {
        Confidence::None if !data.frameworks.is_empty() => Confidence::High,
        other => other,
    }
}

fn legacy_frameworks(data: &TechStackData) -> Vec<&str> {
    data.frameworks
        .iter()
        .map(String::as_str)
        .filter(|f| !f.trim().is_empty())
        .take(2)
        .collect()
}

fn infer_tech(data: &TechStackData) -> SignalInference {
    match tech_confidence(data) {
        Confidence::None => {
            let reason = data.absence_interpretation().unwrap_or(TECH_NO_MARKERS);
            let causes: Vec<&str> = if data.limitations.is_empty() {
                vec!["Heavily cached", "Static HTML", "Custom"]
            } else {
                data.limitations.iter().map(String::as_str).collect()
            };
            inference(
                Section::TechStack,
                DataStatus::Absent,
                Confidence::None,
                &causes,
                format!(
                    "The technology stack is indeterminate based on public signals. {reason} \
                     Infrastructure complexity and maintenance burden cannot be assessed."
                ),
                Some(
                    "Opacity prevents assessing maintenance risks or infrastructure capability."
                        .to_string(),
                ),
            )
        }
        Confidence::Low | Confidence::Medium => {
            let mut signals: Vec<&str> = [data.probable_framework(), data.probable_cms()]
                .into_iter()
                .flatten()
                .collect();
            if signals.is_empty() {
                signals = legacy_frameworks(data);
            }
            let named = if signals.is_empty() {
                "unidentified text-based signals".to_string()
            } else {
                signals.join(", ")
            };
            let evidence = if data.evidence.is_empty() {
                "weak signals".to_string()
            } else {
                data.evidence
                    .iter()
                    .take(TECH_EVIDENCE_QUOTED)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            inference(
                Section::TechStack,
                DataStatus::Partial,
                Confidence::Low,
                &["Non-standard implementation", "Obfuscated headers"],
                format!(
                    "Traces suggest a likely reliance on {named}. \
                     Evidence is present ({evidence}) but lacks canonical authority. \
                     This suggests a custom implementation or a headless architecture."
                ),
                Some(
                    "Tech identification is tentative; verify before making integration decisions."
                        .to_string(),
                ),
            )
        }
        Confidence::High => {
            let mut stack: Vec<&str> = [data.detected_framework(), data.detected_cms()]
                .into_iter()
                .flatten()
                .collect();
            if stack.is_empty() {
                stack = legacy_frameworks(data);
            }
            let named = if stack.is_empty() {
                TECH_UNNAMED_STACK.to_string()
            } else {
                stack.join(", ")
            };
            inference(
                Section::TechStack,
                DataStatus::Present,
                Confidence::High,
                &["Modern SaaS composability", "Standard CMS deployment"],
                format!(
                    "Confirmed core infrastructure: {named}. \
                     The organization relies on established, standard tooling, which likely allows \
                     predictable talent sourcing and easier third-party integrations."
                ),
                None,
            )
        }
    }
}

fn infer_reviews(data: &ReviewsData) -> SignalInference {
    if data.error_message().is_some() || data.summary().is_none() {
        return inference(
            Section::Reviews,
            DataStatus::Absent,
            Confidence::Medium,
            &["B2B/Enterprise model", "NDAs", "Offline transaction loop"],
            "The absence of public reviews strongly suggests an enterprise Sales-Led Growth (SLG) motion. \
             Trust is likely built through private relationships, RFPs, and references \
             rather than public social proof."
                .to_string(),
            Some("Lack of public feedback loop creates a blind spot for market sentiment.".to_string()),
        );
    }

    inference(
        Section::Reviews,
        DataStatus::Present,
        Confidence::Medium,
        &["PLG motion", "Consumer-facing brand"],
        "Public sentiment is visible and active, indicating a Product-Led or Consumer-focused model. \
         The brand's reputation is decentralized and vulnerable to viral variance."
            .to_string(),
        None,
    )
}

fn infer_social(data: &SocialData) -> SignalInference {
    if data.error_message().is_some() || !data.has_any_channel(&SocialPlatform::ALL) {
        return inference(
            Section::Social,
            DataStatus::Absent,
            Confidence::High,
            &["Low-profile strategy", "Enterprise focus", "Resource constraint"],
            "The minimal social footprint suggests a 'Quiet Professional' posture. \
             The organization likely views social media as a liability or irrelevant channel, \
             choosing to control its narrative through owned channels (website/PR) only."
                .to_string(),
            None,
        );
    }

    inference(
        Section::Social,
        DataStatus::Present,
        Confidence::High,
        &["Brand-building investment", "Community engagement"],
        "Active social channels signal a desire to own the narrative in the public square. \
         The organization likely invests in community engagement as a defensive moat."
            .to_string(),
        None,
    )
}

fn infer_hiring(data: &HiringData) -> SignalInference {
    if data.error_message().is_some() || data.open_roles.is_empty() {
        return inference(
            Section::Hiring,
            DataStatus::Absent,
            Confidence::Medium,
            &[
                "Low turnover",
                "Hiring freeze",
                "Outsourced recruiting",
                "Stealth mode",
            ],
            "No visible open roles suggests a stable, low-turnover environment or a hiring freeze. \
             Growth is likely being absorbed by existing capacity or outsourced partners \
             rather than new headcount."
                .to_string(),
            None,
        );
    }

    inference(
        Section::Hiring,
        DataStatus::Present,
        Confidence::High,
        &["Expansion mode", "High churn", "New capability build"],
        format!(
            "Visible hiring ({} roles) indicates an expansion phase. \
             The organization appears to be trading capital for human capacity to capture market share.",
            data.open_roles.len()
        ),
        None,
    )
}

fn infer_ads(data: &AdsData) -> SignalInference {
    let platforms: Vec<&str> = data
        .platforms
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect();

    if data.error_message().is_some() || platforms.is_empty() {
        return inference(
            Section::Ads,
            DataStatus::Absent,
            Confidence::Medium,
            &[
                "Organic Growth",
                "Sales-Led Growth",
                "High LTV/CAC sensitivity",
            ],
            "Theoretical absence of paid media signals an Organic or Sales-Led Growth model. \
             The company does not appear to pay for attention, likely relying instead on brand equity \
             or direct sales outreach to generate leads."
                .to_string(),
            None,
        );
    }

    inference(
        Section::Ads,
        DataStatus::Present,
        Confidence::High,
        &["Performance marketing", "Demand capture"],
        format!(
            "Active paid acquisition on {} suggests a machine-like 'Pay-to-Play' growth model. \
             The business economics likely support high CAC, implying strong LTV or aggressive land-grab goals.",
            platforms.join(", ")
        ),
        None,
    )
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
