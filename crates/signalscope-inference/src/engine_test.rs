use serde_json::json;
use signalscope_core::{Confidence, DataStatus, Section, SignalProfile};

use super::*;
use crate::posture::POSTURE_MARKER;

fn profile(value: serde_json::Value) -> SignalProfile {
    serde_json::from_value(value).expect("profile should deserialize")
}

fn infer(value: serde_json::Value) -> InferredProfile {
    InferenceEngine::new().infer(&profile(value))
}

#[test]
fn empty_profile_populates_every_section() {
    let out = infer(json!({}));

    for inference in out.sections() {
        assert!(
            !inference.strategic_implication.trim().is_empty(),
            "{} has an empty implication",
            inference.section
        );
        assert!(!inference.plausible_causes.is_empty());
    }
    assert!(out.strategic_posture.contains(POSTURE_MARKER));
}

#[test]
fn empty_profile_is_dark_forest_except_seo() {
    let out = infer(json!({}));

    assert_eq!(out.seo.data_status, DataStatus::Present);
    for section in Section::ALL {
        if section != Section::Seo {
            assert_eq!(out.get(section).data_status, DataStatus::Absent, "{section}");
        }
    }
    assert!(out.strategic_posture.contains("'Dark Forest'"));
}

#[test]
fn error_block_is_absent_everywhere_but_seo() {
    let err = json!({ "error": "probe failed" });
    let out = infer(json!({
        "web": err, "seo": err, "tech_stack": err, "reviews": err,
        "social": err, "hiring": err, "ads": err,
    }));

    for section in Section::ALL {
        let expected = if section == Section::Seo {
            DataStatus::Error
        } else {
            DataStatus::Absent
        };
        assert_eq!(out.get(section).data_status, expected, "{section}");
    }
}

#[test]
fn error_overrides_otherwise_strong_signals() {
    let out = infer(json!({
        "web": { "meta": { "title": "Acme" }, "error": "timeout" },
        "hiring": { "open_roles": [{ "title": "Engineer" }], "error": "403" },
        "tech_stack": { "confidence": "high", "detected_framework": "Next.js", "error": "blocked" },
    }));

    assert_eq!(out.web.data_status, DataStatus::Absent);
    assert_eq!(out.hiring.data_status, DataStatus::Absent);
    assert_eq!(out.tech_stack.data_status, DataStatus::Absent);
    assert_eq!(out.tech_stack.confidence, Confidence::None);
}

#[test]
fn null_review_summary_reads_as_private_relationships() {
    let out = infer(json!({ "reviews": { "summary": null, "error": null } }));

    assert_eq!(out.reviews.data_status, DataStatus::Absent);
    assert!(out
        .reviews
        .strategic_implication
        .to_lowercase()
        .contains("relationship"));
}

#[test]
fn missing_ads_reads_as_organic_growth() {
    let out = infer(json!({ "ads": { "platforms": [] } }));

    assert_eq!(out.ads.data_status, DataStatus::Absent);
    assert!(out.ads.strategic_implication.to_lowercase().contains("organic"));
}

#[test]
fn blank_ad_platforms_do_not_count() {
    let out = infer(json!({ "ads": { "platforms": ["", "  "] } }));
    assert_eq!(out.ads.data_status, DataStatus::Absent);
}

#[test]
fn ad_platforms_are_named() {
    let out = infer(json!({ "ads": { "platforms": ["Google Ads", "LinkedIn Ads"] } }));

    assert_eq!(out.ads.data_status, DataStatus::Present);
    assert!(out.ads.strategic_implication.contains("Google Ads, LinkedIn Ads"));
}

#[test]
fn no_social_channels_reads_as_quiet_professional() {
    let out = infer(json!({ "social": { "twitter": null, "linkedin": "" } }));

    assert_eq!(out.social.data_status, DataStatus::Absent);
    assert!(out
        .social
        .strategic_implication
        .to_lowercase()
        .contains("quiet professional"));
}

#[test]
fn tiktok_alone_counts_as_social_presence() {
    let out = infer(json!({ "social": { "tiktok": "@acme" } }));
    assert_eq!(out.social.data_status, DataStatus::Present);
}

#[test]
fn web_present_seo_partial_tech_absent() {
    let out = infer(json!({
        "web": { "meta": { "title": "Acme Corp", "description": "Widgets" } },
        "seo": { "meta_issues": ["Missing meta description"], "heading_issues": [] },
        "tech_stack": {},
    }));

    assert_eq!(out.web.data_status, DataStatus::Present);
    assert!(out.web.strategic_implication.contains("'Acme Corp'"));

    assert_eq!(out.seo.data_status, DataStatus::Partial);
    assert!(out.seo.strategic_implication.contains("friction"));
    assert_eq!(
        out.seo.risk_note.as_deref(),
        Some("Primary issue: Missing meta description")
    );

    assert_eq!(out.tech_stack.data_status, DataStatus::Absent);
}

#[test]
fn seo_issue_count_spans_both_lists() {
    let out = infer(json!({
        "seo": {
            "meta_issues": ["a", "b"],
            "heading_issues": ["c", "d", "e"],
        }
    }));

    assert_eq!(out.seo.data_status, DataStatus::Partial);
    assert!(out.seo.strategic_implication.contains("Detected 5 structural gaps"));
    assert_eq!(out.seo.risk_note.as_deref(), Some("Primary issue: a"));
}

#[test]
fn seo_first_issue_falls_through_to_headings() {
    let out = infer(json!({ "seo": { "heading_issues": ["Multiple H1 tags"] } }));
    assert_eq!(out.seo.risk_note.as_deref(), Some("Primary issue: Multiple H1 tags"));
}

#[test]
fn description_alone_is_enough_for_web_presence() {
    let out = infer(json!({ "web": { "meta": { "description": "Widgets for all" } } }));

    assert_eq!(out.web.data_status, DataStatus::Present);
    assert!(out.web.strategic_implication.contains("'Untitled'"));
}

#[test]
fn tech_without_confidence_is_indeterminate() {
    let out = infer(json!({
        "tech_stack": {
            "confidence": "none",
            "absence_interpretation": "Site is served as static HTML.",
            "limitations": ["Static export"],
        }
    }));

    let tech = &out.tech_stack;
    assert_eq!(tech.data_status, DataStatus::Absent);
    assert_eq!(tech.confidence, Confidence::None);
    assert!(tech.strategic_implication.contains("indeterminate"));
    assert!(tech.strategic_implication.contains("Site is served as static HTML."));
    assert_eq!(tech.plausible_causes, vec!["Static export".to_string()]);
}

#[test]
fn unknown_confidence_label_reads_as_none() {
    let out = infer(json!({ "tech_stack": { "confidence": "certain" } }));
    assert_eq!(out.tech_stack.confidence, Confidence::None);
    assert!(out.tech_stack.strategic_implication.contains("indeterminate"));
}

#[test]
fn tentative_tech_quotes_at_most_two_evidence_strings() {
    let out = infer(json!({
        "tech_stack": {
            "confidence": "medium",
            "probable_framework": "React",
            "evidence": ["data-reactroot attr", "bundle.js name", "third clue"],
        }
    }));

    let tech = &out.tech_stack;
    assert_eq!(tech.data_status, DataStatus::Partial);
    assert_eq!(tech.confidence, Confidence::Low);
    assert!(tech.strategic_implication.contains("React"));
    assert!(tech
        .strategic_implication
        .contains("(data-reactroot attr; bundle.js name)"));
    assert!(!tech.strategic_implication.contains("third clue"));
    assert!(tech.risk_note.is_some());
}

#[test]
fn tentative_tech_without_evidence_mentions_weak_signals() {
    let out = infer(json!({ "tech_stack": { "confidence": "low" } }));

    assert_eq!(out.tech_stack.data_status, DataStatus::Partial);
    assert!(out.tech_stack.strategic_implication.contains("weak signals"));
}

#[test]
fn high_confidence_tech_names_the_stack() {
    let out = infer(json!({
        "tech_stack": {
            "confidence": "high",
            "detected_framework": "Next.js",
            "detected_cms": "Contentful",
        }
    }));

    assert_eq!(out.tech_stack.data_status, DataStatus::Present);
    assert_eq!(out.tech_stack.confidence, Confidence::High);
    assert!(out
        .tech_stack
        .strategic_implication
        .contains("Confirmed core infrastructure: Next.js, Contentful."));
}

#[test]
fn legacy_framework_list_implies_high_confidence() {
    let out = infer(json!({ "tech_stack": { "frameworks": ["Django", "jQuery", "Bootstrap"] } }));

    assert_eq!(out.tech_stack.data_status, DataStatus::Present);
    assert!(out
        .tech_stack
        .strategic_implication
        .contains("Confirmed core infrastructure: Django, jQuery."));
}

#[test]
fn high_confidence_without_names_stays_neutral() {
    let out = infer(json!({ "tech_stack": { "confidence": "HIGH" } }));

    assert_eq!(out.tech_stack.data_status, DataStatus::Present);
    assert!(out.tech_stack.strategic_implication.contains(TECH_UNNAMED_STACK));
}

#[test]
fn hiring_counts_roles() {
    let out = infer(json!({ "hiring": { "open_roles": [{}, {}, {}] } }));

    assert_eq!(out.hiring.data_status, DataStatus::Present);
    assert!(out.hiring.strategic_implication.contains("(3 roles)"));
}

#[test]
fn inference_is_deterministic() {
    let raw = json!({
        "web": { "meta": { "title": "Acme" } },
        "seo": { "meta_issues": ["x"] },
        "ads": { "platforms": ["Meta"] },
    });
    assert_eq!(infer(raw.clone()), infer(raw));
}
