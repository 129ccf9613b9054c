use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use signalscope_cohort::{
    CohortMatrix, CohortNorms, CohortOutlier, Direction, SeoHygiene, SocialVisibility,
    TargetSignals,
};
use signalscope_core::{Confidence, DataStatus, Section, SignalProfile};
use signalscope_delta::{ChangeDetector, DeltaReport, ShiftType, Significance, SignalShift};
use signalscope_inference::{InferenceEngine, InferredProfile, POSTURE_MARKER};
use signalscope_report::{
    delta_to_markdown, generate_cohort_report, render_report, DEFAULT_FOCUS, FORBIDDEN_PHRASES,
};

fn infer(value: serde_json::Value) -> InferredProfile {
    let raw: SignalProfile = serde_json::from_value(value).unwrap();
    InferenceEngine::new().infer(&raw)
}

fn delta_with(shifts: Vec<SignalShift>, score: f64) -> DeltaReport {
    let t0 = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
    DeltaReport {
        baseline_date: t0,
        comparison_date: t0 + Duration::days(12) + Duration::hours(6),
        time_elapsed_days: 12.25,
        shifts,
        overall_stability_score: score,
    }
}

fn shift(section: Section, significance: Significance) -> SignalShift {
    SignalShift {
        section,
        shift_type: ShiftType::Breakage,
        description: format!("{} signals have vanished (was present, now absent).", section.label()),
        significance,
    }
}

fn assert_no_forbidden(text: &str) {
    let lower = text.to_lowercase();
    for phrase in FORBIDDEN_PHRASES {
        assert!(!lower.contains(phrase), "report contains {phrase:?}");
    }
}

#[test]
fn empty_profile_report_has_every_heading_and_no_forbidden_phrases() {
    let report = render_report(&infer(json!({})), "Acme", None, None);

    assert!(report.starts_with("# OSINT Intelligence Report: Acme\n"));
    assert!(report.contains(&format!("_Focus: {DEFAULT_FOCUS}_")));
    for section in Section::ALL {
        assert!(report.contains(&format!("## {}", section.report_heading())));
    }
    assert!(report.contains("## 8. Strategic Recommendations"));
    assert!(report.contains(POSTURE_MARKER));
    assert!(!report.contains("## 9. Red Team Addendum"));
    assert!(report.contains("## Change Since Last Snapshot"));
    assert!(report.contains("No prior snapshot available."));
    assert_no_forbidden(&report);
}

#[test]
fn error_profile_report_has_no_forbidden_phrases() {
    let err = json!({ "error": "Data not available from upstream" });
    let profile = infer(json!({ "web": err, "seo": err, "reviews": err }));
    let report = render_report(&profile, "Acme", Some("growth"), None);

    assert!(report.contains("**Status**: ERROR | **Confidence**: LOW"));
    assert_no_forbidden(&report);
}

#[test]
fn sections_render_status_risk_and_causes() {
    let report = render_report(
        &infer(json!({
            "web": { "meta": { "title": "Acme" } },
            "seo": { "meta_issues": ["Missing meta description"] },
        })),
        "Acme",
        None,
        None,
    );

    assert!(report.contains("**Status**: PRESENT | **Confidence**: HIGH"));
    assert!(report.contains("> [!NOTE]\n> **Risk Factor**: Primary issue: Missing meta description"));
    assert!(report.contains("_Potential causes: Legacy CMS, Neglected maintenance, Brand-focused vs Search-focused_"));
    assert!(!report.contains("_Potential causes: Standard public indexing_"));
}

#[test]
fn red_team_focus_adds_addendum() {
    let report = render_report(&infer(json!({})), "Acme", Some("Red Team assessment"), None);

    assert!(report.contains("_Focus: Red Team assessment_"));
    assert!(report.contains("## 9. Red Team Addendum"));
    assert!(report.contains("**Attack Surface**"));
}

#[test]
fn trajectory_callout_lists_high_and_medium_shifts() {
    let delta = delta_with(
        vec![
            shift(Section::Hiring, Significance::High),
            shift(Section::Ads, Significance::Medium),
            shift(Section::Social, Significance::Low),
        ],
        0.75,
    );
    let report = render_report(&infer(json!({})), "Acme", None, Some(&delta));

    assert!(report.contains("> **Strategic Trajectory (Last 12 Days)**"));
    assert!(report.contains("> * **Stability**: Medium"));
    assert!(report.contains(">     * [CRITICAL] Hiring Signals: Hiring Signals signals have vanished"));
    assert!(report.contains(">     * [WARNING] Paid Media:"));
    assert!(!report.contains("Social Footprint: Social Footprint signals"));

    let trajectory = report.find("Strategic Trajectory").unwrap();
    let first_section = report.find("## 1. Web Presence").unwrap();
    assert!(trajectory < first_section);
    assert!(report.contains("## Change Since Last Snapshot"));
}

#[test]
fn quiet_delta_has_no_callout() {
    let delta = delta_with(vec![], 1.0);
    let report = render_report(&infer(json!({})), "Acme", None, Some(&delta));

    assert!(!report.contains("Strategic Trajectory"));
    assert!(report.contains("No significant changes detected"));
}

#[test]
fn delta_markdown_without_baseline() {
    let md = delta_to_markdown(None);
    assert!(md.starts_with("## Change Since Last Snapshot"));
    assert!(md.contains("No prior snapshot available."));
}

#[test]
fn delta_markdown_without_shifts_names_the_baseline() {
    let md = delta_to_markdown(Some(&delta_with(vec![], 1.0)));

    assert!(md.contains("No significant changes detected"));
    assert!(md.contains("2026-04-01 09:00 UTC"));
    assert!(md.contains("**Overall Stability Score**: 1.00 (High)"));
    assert!(!md.contains("Detected Shifts"));
}

#[test]
fn delta_markdown_lists_shifts_with_icons() {
    let md = delta_to_markdown(Some(&delta_with(
        vec![
            shift(Section::Web, Significance::High),
            shift(Section::Seo, Significance::Medium),
            shift(Section::Ads, Significance::Low),
        ],
        0.4,
    )));

    assert!(md.contains("### Detected Shifts"));
    assert!(md.contains("- 🔴 **Web Presence** (breakage):"));
    assert!(md.contains("- 🟡 **SEO Diagnostics** (breakage):"));
    assert!(md.contains("- ⚪ **Paid Media** (breakage):"));
    assert!(md.contains("**Overall Stability Score**: 0.40 (Low)"));
}

#[test]
fn detector_output_renders_end_to_end() {
    let previous = infer(json!({ "hiring": { "open_roles": ["SRE"] } }));
    let current = infer(json!({}));
    let t0 = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
    let delta = ChangeDetector::new().compute_delta(&current, &previous, t0 + Duration::days(9), t0);

    let md = delta_to_markdown(Some(&delta));
    assert!(md.contains("Hiring Signals signals have vanished (was present, now absent)."));
    assert!(md.contains("**Overall Stability Score**: 0.80 (Medium)"));
    assert_eq!(current.hiring.data_status, DataStatus::Absent);
}

fn target(url: &str, pricing: bool) -> TargetSignals {
    TargetSignals {
        url: url.to_string(),
        tech_confidence: Confidence::High,
        probable_cms: pricing.then(|| "WordPress".to_string()),
        pricing_visible: pricing,
        seo_hygiene: SeoHygiene::Fair,
        social_visibility: SocialVisibility::High,
        ..TargetSignals::default()
    }
}

#[test]
fn cohort_report_renders_norms_outliers_and_disclaimer() {
    let matrix = CohortMatrix {
        targets: vec![target("https://www.anchor.com", false), target("https://b.io", true)],
        norms: CohortNorms {
            total_targets: 2,
            pricing_visible_count: 1,
            pricing_visible_pct: 50.0,
            social_high_count: 2,
            ..CohortNorms::default()
        },
        outliers: vec![CohortOutlier {
            url: "https://www.anchor.com".to_string(),
            deviations: vec!["No visible pricing (norm: visible)".to_string(), "No visible docs (norm: visible)".to_string()],
            direction: Direction::Below,
        }],
        anchor_deviations: vec!["No visible pricing (norm: visible)".to_string()],
    };

    let md = generate_cohort_report(&matrix, "https://www.anchor.com");

    assert!(md.starts_with("# SaaS Cohort Comparative Analysis"));
    assert!(md.contains("_Cohort Size: 2 targets_"));
    assert!(md.contains("- **Pricing Visible**: 1/2 (50.0%)"));
    assert!(md.contains("- **Docs Visible**: 0/2 (0.0%)"));
    assert!(md.contains("### https://www.anchor.com (below)"));
    assert!(md.contains("## Anchor Deviations"));
    assert!(md.contains("| anchor.com | high | - | - | - | - | - | fair | high | - |"));
    assert!(md.contains("| b.io | high | WordPress | ✓ |"));
    assert!(md.contains("## What Cannot Be Validated from Public Signals"));
    assert!(md.contains("- Competitive positioning or market share"));
    assert!(md.trim_end().ends_with("_Absence of signals should not be interpreted as sophistication or prestige._"));
}

#[test]
fn cohort_report_without_outliers() {
    let matrix = CohortMatrix {
        targets: vec![],
        norms: CohortNorms::default(),
        outliers: vec![],
        anchor_deviations: vec![],
    };
    let md = generate_cohort_report(&matrix, "https://a.com");

    assert!(md.contains("_No significant outliers detected._"));
    assert!(!md.contains("## Anchor Deviations"));
}
