//! Sectioned analysis report.

use std::fmt::Write as _;

use signalscope_core::{DataStatus, SignalProfile};
use signalscope_delta::{DeltaReport, Significance};
use signalscope_inference::InferredProfile;

use crate::delta::delta_to_markdown;

pub const DEFAULT_FOCUS: &str = "General OSINT & growth posture";

const RED_TEAM_KEYWORDS: [&str; 5] = [
    "red team",
    "red-team",
    "opfor",
    "attack surface",
    "adversarial",
];

const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Voice of the rendered report, chosen from the focus text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTone {
    Consultant,
    /// Hostile-auditor framing with an attack-surface addendum.
    RedTeam,
}

impl ReportTone {
    #[must_use]
    pub fn from_focus(focus: Option<&str>) -> Self {
        let focus = focus.unwrap_or_default().to_lowercase();
        if RED_TEAM_KEYWORDS.iter().any(|kw| focus.contains(kw)) {
            ReportTone::RedTeam
        } else {
            ReportTone::Consultant
        }
    }
}

/// Company name for the report title: the collected name, else the page
/// title, else a generic label.
#[must_use]
pub fn company_display_name(raw: &SignalProfile) -> String {
    raw.company
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| raw.web.title())
        .unwrap_or(UNKNOWN_COMPANY)
        .to_string()
}

fn trajectory_callout(out: &mut String, delta: &DeltaReport) {
    // Whole days, truncated.
    #[allow(clippy::cast_possible_truncation)]
    let days = delta.time_elapsed_days as i64;

    let _ = writeln!(out, "> **Strategic Trajectory (Last {days} Days)**");
    let _ = writeln!(out, "> * **Stability**: {}", delta.stability_label());
    let _ = writeln!(out, "> * **Major Shifts**:");
    for shift in &delta.shifts {
        let tag = match shift.significance {
            Significance::High => "CRITICAL",
            Significance::Medium => "WARNING",
            Significance::Low => continue,
        };
        let _ = writeln!(
            out,
            ">     * [{tag}] {}: {}",
            shift.section, shift.description
        );
    }
    out.push('\n');
}

/// Render the full markdown report for one analysis.
///
/// When `delta` has shifts a trajectory callout opens the body. The change
/// appendix is always appended, stating when there is no baseline.
#[must_use]
pub fn render_report(
    profile: &InferredProfile,
    company_name: &str,
    focus: Option<&str>,
    delta: Option<&DeltaReport>,
) -> String {
    let tone = ReportTone::from_focus(focus);
    let focus = focus.filter(|f| !f.trim().is_empty()).unwrap_or(DEFAULT_FOCUS);

    let mut out = String::new();
    let _ = writeln!(out, "# OSINT Intelligence Report: {company_name}\n");
    let _ = writeln!(out, "_Focus: {focus}_\n");

    if let Some(delta) = delta.filter(|d| d.has_shifts()) {
        trajectory_callout(&mut out, delta);
    }

    for inference in profile.sections() {
        let _ = writeln!(out, "## {}\n", inference.section.report_heading());
        let _ = writeln!(
            out,
            "**Status**: {} | **Confidence**: {}\n",
            inference.data_status.as_str().to_uppercase(),
            inference.confidence.as_str().to_uppercase()
        );
        let _ = writeln!(out, "{}\n", inference.strategic_implication);

        if let Some(risk) = &inference.risk_note {
            let _ = writeln!(out, "> [!NOTE]\n> **Risk Factor**: {risk}\n");
        }

        if inference.data_status != DataStatus::Present && !inference.plausible_causes.is_empty() {
            let _ = writeln!(
                out,
                "_Potential causes: {}_\n",
                inference.plausible_causes.join(", ")
            );
        }
    }

    let _ = writeln!(out, "## 8. Strategic Recommendations\n");
    let _ = writeln!(out, "{}\n", profile.strategic_posture);

    if tone == ReportTone::RedTeam {
        let _ = writeln!(out, "## 9. Red Team Addendum\n");
        let _ = writeln!(
            out,
            "- **Attack Surface**: The gaps identified above (Absent/Partial signals) are the \
             primary entry points. Opacity is not security; it often masks negligence.\n"
        );
    }

    out.push_str(&delta_to_markdown(delta));

    out
}
