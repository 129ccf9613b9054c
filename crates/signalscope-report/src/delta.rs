use std::fmt::Write as _;

use signalscope_delta::{DeltaReport, Significance};

use crate::DATE_FORMAT;

fn significance_icon(significance: Significance) -> &'static str {
    match significance {
        Significance::High => "🔴",
        Significance::Medium => "🟡",
        Significance::Low => "⚪",
    }
}

/// Render the "Change Since Last Snapshot" appendix.
#[must_use]
pub fn delta_to_markdown(delta: Option<&DeltaReport>) -> String {
    let mut out = String::from("## Change Since Last Snapshot\n\n");

    let Some(delta) = delta else {
        out.push_str("No prior snapshot available.\n\n");
        return out;
    };

    let _ = writeln!(
        out,
        "_Baseline: {} | Comparison: {} ({:.1} days elapsed)_\n",
        delta.baseline_date.format(DATE_FORMAT),
        delta.comparison_date.format(DATE_FORMAT),
        delta.time_elapsed_days
    );

    if delta.shifts.is_empty() {
        let _ = writeln!(
            out,
            "No significant changes detected since the baseline of {}.\n",
            delta.baseline_date.format(DATE_FORMAT)
        );
    } else {
        out.push_str("### Detected Shifts\n\n");
        for shift in &delta.shifts {
            let _ = writeln!(
                out,
                "- {} **{}** ({}): {}",
                significance_icon(shift.significance),
                shift.section,
                shift.shift_type,
                shift.description
            );
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "**Overall Stability Score**: {:.2} ({})\n",
        delta.overall_stability_score,
        delta.stability_label()
    );

    out
}
