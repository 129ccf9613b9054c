//! Comparative report for a peer cohort.

use std::fmt::Write as _;

use signalscope_cohort::{extract_domain, CohortMatrix};

/// Claims no public signal can support. Always rendered.
const CANNOT_VALIDATE: [&str; 6] = [
    "Internal pricing or discount structures",
    "Actual revenue or growth metrics",
    "Product quality or customer satisfaction beyond public reviews",
    "Team size or organizational structure beyond job postings",
    "Technical architecture beyond public-facing stack",
    "Competitive positioning or market share",
];

fn mark(flag: bool) -> &'static str {
    if flag {
        "✓"
    } else {
        "-"
    }
}

#[must_use]
pub fn generate_cohort_report(matrix: &CohortMatrix, anchor_url: &str) -> String {
    let norms = &matrix.norms;
    let n = norms.total_targets;
    let mut out = String::new();

    let _ = writeln!(out, "# SaaS Cohort Comparative Analysis\n");
    let _ = writeln!(out, "_Anchor: {anchor_url}_\n");
    let _ = writeln!(out, "_Cohort Size: {n} targets_\n");

    out.push_str("## Cohort Norms\n\n");
    let _ = writeln!(
        out,
        "- **Pricing Visible**: {}/{n} ({:.1}%)",
        norms.pricing_visible_count, norms.pricing_visible_pct
    );
    let _ = writeln!(
        out,
        "- **Docs Visible**: {}/{n} ({:.1}%)",
        norms.docs_visible_count, norms.docs_visible_pct
    );
    let _ = writeln!(out, "- **Jobs Posted**: {}/{n}", norms.jobs_visible_count);
    let _ = writeln!(out, "- **Paid Ads Active**: {}/{n}", norms.paid_ads_count);
    let _ = writeln!(out, "- **SEO Good**: {}/{n}", norms.seo_good_count);
    let _ = writeln!(out, "- **Social Presence (High)**: {}/{n}", norms.social_high_count);
    let _ = writeln!(out, "- **Review Visibility**: {}/{n}\n", norms.review_visible_count);

    out.push_str("## Outliers\n\n");
    if matrix.outliers.is_empty() {
        out.push_str("_No significant outliers detected._\n\n");
    } else {
        for outlier in &matrix.outliers {
            let _ = writeln!(out, "### {} ({})\n", outlier.url, outlier.direction);
            for deviation in &outlier.deviations {
                let _ = writeln!(out, "- {deviation}");
            }
            out.push('\n');
        }
    }

    if !matrix.anchor_deviations.is_empty() {
        out.push_str("## Anchor Deviations\n\n");
        let _ = writeln!(
            out,
            "The anchor ({anchor_url}) differs from the cohort norm in:\n"
        );
        for deviation in &matrix.anchor_deviations {
            let _ = writeln!(out, "- {deviation}");
        }
        out.push('\n');
    }

    out.push_str("## Comparison Matrix\n\n");
    out.push_str("| Target | Tech | CMS | Pricing | Docs | Jobs | Ads | SEO | Social | Reviews |\n");
    out.push_str("|--------|------|-----|---------|------|------|-----|-----|--------|---------|\n");
    for t in &matrix.targets {
        let domain = extract_domain(&t.url);
        let label = if domain.is_empty() {
            t.url.as_str()
        } else {
            domain.as_str()
        };
        let _ = writeln!(
            out,
            "| {label} | {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            t.tech_confidence,
            t.probable_cms.as_deref().unwrap_or("-"),
            mark(t.pricing_visible),
            mark(t.docs_visible),
            mark(t.jobs_visible),
            mark(t.paid_ads_detected),
            t.seo_hygiene,
            t.social_visibility,
            mark(t.review_visibility),
        );
    }
    out.push('\n');

    out.push_str("## What Cannot Be Validated from Public Signals\n\n");
    out.push_str("The following aspects cannot be reliably inferred from OSINT:\n\n");
    for item in CANNOT_VALIDATE {
        let _ = writeln!(out, "- {item}");
    }
    out.push_str("\n_Absence of signals should not be interpreted as sophistication or prestige._\n");

    out
}
