//! Flatten one completed analysis into a [`TargetSignals`] vector.

use std::sync::LazyLock;

use regex::Regex;
use signalscope_core::{JobResult, SignalProfile, SocialPlatform};

use crate::types::{SeoHygiene, SocialVisibility, TargetSignals};

const PRICING_KEYWORDS: [&str; 4] = ["pricing", "plans", "price", "/pricing"];
const DOCS_KEYWORDS: [&str; 4] = ["/docs", "/documentation", "api-docs", "developer"];

const MAX_FETCH_LIMITS: usize = 5;
/// Evidence snippets are drawn from the tech fingerprint only.
const TECH_EVIDENCE_TAKEN: usize = 2;

static AUTHORITY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://([^/?#]*)").ok());

/// Lowercased host (with port, if any) of `url`, without a leading `www.`.
///
/// Returns an empty string when `url` has no scheme.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    let Some(authority) = AUTHORITY
        .as_ref()
        .and_then(|re| re.captures(url.trim()))
        .and_then(|cap| cap.get(1))
    else {
        return String::new();
    };

    let host = authority.as_str();
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h).to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

fn collect_fetch_limits(profile: &SignalProfile) -> Vec<String> {
    [
        ("Tech", profile.tech_stack.error_message()),
        ("Web", profile.web.error_message()),
        ("SEO", profile.seo.error_message()),
        ("Hiring", profile.hiring.error_message()),
        ("Ads", profile.ads.error_message()),
        ("Social", profile.social.error_message()),
        ("Reviews", profile.reviews.error_message()),
    ]
    .into_iter()
    .filter_map(|(surface, err)| err.map(|e| format!("{surface}: {e}")))
    .take(MAX_FETCH_LIMITS)
    .collect()
}

/// Map a completed job's profile to its comparison vector.
///
/// Pricing and docs visibility are plain substring checks over the
/// lowercased page body.
#[must_use]
pub fn normalize_job_result(job: &JobResult, url: &str) -> TargetSignals {
    let profile = &job.result;
    let tech = &profile.tech_stack;

    let body = profile.web.body_text().to_lowercase();

    let seo_hygiene = if profile.seo.error_message().is_some() {
        SeoHygiene::Unknown
    } else {
        SeoHygiene::from_issue_count(profile.seo.issue_count())
    };

    let social_visibility = if profile
        .social
        .has_any_channel(&SocialPlatform::COHORT_TRACKED)
    {
        SocialVisibility::High
    } else {
        SocialVisibility::None
    };

    let name = profile
        .company
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .or_else(|| Some(extract_domain(url)).filter(|d| !d.is_empty()));

    TargetSignals {
        url: url.to_string(),
        name,
        tech_confidence: tech.reported_confidence(),
        probable_cms: tech.any_cms().map(str::to_string),
        pricing_visible: contains_any(&body, &PRICING_KEYWORDS),
        docs_visible: contains_any(&body, &DOCS_KEYWORDS),
        jobs_visible: !profile.hiring.open_roles.is_empty(),
        paid_ads_detected: profile.ads.platforms.iter().any(|p| !p.trim().is_empty()),
        seo_hygiene,
        social_visibility,
        review_visibility: profile.reviews.summary().is_some(),
        evidence_snippets: tech
            .evidence
            .iter()
            .take(TECH_EVIDENCE_TAKEN)
            .cloned()
            .collect(),
        fetch_limits: collect_fetch_limits(profile),
    }
}

/// Stand-in vector for a job that has not completed.
#[must_use]
pub fn placeholder_target(url: &str, job_id: &str) -> TargetSignals {
    TargetSignals {
        url: url.to_string(),
        fetch_limits: vec![format!("Job {job_id} not complete")],
        ..TargetSignals::default()
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
