//! Cohort-wide counting and majority-deviation outlier detection.

use crate::types::{
    CohortNorms, CohortOutlier, Direction, SeoHygiene, SocialVisibility, TargetSignals,
};

/// Cohorts smaller than this cannot define a majority.
const MIN_COHORT_FOR_OUTLIERS: usize = 3;

/// Single-signal disagreement is noise.
const MIN_DEVIATIONS: usize = 2;

/// Percentage to one decimal, halves rounded to even.
#[allow(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    (count as f64 / total as f64 * 1000.0).round_ties_even() / 10.0
}

#[must_use]
pub fn compute_cohort_norms(targets: &[TargetSignals]) -> CohortNorms {
    let n = targets.len();
    if n == 0 {
        return CohortNorms::default();
    }

    let count = |pred: fn(&TargetSignals) -> bool| targets.iter().filter(|t| pred(t)).count();

    let pricing_visible_count = count(|t| t.pricing_visible);
    let docs_visible_count = count(|t| t.docs_visible);

    CohortNorms {
        total_targets: n,
        pricing_visible_count,
        docs_visible_count,
        jobs_visible_count: count(|t| t.jobs_visible),
        paid_ads_count: count(|t| t.paid_ads_detected),
        seo_good_count: count(|t| t.seo_hygiene == SeoHygiene::Good),
        social_high_count: count(|t| t.social_visibility == SocialVisibility::High),
        review_visible_count: count(|t| t.review_visibility),
        pricing_visible_pct: percent(pricing_visible_count, n),
        docs_visible_pct: percent(docs_visible_count, n),
    }
}

/// One tracked boolean signal compared against the cohort majority.
struct Tracked {
    majority: bool,
    missing: &'static str,
    unusual: &'static str,
    /// `Some(true)` if the target shows it, `Some(false)` if it lacks it,
    /// `None` if neither side applies.
    shown: fn(&TargetSignals) -> Option<bool>,
}

#[derive(Default)]
struct Tally {
    deviations: Vec<String>,
    up: usize,
    down: usize,
}

impl Tally {
    fn check(&mut self, signal: &Tracked, target: &TargetSignals) {
        match ((signal.shown)(target), signal.majority) {
            (Some(false), true) => {
                self.deviations.push(signal.missing.to_string());
                self.down += 1;
            }
            (Some(true), false) => {
                self.deviations.push(signal.unusual.to_string());
                self.up += 1;
            }
            _ => {}
        }
    }
}

fn social_shown(t: &TargetSignals) -> Option<bool> {
    match t.social_visibility {
        SocialVisibility::High => Some(true),
        SocialVisibility::None => Some(false),
        SocialVisibility::Low => None,
    }
}

/// Targets that contradict the cohort majority on at least two of pricing,
/// docs, jobs, and high social presence.
///
/// Returns nothing for cohorts of fewer than three targets.
#[must_use]
pub fn find_outliers(targets: &[TargetSignals], norms: &CohortNorms) -> Vec<CohortOutlier> {
    if norms.total_targets < MIN_COHORT_FOR_OUTLIERS {
        return Vec::new();
    }

    let tracked = [
        Tracked {
            majority: norms.is_majority(norms.pricing_visible_count),
            missing: "No visible pricing (norm: visible)",
            unusual: "Visible pricing (norm: hidden)",
            shown: |t| Some(t.pricing_visible),
        },
        Tracked {
            majority: norms.is_majority(norms.docs_visible_count),
            missing: "No visible docs (norm: visible)",
            unusual: "Visible docs (norm: hidden)",
            shown: |t| Some(t.docs_visible),
        },
        Tracked {
            majority: norms.is_majority(norms.jobs_visible_count),
            missing: "No visible jobs (norm: visible)",
            unusual: "Visible jobs (norm: hidden)",
            shown: |t| Some(t.jobs_visible),
        },
        Tracked {
            majority: norms.is_majority(norms.social_high_count),
            missing: "No social presence (norm: present)",
            unusual: "High social presence (norm: low)",
            shown: social_shown,
        },
    ];

    let outliers: Vec<CohortOutlier> = targets
        .iter()
        .filter_map(|target| {
            let mut tally = Tally::default();
            for signal in &tracked {
                tally.check(signal, target);
            }
            (tally.deviations.len() >= MIN_DEVIATIONS).then(|| CohortOutlier {
                url: target.url.clone(),
                direction: Direction::from_counts(tally.up, tally.down),
                deviations: tally.deviations,
            })
        })
        .collect();

    for outlier in &outliers {
        tracing::info!(
            url = %outlier.url,
            direction = %outlier.direction,
            deviations = outlier.deviations.len(),
            "cohort outlier"
        );
    }

    outliers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str, pricing: bool, docs: bool, jobs: bool, social: bool) -> TargetSignals {
        TargetSignals {
            url: url.to_string(),
            pricing_visible: pricing,
            docs_visible: docs,
            jobs_visible: jobs,
            social_visibility: if social {
                SocialVisibility::High
            } else {
                SocialVisibility::None
            },
            ..TargetSignals::default()
        }
    }

    fn conforming(url: &str) -> TargetSignals {
        target(url, true, true, false, true)
    }

    #[test]
    fn empty_cohort_has_zero_norms() {
        let norms = compute_cohort_norms(&[]);
        assert_eq!(norms, CohortNorms::default());
        assert_eq!(norms.total_targets, 0);
        assert!(norms.pricing_visible_pct.abs() < f64::EPSILON);
    }

    #[test]
    fn norms_count_and_round_percentages() {
        let mut third = conforming("c");
        third.pricing_visible = false;
        third.seo_hygiene = SeoHygiene::Good;
        third.review_visibility = true;
        let targets = vec![conforming("a"), conforming("b"), third];

        let norms = compute_cohort_norms(&targets);
        assert_eq!(norms.total_targets, 3);
        assert_eq!(norms.pricing_visible_count, 2);
        assert!((norms.pricing_visible_pct - 66.7).abs() < 1e-9);
        assert!((norms.docs_visible_pct - 100.0).abs() < 1e-9);
        assert_eq!(norms.seo_good_count, 1);
        assert_eq!(norms.review_visible_count, 1);
        assert_eq!(norms.social_high_count, 3);
        assert_eq!(norms.jobs_visible_count, 0);
    }

    #[test]
    fn percentages_round_halves_to_even() {
        let mut targets: Vec<TargetSignals> = (0..16)
            .map(|i| target(&format!("t{i}"), false, false, false, false))
            .collect();
        targets[0].pricing_visible = true;
        for t in &mut targets[..3] {
            t.docs_visible = true;
        }

        let norms = compute_cohort_norms(&targets);
        assert!((norms.pricing_visible_pct - 6.2).abs() < 1e-9);
        assert!((norms.docs_visible_pct - 18.8).abs() < 1e-9);
    }

    #[test]
    fn single_deviation_is_noise() {
        let mut targets: Vec<_> = ["a", "b", "c", "d"].into_iter().map(conforming).collect();
        targets.push(target("odd", false, true, false, true));

        let norms = compute_cohort_norms(&targets);
        assert!(find_outliers(&targets, &norms).is_empty());
    }

    #[test]
    fn two_deviations_make_one_outlier() {
        let mut targets: Vec<_> = ["a", "b", "c", "d"].into_iter().map(conforming).collect();
        targets.push(target("odd", false, false, false, true));

        let norms = compute_cohort_norms(&targets);
        let outliers = find_outliers(&targets, &norms);

        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].url, "odd");
        assert_eq!(outliers[0].direction, Direction::Below);
        assert_eq!(
            outliers[0].deviations,
            vec![
                "No visible pricing (norm: visible)".to_string(),
                "No visible docs (norm: visible)".to_string(),
            ]
        );
    }

    #[test]
    fn opposite_deviations_are_mixed() {
        let mut targets: Vec<_> = ["a", "b", "c", "d"].into_iter().map(conforming).collect();
        targets.push(target("odd", false, true, true, true));

        let norms = compute_cohort_norms(&targets);
        let outliers = find_outliers(&targets, &norms);

        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].direction, Direction::Mixed);
        assert_eq!(
            outliers[0].deviations,
            vec![
                "No visible pricing (norm: visible)".to_string(),
                "Visible jobs (norm: hidden)".to_string(),
            ]
        );
    }

    #[test]
    fn showing_hidden_signals_is_above() {
        let quiet = |url| target(url, false, false, false, false);
        let mut targets: Vec<_> = ["a", "b", "c"].into_iter().map(quiet).collect();
        targets.push(target("loud", true, true, true, true));

        let norms = compute_cohort_norms(&targets);
        let outliers = find_outliers(&targets, &norms);

        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].direction, Direction::Above);
        assert_eq!(outliers[0].deviations.len(), 4);
        assert_eq!(outliers[0].deviations[3], "High social presence (norm: low)");
    }

    #[test]
    fn tie_is_not_a_majority() {
        // 2 of 4 show pricing and docs: the norm is "hidden", so the two
        // showing them deviate upward.
        let targets = vec![
            target("a", true, true, false, false),
            target("b", true, true, false, false),
            target("c", false, false, false, false),
            target("d", false, false, false, false),
        ];
        let norms = compute_cohort_norms(&targets);
        let outliers = find_outliers(&targets, &norms);

        let urls: Vec<&str> = outliers.iter().map(|o| o.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b"]);
        assert!(outliers.iter().all(|o| o.direction == Direction::Above));
    }

    #[test]
    fn small_cohorts_never_have_outliers() {
        let targets = vec![
            target("a", true, true, true, true),
            target("b", false, false, false, false),
        ];
        let norms = compute_cohort_norms(&targets);
        assert!(find_outliers(&targets, &norms).is_empty());
    }

    #[test]
    fn low_social_never_deviates() {
        let mut odd = target("odd", false, false, false, false);
        odd.social_visibility = SocialVisibility::Low;
        let mut targets: Vec<_> = ["a", "b", "c"].into_iter().map(conforming).collect();
        targets.push(odd);

        let norms = compute_cohort_norms(&targets);
        let outliers = find_outliers(&targets, &norms);
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].deviations.len(), 2);
    }
}
