//! Single-entity analysis, snapshot comparison, and history listing.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use signalscope_core::{AppConfig, SignalProfile};
use signalscope_delta::{
    analyze_with_history, load_snapshot_file, write_snapshot_file, AnalysisOutcome,
    ChangeDetector, MemorySnapshotStore, SnapshotStore,
};
use signalscope_db::PgSnapshotStore;
use signalscope_inference::InferenceEngine;
use signalscope_report::{company_display_name, delta_to_markdown, render_report, DATE_FORMAT};

const UNKNOWN_ENTITY: &str = "unknown";

#[derive(Debug)]
pub(crate) struct AnalyzeArgs {
    pub profile: PathBuf,
    pub company: Option<String>,
    pub focus: Option<String>,
    pub baseline: Option<PathBuf>,
    pub url: Option<String>,
    pub store: bool,
    pub save_snapshot: Option<PathBuf>,
    pub json: bool,
}

fn read_profile(path: &Path) -> anyhow::Result<SignalProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse profile {}", path.display()))
}

/// Entity key: explicit `--url`, then the collected company URL, then the
/// baseline's entity.
pub(crate) fn resolve_entity_url(
    explicit: Option<&str>,
    raw: &SignalProfile,
    baseline_entity: Option<&str>,
) -> String {
    explicit
        .or(raw.company.url.as_deref())
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .or(baseline_entity)
        .unwrap_or(UNKNOWN_ENTITY)
        .to_string()
}

pub(crate) async fn run_analyze(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let raw = read_profile(&args.profile)?;
    let engine = InferenceEngine::new();
    let now = Utc::now();

    let outcome: AnalysisOutcome = if args.store {
        let entity_url = resolve_entity_url(args.url.as_deref(), &raw, None);
        let pool = signalscope_db::connect_pool_from_config(config).await?;
        let store = PgSnapshotStore::new(pool);
        analyze_with_history(&engine, &store, &entity_url, &raw, now).await?
    } else {
        let baseline = args
            .baseline
            .as_deref()
            .map(load_snapshot_file)
            .transpose()?;
        let entity_url = resolve_entity_url(
            args.url.as_deref(),
            &raw,
            baseline.as_ref().map(|b| b.entity_url.as_str()),
        );

        let seeded = baseline
            .map(|mut snapshot| {
                if snapshot.entity_url != entity_url {
                    tracing::warn!(
                        baseline = %snapshot.entity_url,
                        entity = %entity_url,
                        "baseline snapshot is for a different URL; comparing anyway"
                    );
                    snapshot.entity_url.clone_from(&entity_url);
                }
                vec![snapshot]
            })
            .unwrap_or_default();

        let store = MemorySnapshotStore::with_snapshots(seeded);
        analyze_with_history(&engine, &store, &entity_url, &raw, now).await?
    };

    if let Some(path) = &args.save_snapshot {
        write_snapshot_file(path, &outcome.snapshot)?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    if args.json {
        let output = serde_json::json!({
            "entity_url": outcome.snapshot.entity_url,
            "captured_at": outcome.snapshot.captured_at,
            "profile": outcome.snapshot.profile,
            "delta": outcome.delta,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let company = args
            .company
            .clone()
            .unwrap_or_else(|| company_display_name(&raw));
        print!(
            "{}",
            render_report(
                &outcome.snapshot.profile,
                &company,
                args.focus.as_deref(),
                outcome.delta.as_ref(),
            )
        );
    }

    Ok(())
}

pub(crate) fn run_delta(current: &Path, previous: &Path, json: bool) -> anyhow::Result<()> {
    let current = load_snapshot_file(current)?;
    let previous = load_snapshot_file(previous)?;

    if current.entity_url != previous.entity_url {
        tracing::warn!(
            current = %current.entity_url,
            previous = %previous.entity_url,
            "snapshots describe different entities"
        );
    }

    let delta = ChangeDetector::new().compute_delta(
        &current.profile,
        &previous.profile,
        current.captured_at,
        previous.captured_at,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&delta)?);
    } else {
        print!("{}", delta_to_markdown(Some(&delta)));
    }
    Ok(())
}

pub(crate) async fn run_history(pool: sqlx::PgPool, url: &str, limit: i64) -> anyhow::Result<()> {
    let store = PgSnapshotStore::new(pool);
    let snapshots = store.list_recent(url, limit).await?;

    if snapshots.is_empty() {
        println!("no snapshots stored for {url}");
        return Ok(());
    }

    println!("{:<22} {:>9} {:>7} {:>6}", "captured_at", "stability", "present", "absent");
    for snapshot in &snapshots {
        let stability = snapshot
            .stability_score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
        println!(
            "{:<22} {:>9} {:>7} {:>6}",
            snapshot.captured_at.format(DATE_FORMAT),
            stability,
            snapshot
                .profile
                .count_status(signalscope_core::DataStatus::Present),
            snapshot
                .profile
                .count_status(signalscope_core::DataStatus::Absent),
        );
    }
    Ok(())
}
