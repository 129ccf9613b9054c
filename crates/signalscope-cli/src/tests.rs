use clap::Parser;
use signalscope_core::SignalProfile;

use super::*;
use crate::analyze::resolve_entity_url;

#[test]
fn parses_db_ping_subcommand() {
    let cli = Cli::try_parse_from(["signalscope-cli", "db", "ping"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_subcommand() {
    let cli =
        Cli::try_parse_from(["signalscope-cli", "db", "migrate"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_no_subcommand() {
    let cli = Cli::try_parse_from(["signalscope-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_analyze_with_defaults() {
    let cli = Cli::try_parse_from(["signalscope-cli", "analyze", "--profile", "acme.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            ref profile,
            company: None,
            focus: None,
            baseline: None,
            url: None,
            store: false,
            save_snapshot: None,
            json: false,
        }) if profile == &PathBuf::from("acme.json")
    ));
}

#[test]
fn parses_analyze_with_baseline_and_focus() {
    let cli = Cli::try_parse_from([
        "signalscope-cli",
        "analyze",
        "--profile",
        "acme.json",
        "--baseline",
        "prev.json",
        "--focus",
        "red team",
        "--save-snapshot",
        "next.json",
        "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            baseline: Some(_),
            focus: Some(ref f),
            save_snapshot: Some(_),
            json: true,
            ..
        }) if f == "red team"
    ));
}

#[test]
fn analyze_rejects_baseline_with_store() {
    let result = Cli::try_parse_from([
        "signalscope-cli",
        "analyze",
        "--profile",
        "acme.json",
        "--baseline",
        "prev.json",
        "--store",
    ]);
    assert!(result.is_err());
}

#[test]
fn analyze_requires_profile() {
    assert!(Cli::try_parse_from(["signalscope-cli", "analyze"]).is_err());
}

#[test]
fn parses_delta_subcommand() {
    let cli = Cli::try_parse_from([
        "signalscope-cli",
        "delta",
        "--current",
        "b.json",
        "--previous",
        "a.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Delta { json: false, .. })
    ));
}

#[test]
fn parses_history_with_limit() {
    let cli = Cli::try_parse_from([
        "signalscope-cli",
        "history",
        "--url",
        "https://acme.example",
        "--limit",
        "5",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::History {
            ref url,
            limit: Some(5),
        }) if url == "https://acme.example"
    ));
}

#[test]
fn history_rejects_non_positive_limit() {
    for limit in ["0", "-1"] {
        let result = Cli::try_parse_from([
            "signalscope-cli",
            "history",
            "--url",
            "https://acme.example",
            "--limit",
            limit,
        ]);
        assert!(result.is_err(), "limit {limit} should be rejected");
    }
}

#[test]
fn parses_cohort_matrix() {
    let cli = Cli::try_parse_from([
        "signalscope-cli",
        "cohort",
        "matrix",
        "--cohort",
        "fintech",
        "--results",
        "jobs.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cohort {
            command: CohortCommands::Matrix {
                ref cohort,
                json: false,
                store: false,
                ..
            }
        }) if cohort == "fintech"
    ));
}

#[test]
fn entity_url_prefers_flag_then_company_then_baseline() {
    let raw: SignalProfile =
        serde_json::from_str(r#"{"company": {"url": "https://acme.example"}}"#).unwrap();
    assert_eq!(
        resolve_entity_url(Some("https://override.example"), &raw, None),
        "https://override.example"
    );
    assert_eq!(resolve_entity_url(None, &raw, Some("https://old.example")), "https://acme.example");

    let bare = SignalProfile::default();
    assert_eq!(
        resolve_entity_url(None, &bare, Some("https://old.example")),
        "https://old.example"
    );
    assert_eq!(resolve_entity_url(None, &bare, None), "unknown");
}
