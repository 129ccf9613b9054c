//! Cohort command handlers.

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use signalscope_cohort::{build_cohort_matrix_by_id, load_job_results};
use signalscope_core::{load_cohorts, AppConfig};
use signalscope_report::generate_cohort_report;

/// Sub-commands available under `cohort`.
#[derive(Debug, Subcommand)]
pub enum CohortCommands {
    /// Build the comparison matrix for a configured cohort
    Matrix {
        /// Cohort id from the cohorts file
        #[arg(long)]
        cohort: String,
        /// JSON object mapping job id to job result
        #[arg(long)]
        results: PathBuf,
        /// Print the matrix as JSON instead of the markdown report
        #[arg(long)]
        json: bool,
        /// Persist the matrix and report to the database
        #[arg(long)]
        store: bool,
    },
}

pub(crate) async fn run_cohort(config: &AppConfig, command: CohortCommands) -> anyhow::Result<()> {
    match command {
        CohortCommands::Matrix {
            cohort,
            results,
            json,
            store,
        } => {
            let cohorts = load_cohorts(&config.cohorts_path).with_context(|| {
                format!("failed to load cohorts from {}", config.cohorts_path.display())
            })?;
            let jobs = load_job_results(&results)?;

            let (record, matrix) =
                build_cohort_matrix_by_id(&cohorts, &cohort, |job_id| jobs.get(job_id).cloned())?;
            let report = generate_cohort_report(&matrix, &record.anchor_url);

            if store {
                let pool = signalscope_db::connect_pool_from_config(config).await?;
                signalscope_db::upsert_cohort_matrix(
                    &pool,
                    &record.id,
                    &record.anchor_url,
                    &matrix,
                    Some(&report),
                )
                .await?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&matrix)?);
            } else {
                print!("{report}");
            }
        }
    }
    Ok(())
}
