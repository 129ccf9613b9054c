mod analyze;
mod cohort;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cohort::CohortCommands;

#[derive(Debug, Parser)]
#[command(name = "signalscope-cli")]
#[command(about = "Interpretive OSINT analysis, drift detection, and cohort comparison")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interpret a collected signal profile and render a report
    Analyze {
        /// Collected signal profile (JSON)
        #[arg(long)]
        profile: PathBuf,
        /// Company name for the report title
        #[arg(long)]
        company: Option<String>,
        /// Report focus; red-team wording switches to an adversarial addendum
        #[arg(long)]
        focus: Option<String>,
        /// Earlier snapshot file to compare against
        #[arg(long, conflicts_with = "store")]
        baseline: Option<PathBuf>,
        /// Entity URL; defaults to the profile's company URL
        #[arg(long)]
        url: Option<String>,
        /// Compare against and save to the snapshot database
        #[arg(long)]
        store: bool,
        /// Write the new snapshot to this file
        #[arg(long)]
        save_snapshot: Option<PathBuf>,
        /// Print JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Compare two snapshot files
    Delta {
        #[arg(long)]
        current: PathBuf,
        #[arg(long)]
        previous: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// List stored snapshots for an entity
    History {
        #[arg(long)]
        url: String,
        /// Defaults to `SIGNALSCOPE_SNAPSHOT_HISTORY_LIMIT`
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        limit: Option<i64>,
    },
    /// Peer cohort comparison
    Cohort {
        #[command(subcommand)]
        command: CohortCommands,
    },
    /// Database utilities
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database connection
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = signalscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze {
            profile,
            company,
            focus,
            baseline,
            url,
            store,
            save_snapshot,
            json,
        }) => {
            let args = analyze::AnalyzeArgs {
                profile,
                company,
                focus,
                baseline,
                url,
                store,
                save_snapshot,
                json,
            };
            analyze::run_analyze(&config, &args).await?;
        }
        Some(Commands::Delta {
            current,
            previous,
            json,
        }) => analyze::run_delta(&current, &previous, json)?,
        Some(Commands::History { url, limit }) => {
            let pool = signalscope_db::connect_pool_from_config(&config).await?;
            let limit = limit.unwrap_or(config.snapshot_history_limit);
            analyze::run_history(pool, &url, limit).await?;
        }
        Some(Commands::Cohort { command }) => cohort::run_cohort(&config, command).await?,
        Some(Commands::Db { command }) => {
            let pool = signalscope_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    signalscope_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = signalscope_db::run_migrations(&pool).await?;
                    println!("applied {applied} migrations");
                }
            }
        }
        None => {
            println!("signalscope-cli: run with --help to list commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
