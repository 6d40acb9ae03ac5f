mod job;
mod schedule;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tyscrape_core::{AppConfig, PageRange};

use crate::job::RunPlan;

#[derive(Debug, Parser)]
#[command(name = "tyscrape")]
#[command(about = "Extract product listings from a paginated category page into a CSV file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract every page once and write the CSV.
    Run(RunArgs),
    /// Keep running and repeat the extraction on the configured cron schedule.
    Schedule(RunArgs),
}

/// Per-invocation overrides for values otherwise read from the environment.
#[derive(Debug, Args)]
struct RunArgs {
    /// First page to fetch (inclusive).
    #[arg(long)]
    first_page: Option<u32>,

    /// Page at which to stop (exclusive).
    #[arg(long)]
    end_page: Option<u32>,

    /// CSV output path; overwritten on every run.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl RunArgs {
    fn resolve(&self, config: &AppConfig) -> anyhow::Result<RunPlan> {
        let range = PageRange::new(
            self.first_page.unwrap_or(config.first_page),
            self.end_page.unwrap_or(config.end_page),
        )?;
        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| config.output_path.clone());
        Ok(RunPlan { range, output_path })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = tyscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Run(args) => {
            let plan = args.resolve(&config)?;
            let summary = job::run_job(&config, &plan).await?;
            tracing::info!(
                rows = summary.rows,
                path = %summary.path.display(),
                "run complete"
            );
        }
        Commands::Schedule(args) => {
            let plan = args.resolve(&config)?;
            schedule::run_scheduled(Arc::new(config), Arc::new(plan)).await?;
        }
    }

    Ok(())
}
