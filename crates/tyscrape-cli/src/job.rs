//! One extraction run: fetch every page, then write the CSV.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tyscrape_core::{AppConfig, PageRange};
use tyscrape_scraper::{ClientConfig, ListingClient};
use tyscrape_store::WriteSummary;

/// Page range and output path for a run, after CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunPlan {
    pub range: PageRange,
    pub output_path: PathBuf,
}

/// Extracts every page in the plan and writes the aggregate to the output path.
///
/// Pages that fail to fetch contribute no rows. The run only fails when the
/// client cannot be built or the CSV cannot be written; in that case nothing
/// is written to the output path.
pub(crate) async fn run_job(config: &AppConfig, plan: &RunPlan) -> anyhow::Result<WriteSummary> {
    let client = ListingClient::new(&ClientConfig::from_app_config(config))
        .context("failed to build listing client")?;

    let aggregate = client.extract_range(plan.range).await;
    tracing::info!(
        rows = aggregate.records.len(),
        pages_requested = aggregate.pages_requested,
        failed_pages = aggregate.failed_pages.len(),
        "extraction finished"
    );

    let records = aggregate.records;
    let output_path = plan.output_path.clone();
    let summary =
        tokio::task::spawn_blocking(move || tyscrape_store::write_csv(&records, &output_path))
            .await
            .context("CSV writer task panicked")?
            .with_context(|| format!("failed to write {}", plan.output_path.display()))?;

    Ok(summary)
}

/// Runs `job`, retrying the whole job up to `retries` more times with a
/// fixed `delay` between attempts.
pub(crate) async fn with_job_retries<T, F, Fut>(
    retries: u32,
    delay: Duration,
    mut job: F,
) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        match job().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < retries => {
                attempt += 1;
                tracing::warn!(
                    attempt,
                    retries,
                    delay_secs = delay.as_secs(),
                    error = %format!("{err:#}"),
                    "job failed, retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
