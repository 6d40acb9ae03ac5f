//! Recurring job mode.
//!
//! Registers one cron job that runs extract-then-write, with job-level
//! retries, and keeps the process alive until Ctrl-C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler};
use tyscrape_core::AppConfig;

use crate::job::{run_job, with_job_retries, RunPlan};

/// Starts the scheduler and blocks until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the cron expression is invalid or the scheduler
/// cannot be started or shut down.
pub(crate) async fn run_scheduled(config: Arc<AppConfig>, plan: Arc<RunPlan>) -> anyhow::Result<()> {
    let mut scheduler = JobScheduler::new().await?;

    let schedule = config.schedule.clone();
    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);
        let plan = Arc::clone(&plan);

        Box::pin(async move {
            tracing::info!("scheduler: starting extraction run");
            let delay = Duration::from_secs(config.job_retry_delay_secs);
            match with_job_retries(config.job_retries, delay, || run_job(&config, &plan)).await {
                Ok(summary) => tracing::info!(
                    rows = summary.rows,
                    path = %summary.path.display(),
                    "scheduler: extraction run complete"
                ),
                Err(e) => tracing::error!(
                    error = %format!("{e:#}"),
                    "scheduler: extraction run failed after all retries"
                ),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(schedule = %schedule, "scheduler started");

    shutdown_signal().await;
    scheduler.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
