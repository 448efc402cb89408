use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::sync::{FeedStatus, Orchestrator, SyncError};

/// Run a full sync immediately, then once per `interval`, until `shutdown`
/// flips to true. A shutdown signal cancels the wait between runs but never
/// interrupts a run in progress.
pub async fn run_scheduler(
    orchestrator: Arc<Orchestrator>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(interval_secs = interval.as_secs(), "Sync scheduler started");

    loop {
        if *shutdown.borrow() {
            break;
        }

        match orchestrator.sync_all().await {
            Ok(report) => info!(
                run_id = %report.run_id,
                failed = report.count(FeedStatus::Failed),
                "Scheduled sync completed"
            ),
            Err(SyncError::AlreadyRunning) => {
                info!("Previous sync still running, skipping scheduled run")
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                // sender dropped counts as shutdown
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Sync scheduler stopped");
}

pub fn spawn_scheduler(
    orchestrator: Arc<Orchestrator>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run_scheduler(orchestrator, interval, shutdown))
}
