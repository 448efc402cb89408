//! Sync run status shared between the orchestrator and `/health`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::sync::report::{RunReport, RunSummary};

/// Shared status updated at the start and end of every sync run.
#[derive(Clone)]
pub struct SyncStatus {
    inner: Arc<RwLock<StatusData>>,
}

#[derive(Debug, Clone)]
struct StatusData {
    started_at: DateTime<Utc>,
    current_run: Option<CurrentRun>,
    last_run: Option<RunSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentRun {
    pub run_id: Uuid,
    pub season: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: i64,
    pub sync_in_progress: bool,
    pub current_run: Option<CurrentRun>,
    pub last_run: Option<RunSummary>,
}

impl SyncStatus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StatusData {
                started_at: Utc::now(),
                current_run: None,
                last_run: None,
            })),
        }
    }

    pub async fn run_started(&self, report: &RunReport) {
        let mut data = self.inner.write().await;
        data.current_run = Some(CurrentRun {
            run_id: report.run_id,
            season: report.season.clone(),
            started_at: report.started_at,
        });
    }

    pub async fn run_finished(&self, report: &RunReport) {
        let mut data = self.inner.write().await;
        data.current_run = None;
        data.last_run = Some(report.summary());
    }

    pub async fn snapshot(&self) -> HealthReport {
        let data = self.inner.read().await;
        HealthReport {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: (Utc::now() - data.started_at).num_seconds(),
            sync_in_progress: data.current_run.is_some(),
            current_run: data.current_run.clone(),
            last_run: data.last_run.clone(),
        }
    }
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self::new()
    }
}
