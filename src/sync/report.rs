use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Season;
use crate::sync::week::WeekEstimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Synced,
    /// Still within its freshness window; not fetched.
    Fresh,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedOutcome {
    pub feed: String,
    pub endpoint: String,
    pub status: FeedStatus,
    pub created: usize,
    pub updated: usize,
    pub failed_records: usize,
    pub error: Option<String>,
}

/// Everything one sync run did, feed by feed.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub season: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub current_week: Option<WeekEstimate>,
    pub feeds: Vec<FeedOutcome>,
}

impl RunReport {
    pub fn new(season: Season) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            season: season.param(),
            started_at: Utc::now(),
            finished_at: None,
            current_week: None,
            feeds: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: FeedOutcome) {
        self.feeds.push(outcome);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn count(&self, status: FeedStatus) -> usize {
        self.feeds.iter().filter(|f| f.status == status).count()
    }

    pub fn feed(&self, feed: &str) -> Option<&FeedOutcome> {
        self.feeds.iter().find(|f| f.feed == feed)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            season: self.season.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            current_week: self.current_week,
            feeds_synced: self.count(FeedStatus::Synced),
            feeds_fresh: self.count(FeedStatus::Fresh),
            feeds_failed: self.count(FeedStatus::Failed),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub season: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub current_week: Option<WeekEstimate>,
    pub feeds_synced: usize,
    pub feeds_fresh: usize,
    pub feeds_failed: usize,
}
