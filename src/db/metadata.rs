//! Staleness tracker: the latest fetch attempt per feed, and the
//! "is this feed due" decision derived from it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::db::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttemptStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncMetadata {
    pub feed: String,
    pub endpoint: String,
    pub timestamp: DateTime<Utc>,
    pub status: AttemptStatus,
    pub notes: String,
}

/// True when there is no previous attempt, or the last one is at least
/// `max_age_hours` old. Age is measured in fractional hours.
pub fn is_stale(last: Option<DateTime<Utc>>, now: DateTime<Utc>, max_age_hours: f64) -> bool {
    match last {
        None => true,
        Some(last) => {
            let age_hours = (now - last).num_milliseconds() as f64 / 3_600_000.0;
            age_hours >= max_age_hours
        }
    }
}

#[derive(Clone)]
pub struct SyncMetadataStore {
    pool: SqlitePool,
}

impl SyncMetadataStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, feed: &str) -> Result<Option<SyncMetadata>, StoreError> {
        let record = sqlx::query_as::<_, SyncMetadata>(
            "SELECT feed, endpoint, timestamp, status, notes FROM sync_metadata WHERE feed = ?1",
        )
        .bind(feed)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn all(&self) -> Result<Vec<SyncMetadata>, StoreError> {
        let records = sqlx::query_as::<_, SyncMetadata>(
            "SELECT feed, endpoint, timestamp, status, notes FROM sync_metadata ORDER BY feed",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn is_update_needed(&self, feed: &str, max_age_hours: f64) -> Result<bool, StoreError> {
        self.is_update_needed_at(feed, max_age_hours, Utc::now()).await
    }

    pub async fn is_update_needed_at(
        &self,
        feed: &str,
        max_age_hours: f64,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let last = self.get(feed).await?.map(|record| record.timestamp);
        Ok(is_stale(last, now, max_age_hours))
    }

    pub async fn record_attempt(
        &self,
        feed: &str,
        endpoint: &str,
        status: AttemptStatus,
        notes: &str,
    ) -> Result<(), StoreError> {
        self.record_attempt_at(feed, endpoint, status, notes, Utc::now())
            .await
    }

    /// Overwrites any previous attempt for `feed`.
    pub async fn record_attempt_at(
        &self,
        feed: &str,
        endpoint: &str,
        status: AttemptStatus,
        notes: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO sync_metadata (feed, endpoint, timestamp, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(feed) DO UPDATE SET
                endpoint = excluded.endpoint,
                timestamp = excluded.timestamp,
                status = excluded.status,
                notes = excluded.notes",
        )
        .bind(feed)
        .bind(endpoint)
        .bind(at)
        .bind(status)
        .bind(notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
