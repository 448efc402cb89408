//! Sync orchestrator: decides what to fetch, in which order, and writes the
//! results into the stores.
//!
//! A run walks five stages: reference data, players and depth charts, season
//! data, current-week detection, then one pass per week up to the detected
//! week. No single feed failure stops a run; every attempt, good or bad, is
//! recorded in the sync metadata.

pub mod report;
pub mod scheduler;
pub mod week;

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::config::SyncConfig;
use crate::db::{AttemptStatus, Collection, Document, Stores};
use crate::models::{DepthChart, Game, Season};
use crate::monitoring::health::SyncStatus;
use crate::source::{Endpoint, SourceError, SportsDataClient};

pub use report::{FeedOutcome, FeedStatus, RunReport, RunSummary};
pub use week::{detect_current_week, WeekEstimate, WeekSource};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("a sync run is already in progress")]
    AlreadyRunning,
}

pub struct Orchestrator {
    client: SportsDataClient,
    stores: Stores,
    config: SyncConfig,
    run_lock: Arc<Semaphore>,
    status: SyncStatus,
}

impl Orchestrator {
    pub fn new(client: SportsDataClient, stores: Stores, config: SyncConfig, status: SyncStatus) -> Self {
        Self {
            client,
            stores,
            config,
            run_lock: Arc::new(Semaphore::new(1)),
            status,
        }
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    /// The configured season with its phase.
    pub fn default_season(&self) -> Season {
        self.config.season()
    }

    /// A season year in the configured phase.
    pub fn season(&self, year: i32) -> Season {
        Season::new(year, self.config.season_type)
    }

    pub fn is_running(&self) -> bool {
        self.run_lock.available_permits() == 0
    }

    fn try_lock(&self) -> Result<OwnedSemaphorePermit, SyncError> {
        Arc::clone(&self.run_lock)
            .try_acquire_owned()
            .map_err(|_| SyncError::AlreadyRunning)
    }

    /// Full run for the configured season.
    pub async fn sync_all(&self) -> Result<RunReport, SyncError> {
        self.sync_season(self.default_season()).await
    }

    pub async fn sync_season(&self, season: Season) -> Result<RunReport, SyncError> {
        let permit = self.try_lock()?;
        Ok(self.run(season, permit).await)
    }

    /// Start a run on its own task and return without waiting for it. The
    /// lock is taken before spawning so a concurrent trigger is rejected
    /// synchronously.
    pub fn spawn_season_sync(self: &Arc<Self>, season: Season) -> Result<JoinHandle<RunReport>, SyncError> {
        let permit = self.try_lock()?;
        let orchestrator = Arc::clone(self);
        Ok(tokio::spawn(async move { orchestrator.run(season, permit).await }))
    }

    async fn run(&self, season: Season, _permit: OwnedSemaphorePermit) -> RunReport {
        let mut report = RunReport::new(season);
        self.status.run_started(&report).await;
        info!(run_id = %report.run_id, season = %season, "Sync run started");

        self.sync_reference_data(season, &mut report).await;
        self.sync_players_and_depth_charts(&mut report).await;
        self.sync_season_data(season, &mut report).await;

        let estimate = self.detect_week(season).await;
        report.current_week = Some(estimate);
        info!(week = estimate.week, source = ?estimate.source, "Current week detected");

        for week in 1..=estimate.week {
            self.sync_week(season, week, &mut report).await;
        }

        report.finish();
        self.status.run_finished(&report).await;
        info!(
            run_id = %report.run_id,
            season = %season,
            synced = report.count(FeedStatus::Synced),
            fresh = report.count(FeedStatus::Fresh),
            failed = report.count(FeedStatus::Failed),
            "Sync run finished"
        );
        report
    }

    // === Stages ===

    #[instrument(skip(self, report), fields(season = %season))]
    async fn sync_reference_data(&self, season: Season, report: &mut RunReport) {
        let freshness = &self.config.freshness_hours;

        let endpoint = Endpoint::Teams;
        if self.is_due(&endpoint, freshness.teams, report).await {
            let fetched = self.client.teams().await;
            self.store_feed(&endpoint, &self.stores.teams, fetched, report).await;
        }

        let endpoint = Endpoint::Stadiums;
        if self.is_due(&endpoint, freshness.stadiums, report).await {
            let fetched = self.client.stadiums().await;
            self.store_feed(&endpoint, &self.stores.stadiums, fetched, report).await;
        }

        let endpoint = Endpoint::Referees;
        if self.is_due(&endpoint, freshness.referees, report).await {
            let fetched = self.client.referees().await;
            self.store_feed(&endpoint, &self.stores.referees, fetched, report).await;
        }

        let endpoint = Endpoint::Byes(season);
        if self.is_due(&endpoint, freshness.bye_weeks, report).await {
            let fetched = self.client.byes(season).await;
            self.store_feed(&endpoint, &self.stores.bye_weeks, fetched, report).await;
        }
    }

    #[instrument(skip(self, report))]
    async fn sync_players_and_depth_charts(&self, report: &mut RunReport) {
        let freshness = &self.config.freshness_hours;

        let endpoint = Endpoint::Players;
        if self.is_due(&endpoint, freshness.players, report).await {
            let fetched = self.client.players().await;
            self.store_feed(&endpoint, &self.stores.players, fetched, report).await;
        }

        let endpoint = Endpoint::DepthCharts;
        if self.is_due(&endpoint, freshness.depth_charts, report).await {
            let fetched = match self.client.depth_charts().await {
                Ok(charts) => {
                    let mut composed = Vec::with_capacity(charts.len());
                    for chart in charts {
                        let team = self.team_abbreviation(chart.team_id).await;
                        composed.push(DepthChart::compose(chart, team));
                    }
                    Ok(composed)
                }
                Err(e) => Err(e),
            };
            self.store_feed(&endpoint, &self.stores.depth_charts, fetched, report).await;
        }
    }

    /// Standings and schedules are always refetched.
    #[instrument(skip(self, report), fields(season = %season))]
    async fn sync_season_data(&self, season: Season, report: &mut RunReport) {
        let endpoint = Endpoint::Standings(season);
        let fetched = self.client.standings(season).await;
        self.store_feed(&endpoint, &self.stores.standings, fetched, report).await;

        let endpoint = Endpoint::Schedules(season);
        let fetched = self
            .client
            .schedules(season)
            .await
            .map(|schedules| schedules.into_iter().filter(|s| !s.is_bye()).collect());
        self.store_feed(&endpoint, &self.stores.schedules, fetched, report).await;
    }

    async fn detect_week(&self, season: Season) -> WeekEstimate {
        match self.stores.schedules.by_season(season).await {
            Ok(stored) => {
                let schedules: Vec<_> = stored.into_iter().map(|s| s.doc).collect();
                detect_current_week(Utc::now(), &schedules)
            }
            Err(e) => {
                warn!(season = %season, error = %e, "Failed to read schedules for week detection");
                WeekEstimate::fallback()
            }
        }
    }

    /// Games for the week, then per-team player stats and per-home-team
    /// play-by-play for the games that came back.
    #[instrument(skip(self, report), fields(season = %season))]
    async fn sync_week(&self, season: Season, week: i32, report: &mut RunReport) {
        let endpoint = Endpoint::Scores { season, week };
        let fetched = self.client.scores(season, week).await;
        let (teams, home_teams) = match &fetched {
            Ok(games) => participants(games),
            Err(_) => Default::default(),
        };
        self.store_feed(&endpoint, &self.stores.games, fetched, report).await;

        for team in teams {
            let endpoint = Endpoint::PlayerGameStats {
                season,
                week,
                team: team.clone(),
            };
            let fetched = self.client.player_game_stats(season, week, &team).await;
            self.store_feed(&endpoint, &self.stores.player_stats, fetched, report).await;
        }

        for home_team in home_teams {
            let endpoint = Endpoint::PlayByPlay {
                season,
                week,
                home_team: home_team.clone(),
            };
            let fetched = self
                .client
                .play_by_play(season, week, &home_team)
                .await
                .map(|pbp| vec![pbp]);
            self.store_feed(&endpoint, &self.stores.play_by_play, fetched, report).await;
        }
    }

    // === Helpers ===

    async fn team_abbreviation(&self, team_id: i32) -> String {
        match self.stores.teams.by_team_id(team_id).await {
            Ok(Some(team)) => team.doc.key,
            Ok(None) => {
                warn!(team_id, "No team found for depth chart, storing without abbreviation");
                String::new()
            }
            Err(e) => {
                warn!(team_id, error = %e, "Team lookup failed for depth chart, storing without abbreviation");
                String::new()
            }
        }
    }

    /// Whether a freshness-gated feed should be fetched. A metadata read
    /// failure counts as due.
    async fn is_due(&self, endpoint: &Endpoint, max_age_hours: f64, report: &mut RunReport) -> bool {
        let feed = endpoint.feed_key();
        let due = match self.stores.metadata.is_update_needed(&feed, max_age_hours).await {
            Ok(due) => due,
            Err(e) => {
                warn!(feed = %feed, error = %e, "Staleness check failed, fetching anyway");
                true
            }
        };

        if !due {
            info!(feed = %feed, max_age_hours, "Feed is fresh, skipping");
            report.push(FeedOutcome {
                feed,
                endpoint: endpoint.path(),
                status: FeedStatus::Fresh,
                created: 0,
                updated: 0,
                failed_records: 0,
                error: None,
            });
        }
        due
    }

    /// Upsert a fetched feed and record the attempt. Fetch errors are logged
    /// and recorded, never returned.
    async fn store_feed<T: Document>(
        &self,
        endpoint: &Endpoint,
        collection: &Collection<T>,
        fetched: Result<Vec<T>, SourceError>,
        report: &mut RunReport,
    ) {
        let feed = endpoint.feed_key();
        let path = endpoint.path();

        let outcome = match fetched {
            Ok(docs) => {
                let fetched_count = docs.len();
                let written = collection.upsert_many(docs).await;
                // a non-empty feed where nothing could be stored counts as failed
                let stored_any = fetched_count == 0 || written.written() > 0;
                let notes = format!(
                    "{fetched_count} fetched, {} created, {} updated, {} failed",
                    written.created, written.updated, written.failed
                );
                let attempt = if stored_any {
                    AttemptStatus::Success
                } else {
                    AttemptStatus::Error
                };
                self.record_attempt(&feed, &path, attempt, &notes).await;
                info!(
                    feed = %feed,
                    created = written.created,
                    updated = written.updated,
                    failed = written.failed,
                    "Feed synced"
                );
                FeedOutcome {
                    feed,
                    endpoint: path,
                    status: if stored_any {
                        FeedStatus::Synced
                    } else {
                        FeedStatus::Failed
                    },
                    created: written.created,
                    updated: written.updated,
                    failed_records: written.failed,
                    error: None,
                }
            }
            Err(e) => {
                warn!(feed = %feed, endpoint = %path, error = %e, "Feed fetch failed");
                self.record_attempt(&feed, &path, AttemptStatus::Error, &e.to_string())
                    .await;
                FeedOutcome {
                    feed,
                    endpoint: path,
                    status: FeedStatus::Failed,
                    created: 0,
                    updated: 0,
                    failed_records: 0,
                    error: Some(e.to_string()),
                }
            }
        };

        report.push(outcome);
    }

    async fn record_attempt(&self, feed: &str, path: &str, status: AttemptStatus, notes: &str) {
        if let Err(e) = self
            .stores
            .metadata
            .record_attempt(feed, path, status, notes)
            .await
        {
            warn!(feed, error = %e, "Failed to record sync attempt");
        }
    }
}

/// Teams appearing in the week's games, and the home teams, both sorted.
fn participants(games: &[Game]) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut teams = BTreeSet::new();
    let mut home_teams = BTreeSet::new();
    for game in games.iter().filter(|g| !g.is_canceled()) {
        for team in [&game.home_team, &game.away_team] {
            if !team.is_empty() {
                teams.insert(team.clone());
            }
        }
        if !game.home_team.is_empty() {
            home_teams.insert(game.home_team.clone());
        }
    }
    (teams, home_teams)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(away: &str, home: &str, status: &str) -> Game {
        serde_json::from_value(serde_json::json!({
            "GameKey": format!("2023101{away}{home}"),
            "SeasonType": 1,
            "Season": 2023,
            "Week": 1,
            "AwayTeam": away,
            "HomeTeam": home,
            "Status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_participants_skip_canceled_and_blank_teams() {
        let games = vec![
            game("DET", "KC", "Final"),
            game("KC", "JAX", "Final"),
            game("BUF", "NYJ", "Canceled"),
            game("", "LV", "Final"),
        ];

        let (teams, home_teams) = participants(&games);

        assert_eq!(
            teams.into_iter().collect::<Vec<_>>(),
            vec!["DET", "JAX", "KC", "LV"]
        );
        assert_eq!(
            home_teams.into_iter().collect::<Vec<_>>(),
            vec!["JAX", "KC", "LV"]
        );
    }

    #[test]
    fn test_no_games_means_no_fan_out() {
        let (teams, home_teams) = participants(&[]);
        assert!(teams.is_empty());
        assert!(home_teams.is_empty());
    }
}
