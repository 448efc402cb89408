//! Orchestrator runs against an in-process upstream: stage order, staleness
//! skips, per-feed failure isolation, the week loop and the run lock.
#![recursion_limit = "256"]

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tokio::sync::Semaphore;

use gridiron_sync::db::AttemptStatus;
use gridiron_sync::models::{Season, SeasonType, Unit};
use gridiron_sync::sync::{FeedStatus, SyncError, WeekEstimate, WeekSource};

use common::{
    game_json, harness, play_by_play_json, schedule_json, stat_line_json, team_json, Reply,
    ScriptedTransport, SEASON,
};

fn season() -> Season {
    Season::new(SEASON, SeasonType::Regular)
}

// ──────────────────────────────────────────
// Failure isolation
// ──────────────────────────────────────────

#[tokio::test]
async fn test_failed_feed_does_not_stop_the_run() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .reply(
                "/scores/json/TeamsBasic",
                Reply::Json(json!([team_json(1, "ARI"), team_json(2, "ATL")])),
            )
            .reply("/scores/json/Stadiums", Reply::Unreachable)
            .reply(
                "/scores/json/Referees",
                Reply::Json(json!([{"RefereeID": 7, "Name": "Bill Vinovich", "Position": "Referee"}])),
            )
            .reply(
                "/scores/json/Byes/2023REG",
                Reply::Json(json!([{"Season": 2023, "Week": 13, "Team": "ARI"}])),
            )
            .reply(
                "/scores/json/PlayersByAvailable",
                Reply::Json(json!([{"PlayerID": 4314, "Team": "ARI", "Position": "QB"}])),
            ),
    );
    let h = harness(transport.clone()).await;

    let report = h.orchestrator.sync_season(season()).await.unwrap();

    assert_eq!(report.feed("stadiums").unwrap().status, FeedStatus::Failed);
    assert!(report.feed("stadiums").unwrap().error.is_some());
    for feed in ["teams", "referees", "bye_weeks_2023REG", "players", "standings_2023REG"] {
        assert_eq!(report.feed(feed).unwrap().status, FeedStatus::Synced, "{feed}");
    }

    assert_eq!(h.stores.teams.count().await.unwrap(), 2);
    assert_eq!(h.stores.stadiums.count().await.unwrap(), 0);
    assert_eq!(h.stores.referees.count().await.unwrap(), 1);
    assert_eq!(h.stores.players.count().await.unwrap(), 1);

    let bye = h.stores.bye_weeks.team_bye("ARI", SEASON).await.unwrap().unwrap();
    assert_eq!(bye.bye_id, "2023-13-ARI");

    let metadata = &h.stores.metadata;
    assert_eq!(metadata.get("stadiums").await.unwrap().unwrap().status, AttemptStatus::Error);
    assert_eq!(metadata.get("teams").await.unwrap().unwrap().status, AttemptStatus::Success);
    assert_eq!(metadata.get("referees").await.unwrap().unwrap().status, AttemptStatus::Success);
    assert!(metadata
        .get("teams")
        .await
        .unwrap()
        .unwrap()
        .notes
        .starts_with("2 fetched, 2 created"));
}

#[tokio::test]
async fn test_empty_schedule_falls_back_to_week_17() {
    let transport = Arc::new(ScriptedTransport::new());
    let h = harness(transport.clone()).await;

    let report = h.orchestrator.sync_season(season()).await.unwrap();

    assert_eq!(report.current_week, Some(WeekEstimate::fallback()));
    let score_calls: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|p| p.starts_with("/stats/json/ScoresFinal/"))
        .collect();
    assert_eq!(score_calls.len(), 17);
    assert_eq!(score_calls.first().unwrap(), "/stats/json/ScoresFinal/2023REG/1");
    assert_eq!(score_calls.last().unwrap(), "/stats/json/ScoresFinal/2023REG/17");
    assert_eq!(report.count(FeedStatus::Failed), 0);
    assert!(report.finished_at.is_some());
}

// ──────────────────────────────────────────
// Staleness
// ──────────────────────────────────────────

#[tokio::test]
async fn test_second_run_skips_fresh_feeds() {
    let transport = Arc::new(
        ScriptedTransport::new().reply(
            "/scores/json/TeamsBasic",
            Reply::Json(json!([team_json(1, "ARI")])),
        ),
    );
    let h = harness(transport.clone()).await;

    h.orchestrator.sync_season(season()).await.unwrap();
    let second = h.orchestrator.sync_season(season()).await.unwrap();

    assert_eq!(transport.calls_to("/scores/json/TeamsBasic"), 1);
    assert_eq!(transport.calls_to("/scores/json/Stadiums"), 1);
    assert_eq!(transport.calls_to("/scores/json/PlayersByAvailable"), 1);
    assert_eq!(second.feed("teams").unwrap().status, FeedStatus::Fresh);
    assert_eq!(second.feed("depth_charts").unwrap().status, FeedStatus::Fresh);

    // standings, schedules and weekly feeds are never gated
    assert_eq!(transport.calls_to("/scores/json/Standings/2023REG"), 2);
    assert_eq!(transport.calls_to("/scores/json/Schedules/2023REG"), 2);
    assert_eq!(second.feed("schedules_2023REG").unwrap().status, FeedStatus::Synced);
}

// ──────────────────────────────────────────
// Week loop
// ──────────────────────────────────────────

#[tokio::test]
async fn test_week_loop_fans_out_per_team_and_home_team() {
    let now = Utc::now();
    let transport = Arc::new(
        ScriptedTransport::new()
            .reply(
                "/scores/json/Schedules/2023REG",
                Reply::Json(json!([
                    schedule_json("202310110", 1, now - Duration::days(6), "DET", "KC"),
                    schedule_json("202320110", 2, now + Duration::days(1), "KC", "JAX"),
                    schedule_json("202330110", 3, now + Duration::days(8), "KC", "CHI"),
                    {"GameKey": "", "SeasonType": 1, "Season": 2023, "Week": 2,
                     "AwayTeam": "BYE", "HomeTeam": "BYE"}
                ])),
            )
            .reply(
                "/stats/json/ScoresFinal/2023REG/1",
                Reply::Json(json!([game_json("202310110", 1, "DET", "KC")])),
            )
            .reply(
                "/stats/json/PlayerGameStatsByTeamFinal/2023REG/1/DET",
                Reply::Json(json!([stat_line_json(1001, 19801, "202310110", 1, "DET")])),
            )
            .reply(
                "/stats/json/PlayerGameStatsByTeamFinal/2023REG/1/KC",
                Reply::Status(500),
            )
            .reply(
                "/pbp/json/PlayByPlayFinal/2023REG/1/KC",
                Reply::Json(play_by_play_json(game_json("202310110", 1, "DET", "KC"))),
            ),
    );
    let h = harness(transport.clone()).await;

    let report = h.orchestrator.sync_season(season()).await.unwrap();

    assert_eq!(
        report.current_week,
        Some(WeekEstimate {
            week: 2,
            source: WeekSource::Schedule
        })
    );
    assert_eq!(transport.calls_to("/stats/json/ScoresFinal/2023REG/1"), 1);
    assert_eq!(transport.calls_to("/stats/json/ScoresFinal/2023REG/2"), 1);
    assert_eq!(transport.calls_to("/stats/json/ScoresFinal/2023REG/3"), 0);
    assert_eq!(transport.calls_to("/pbp/json/PlayByPlayFinal/2023REG/1/DET"), 0);

    // bye rows are not stored
    assert_eq!(h.stores.schedules.count().await.unwrap(), 3);

    assert_eq!(
        report.feed("player_stats_2023REG_w1_KC").unwrap().status,
        FeedStatus::Failed
    );
    assert_eq!(
        report.feed("player_stats_2023REG_w1_DET").unwrap().status,
        FeedStatus::Synced
    );
    assert_eq!(
        report.feed("play_by_play_2023REG_w1_KC").unwrap().status,
        FeedStatus::Synced
    );
    assert_eq!(
        h.stores
            .metadata
            .get("player_stats_2023REG_w1_KC")
            .await
            .unwrap()
            .unwrap()
            .status,
        AttemptStatus::Error
    );

    assert_eq!(h.stores.games.count().await.unwrap(), 1);
    assert_eq!(h.stores.player_stats.by_game("202310110").await.unwrap().len(), 1);

    let pbp = h.stores.play_by_play.by_game_key("202310110").await.unwrap().unwrap();
    let sequences: Vec<_> = pbp.plays.iter().map(|p| p.sequence).collect();
    assert_eq!(sequences, vec![1, 2]);
    let scoring = h.stores.play_by_play.scoring_plays("202310110").await.unwrap().unwrap();
    assert_eq!(scoring.len(), 1);
}

// ──────────────────────────────────────────
// Depth charts
// ──────────────────────────────────────────

#[tokio::test]
async fn test_depth_charts_carry_team_abbreviation() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .reply(
                "/scores/json/TeamsBasic",
                Reply::Json(json!([team_json(16, "KC")])),
            )
            .reply(
                "/scores/json/DepthCharts",
                Reply::Json(json!([
                    {"TeamID": 16,
                     "Offense": [{"DepthChartID": 1, "TeamID": 16, "PlayerID": 18890,
                                  "Position": "QB", "PositionCategory": "OFF", "DepthOrder": 1}],
                     "Defense": null,
                     "SpecialTeams": []},
                    {"TeamID": 99, "Offense": [], "Defense": [], "SpecialTeams": []}
                ])),
            ),
    );
    let h = harness(transport).await;

    h.orchestrator.sync_season(season()).await.unwrap();

    let chart = h.stores.depth_charts.by_team("KC").await.unwrap().unwrap();
    assert_eq!(chart.team_id, 16);
    assert!(chart.defense.is_empty());

    let unknown = h.stores.depth_charts.by_team_id(99).await.unwrap().unwrap();
    assert_eq!(unknown.team, "");

    let status = h.stores.depth_charts.player_status(18890).await.unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].team, "KC");
    assert_eq!(status[0].unit, Unit::Offense);
    assert_eq!(status[0].depth_order, 1);
}

// ──────────────────────────────────────────
// Run lock
// ──────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_run_is_rejected() {
    let gate = Arc::new(Semaphore::new(0));
    let transport = Arc::new(ScriptedTransport::gated(Arc::clone(&gate)));
    let h = harness(transport).await;

    let handle = h.orchestrator.spawn_season_sync(season()).unwrap();
    assert!(h.orchestrator.is_running());
    assert!(matches!(
        h.orchestrator.spawn_season_sync(season()),
        Err(SyncError::AlreadyRunning)
    ));
    assert!(matches!(
        h.orchestrator.sync_all().await,
        Err(SyncError::AlreadyRunning)
    ));

    gate.add_permits(Semaphore::MAX_PERMITS / 2);
    let report = handle.await.unwrap();
    assert_eq!(report.season, "2023REG");
    assert!(!h.orchestrator.is_running());

    let health = h.orchestrator.status().snapshot().await;
    assert!(!health.sync_in_progress);
    assert!(health.last_run.is_some());
}
