//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

use gridiron_sync::api::{self, AdminAuth, AppState};
use gridiron_sync::config::{FreshnessConfig, SportsDataConfig, SyncConfig};
use gridiron_sync::db::{Database, Stores};
use gridiron_sync::models::SeasonType;
use gridiron_sync::monitoring::health::SyncStatus;
use gridiron_sync::source::{SourceError, SportsDataClient, Transport};
use gridiron_sync::sync::Orchestrator;

pub const SEASON: i32 = 2023;

pub fn sportsdata_config(base_url: &str, call_delay_ms: u64) -> SportsDataConfig {
    SportsDataConfig {
        base_url: base_url.to_string(),
        call_delay_ms,
        connect_timeout_seconds: 5,
        request_timeout_seconds: 5,
        max_response_bytes: 10 * 1024 * 1024,
    }
}

pub fn sync_config() -> SyncConfig {
    SyncConfig {
        season: SEASON,
        season_type: SeasonType::Regular,
        interval_hours: 24,
        freshness_hours: FreshnessConfig {
            teams: 168.0,
            stadiums: 720.0,
            referees: 720.0,
            bye_weeks: 168.0,
            players: 20.0,
            depth_charts: 20.0,
        },
    }
}

// ──────────────────────────────────────────
// Upstream payloads
// ──────────────────────────────────────────

pub const TEAM_KEYS: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LAC", "LAR", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];

pub fn team_json(team_id: i32, key: &str) -> Value {
    let conference = if team_id <= 16 { "AFC" } else { "NFC" };
    json!({
        "TeamID": team_id,
        "Key": key,
        "City": format!("{key} City"),
        "Name": format!("{key} Team"),
        "Conference": conference,
        "Division": "East",
        "FullName": format!("{key} City {key} Team"),
        "StadiumID": team_id,
    })
}

pub fn all_teams_json() -> Value {
    Value::Array(
        TEAM_KEYS
            .iter()
            .enumerate()
            .map(|(i, key)| team_json(i as i32 + 1, key))
            .collect(),
    )
}

/// Upstream timestamps are naive Eastern wall-clock times.
pub fn eastern(at: DateTime<Utc>) -> String {
    at.with_timezone(&New_York).naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn stadium_details_json(stadium_id: i32) -> Value {
    json!({
        "StadiumID": stadium_id,
        "Name": "GEHA Field at Arrowhead Stadium",
        "City": "Kansas City",
        "State": "MO",
        "Country": "USA",
        "Capacity": 76416,
        "PlayingSurface": "Grass",
        "GeoLat": 39.048914,
        "GeoLong": -94.484039,
        "Type": "Outdoor",
    })
}

pub fn schedule_json(game_key: &str, week: i32, kickoff: DateTime<Utc>, away: &str, home: &str) -> Value {
    let kickoff = eastern(kickoff);
    json!({
        "GameKey": game_key,
        "SeasonType": 1,
        "Season": SEASON,
        "Week": week,
        "Date": kickoff,
        "AwayTeam": away,
        "HomeTeam": home,
        "Channel": "CBS",
        "PointSpread": -3.5,
        "OverUnder": 47.5,
        "StadiumID": 1,
        "Canceled": false,
        "GeoLat": null,
        "GeoLong": null,
        "ForecastTempLow": 68,
        "ForecastTempHigh": 74,
        "ForecastDescription": "Partly Cloudy",
        "ForecastWindChill": 68,
        "ForecastWindSpeed": 9,
        "AwayTeamMoneyLine": 150,
        "HomeTeamMoneyLine": -175,
        "Day": format!("{}T00:00:00", &kickoff[..10]),
        "DateTime": kickoff,
        "GlobalGameID": 18000 + week,
        "ScoreID": 18000 + week,
        "Status": "Scheduled",
        "IsClosed": false,
        "DateTimeUTC": null,
        "LastUpdated": "2023-09-08T00:07:39",
        "StadiumDetails": stadium_details_json(1),
    })
}

/// A `ScoresFinal` entry in the shape the feed returns it.
pub fn game_json(game_key: &str, week: i32, away: &str, home: &str) -> Value {
    json!({
        "GameKey": game_key,
        "SeasonType": 1,
        "Season": SEASON,
        "Week": week,
        "Date": "2023-09-10T13:00:00",
        "AwayTeam": away,
        "HomeTeam": home,
        "AwayScore": 20,
        "HomeScore": 27,
        "Channel": "CBS",
        "PointSpread": -3.5,
        "OverUnder": 47.5,
        "Quarter": "F",
        "TimeRemaining": null,
        "Possession": null,
        "Down": null,
        "Distance": null,
        "YardLine": null,
        "YardLineTerritory": null,
        "RedZone": null,
        "AwayScoreQuarter1": 7,
        "AwayScoreQuarter2": 3,
        "AwayScoreQuarter3": 7,
        "AwayScoreQuarter4": 3,
        "AwayScoreOvertime": 0,
        "HomeScoreQuarter1": 0,
        "HomeScoreQuarter2": 14,
        "HomeScoreQuarter3": 10,
        "HomeScoreQuarter4": 3,
        "HomeScoreOvertime": 0,
        "HasStarted": true,
        "IsInProgress": false,
        "IsOver": true,
        "Has1stQuarterStarted": true,
        "QuarterDescription": "Final",
        "StadiumID": 1,
        "LastUpdated": "2023-09-10T16:31:07",
        "ForecastTempLow": 68,
        "ForecastTempHigh": 74,
        "ForecastDescription": "Partly Cloudy",
        "ForecastWindChill": 68,
        "ForecastWindSpeed": 9,
        "AwayTeamMoneyLine": 150,
        "HomeTeamMoneyLine": -175,
        "Canceled": false,
        "Closed": true,
        "LastPlay": "Kneel down",
        "Day": "2023-09-10T00:00:00",
        "DateTime": "2023-09-10T13:00:00",
        "GlobalGameID": 18000 + week,
        "ScoreID": 18000 + week,
        "Status": "Final",
        "GameEndDateTime": "2023-09-10T16:19:44",
        "NeutralVenue": false,
        "DateTimeUTC": "2023-09-10T17:00:00",
        "Attendance": 70112,
        "StadiumDetails": stadium_details_json(1),
    })
}

pub fn stat_line_json(player_game_id: i32, player_id: i32, game_key: &str, week: i32, team: &str) -> Value {
    json!({
        "PlayerGameID": player_game_id,
        "PlayerID": player_id,
        "GameKey": game_key,
        "SeasonType": 1,
        "Season": SEASON,
        "GameDate": "2023-09-10T13:00:00",
        "Week": week,
        "Team": team,
        "Opponent": "OPP",
        "HomeOrAway": "HOME",
        "Number": 15,
        "Name": format!("Player {player_id}"),
        "Position": "QB",
        "PositionCategory": "OFF",
        "Activated": 1,
        "Played": 1,
        "Started": 1,
        "PassingAttempts": 34.0,
        "PassingCompletions": 23.0,
        "PassingYards": 250.0,
        "PassingCompletionPercentage": 67.6,
        "PassingTouchdowns": 2.0,
        "PassingInterceptions": 0.0,
        "PassingRating": 108.1,
        "FantasyPoints": 18.5,
        "FantasyPointsPPR": 18.5,
        "FantasyPosition": "QB",
        "IsGameOver": true,
        "GlobalGameID": 18000 + week,
        "ScoringDetails": [],
        "InjuryStatus": null,
        "DateTime": "2023-09-10T13:00:00",
        "LastUpdated": "2023-09-10T16:31:07",
    })
}

pub fn play_by_play_json(game: Value) -> Value {
    let score_id = game["ScoreID"].clone();
    json!({
        "Score": game,
        "Quarters": [
            {"QuarterID": 1, "ScoreID": score_id, "Number": 1, "Name": "1",
             "Description": "1st Quarter", "AwayTeamScore": 7, "HomeTeamScore": 0}
        ],
        "Plays": [
            {"PlayID": 2, "QuarterID": 1, "QuarterName": "1", "Sequence": 2,
             "TimeRemainingMinutes": 9, "TimeRemainingSeconds": 12,
             "PlayTime": "2023-09-10T13:11:02", "Updated": "2023-09-10T13:11:40",
             "Created": "2023-09-10T13:11:05", "Team": "KC", "Opponent": "DET",
             "Down": 1, "Distance": 10, "YardLine": 25, "YardLineTerritory": "DET",
             "YardsToEndZone": 25, "Type": "PassCompleted", "YardsGained": 25,
             "Description": "P.Mahomes pass deep middle to T.Kelce for 25 yards, TOUCHDOWN.",
             "IsScoringPlay": true, "ScoringPlay": null,
             "PlayStats": [{"PlayStatID": 20, "PlayID": 2, "Sequence": 1, "PlayerID": 4314,
                            "Name": "Travis Kelce", "Team": "KC", "Opponent": "DET",
                            "HomeOrAway": "HOME", "Direction": "Middle",
                            "Updated": "2023-09-10T13:11:40", "ReceivingYards": 25}]},
            {"PlayID": 1, "QuarterID": 1, "QuarterName": "1", "Sequence": 1,
             "TimeRemainingMinutes": 15, "TimeRemainingSeconds": 0,
             "PlayTime": "2023-09-10T13:00:41", "Team": "DET", "Opponent": "KC",
             "Down": 0, "Distance": 0, "YardLine": 35, "YardLineTerritory": "DET",
             "Type": "Kickoff", "YardsGained": 0, "Description": "Kickoff, touchback.",
             "IsScoringPlay": false, "ScoringPlay": null, "PlayStats": []}
        ]
    })
}

// ──────────────────────────────────────────
// In-process upstream
// ──────────────────────────────────────────

#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Unreachable,
}

/// Transport answering from a path → reply table. Unscripted paths return
/// an empty JSON list. Every requested path is recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for a permit on `gate` before answering.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn reply(self, path: &str, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|p| p.as_str() == path).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.map_err(|e| SourceError::Transport {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        }

        self.calls.lock().unwrap().push(path.to_string());
        let reply = self.replies.lock().unwrap().get(path).cloned();
        match reply {
            Some(Reply::Json(value)) => Ok(serde_json::to_vec(&value).unwrap()),
            Some(Reply::Status(status)) => Err(SourceError::UpstreamStatus {
                endpoint: path.to_string(),
                status,
            }),
            Some(Reply::Unreachable) => Err(SourceError::Transport {
                endpoint: path.to_string(),
                message: "connection refused".to_string(),
            }),
            None => Ok(b"[]".to_vec()),
        }
    }
}

// ──────────────────────────────────────────
// Wiring
// ──────────────────────────────────────────

pub struct Harness {
    pub stores: Stores,
    pub orchestrator: Arc<Orchestrator>,
}

pub async fn harness(transport: Arc<dyn Transport>) -> Harness {
    let db = Database::in_memory().await.unwrap();
    let stores = Stores::new(&db);
    let orchestrator = Arc::new(Orchestrator::new(
        SportsDataClient::new(transport),
        stores.clone(),
        sync_config(),
        SyncStatus::new(),
    ));
    Harness { stores, orchestrator }
}

/// Serve the router on an ephemeral port; returns the base URL.
pub async fn spawn_api(harness: &Harness, admin: AdminAuth) -> String {
    let state = AppState::new(harness.stores.clone(), Arc::clone(&harness.orchestrator), admin);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, api::router(state)).await.unwrap();
    });
    format!("http://{addr}")
}
