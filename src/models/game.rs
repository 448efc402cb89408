use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::{naive_datetime, null_as_default};

/// Live or final score state of one game (`ScoresFinal` feed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    #[serde(default, deserialize_with = "null_as_default")]
    pub game_key: String,
    #[serde(rename = "ScoreID")]
    pub score_id: Option<i32>,
    pub season_type: i32,
    pub season: i32,
    pub week: i32,
    #[serde(default, with = "naive_datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub away_team: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub home_team: String,
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    pub channel: Option<String>,
    #[serde(rename = "StadiumID")]
    pub stadium_id: Option<i32>,
    pub status: Option<String>,
    pub quarter: Option<String>,
    pub time_remaining: Option<String>,
    pub possession: Option<String>,
    pub down: Option<i32>,
    pub distance: Option<String>,
    pub yard_line: Option<i32>,
    pub yard_line_territory: Option<String>,
    pub is_in_progress: Option<bool>,
    pub is_over: Option<bool>,
    pub canceled: Option<bool>,
    pub point_spread: Option<f64>,
    pub over_under: Option<f64>,
    pub away_team_money_line: Option<i32>,
    pub home_team_money_line: Option<i32>,
    pub away_score_quarter1: Option<i32>,
    pub away_score_quarter2: Option<i32>,
    pub away_score_quarter3: Option<i32>,
    pub away_score_quarter4: Option<i32>,
    pub away_score_overtime: Option<i32>,
    pub home_score_quarter1: Option<i32>,
    pub home_score_quarter2: Option<i32>,
    pub home_score_quarter3: Option<i32>,
    pub home_score_quarter4: Option<i32>,
    pub home_score_overtime: Option<i32>,
    pub forecast_description: Option<String>,
    pub forecast_temp_low: Option<i32>,
    pub forecast_temp_high: Option<i32>,
    pub forecast_wind_speed: Option<i32>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Game {
    pub fn is_final(&self) -> bool {
        self.is_over.unwrap_or(false)
            || matches!(self.status.as_deref(), Some("Final" | "F/OT"))
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.unwrap_or(false) || self.status.as_deref() == Some("Canceled")
    }
}
