use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::{naive_datetime, null_as_default};

/// Pre-game metadata for one scheduled game: kickoff, venue, odds, forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Schedule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub game_key: String,
    pub season_type: i32,
    pub season: i32,
    pub week: i32,
    #[serde(default, with = "naive_datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub away_team: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub home_team: String,
    pub channel: Option<String>,
    #[serde(rename = "StadiumID")]
    pub stadium_id: Option<i32>,
    pub canceled: Option<bool>,
    pub point_spread: Option<f64>,
    pub over_under: Option<f64>,
    pub away_team_money_line: Option<i32>,
    pub home_team_money_line: Option<i32>,
    pub forecast_temp_low: Option<i32>,
    pub forecast_temp_high: Option<i32>,
    pub forecast_description: Option<String>,
    pub forecast_wind_speed: Option<i32>,
    #[serde(default, with = "naive_datetime")]
    pub day: Option<NaiveDateTime>,
    #[serde(default, with = "naive_datetime")]
    pub date_time: Option<NaiveDateTime>,
    pub status: Option<String>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Schedule {
    /// Bye entries appear in the season schedule without a game key.
    pub fn is_bye(&self) -> bool {
        self.game_key.is_empty() || self.home_team == "BYE" || self.away_team == "BYE"
    }

    /// Kickoff time, preferring the full `DateTime` over `Date`.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        self.date_time.or(self.date)
    }
}
