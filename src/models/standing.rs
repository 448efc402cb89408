use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::null_as_default;

/// One team's record for one season phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Standing {
    pub season_type: i32,
    pub season: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: String,
    pub conference: Option<String>,
    pub division: Option<String>,
    pub name: Option<String>,
    pub wins: Option<i32>,
    pub losses: Option<i32>,
    pub ties: Option<i32>,
    pub percentage: Option<f64>,
    pub points_for: Option<i32>,
    pub points_against: Option<i32>,
    pub net_points: Option<i32>,
    pub touchdowns: Option<i32>,
    pub division_wins: Option<i32>,
    pub division_losses: Option<i32>,
    pub conference_wins: Option<i32>,
    pub conference_losses: Option<i32>,
    pub division_rank: Option<i32>,
    pub conference_rank: Option<i32>,
    pub home_wins: Option<i32>,
    pub home_losses: Option<i32>,
    pub away_wins: Option<i32>,
    pub away_losses: Option<i32>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}
