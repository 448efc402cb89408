use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Team {
    #[serde(rename = "TeamID")]
    pub team_id: i32,
    /// Abbreviation (`KC`, `PHI`) used as the team reference across feeds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    pub city: Option<String>,
    pub name: Option<String>,
    pub conference: Option<String>,
    pub division: Option<String>,
    pub full_name: Option<String>,
    #[serde(rename = "StadiumID")]
    pub stadium_id: Option<i32>,
    pub bye_week: Option<i32>,
    pub head_coach: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub tertiary_color: Option<String>,
    pub quaternary_color: Option<String>,
    pub offensive_coordinator: Option<String>,
    pub defensive_coordinator: Option<String>,
    pub special_teams_coach: Option<String>,
    pub offensive_scheme: Option<String>,
    pub defensive_scheme: Option<String>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}
