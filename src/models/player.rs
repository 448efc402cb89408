use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::{naive_datetime, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    #[serde(rename = "PlayerID")]
    pub player_id: i32,
    /// Team abbreviation; empty for free agents.
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: String,
    pub number: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub position_category: Option<String>,
    pub fantasy_position: Option<String>,
    pub status: Option<String>,
    pub height: Option<String>,
    pub weight: Option<i32>,
    #[serde(default, with = "naive_datetime")]
    pub birth_date: Option<NaiveDateTime>,
    pub college: Option<String>,
    pub experience: Option<i32>,
    pub active: Option<bool>,
    pub age: Option<i32>,
    pub photo_url: Option<String>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}
