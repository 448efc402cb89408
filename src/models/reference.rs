//! Slowly-changing reference feeds: stadiums, referees and bye weeks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stadium {
    #[serde(rename = "StadiumID")]
    pub stadium_id: i32,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub capacity: Option<i32>,
    pub playing_surface: Option<String>,
    pub geo_lat: Option<f64>,
    pub geo_long: Option<f64>,
    #[serde(rename = "Type")]
    pub stadium_type: Option<String>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Referee {
    #[serde(rename = "RefereeID")]
    pub referee_id: i32,
    pub name: Option<String>,
    pub number: Option<i32>,
    pub position: Option<String>,
    pub college: Option<String>,
    pub experience: Option<i32>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByeWeek {
    /// `{season}-{week}-{team}`; filled in by [`ByeWeek::assign_id`] when absent upstream.
    #[serde(rename = "ByeID", default, deserialize_with = "null_as_default")]
    pub bye_id: String,
    pub season: i32,
    pub week: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: String,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ByeWeek {
    pub fn synthesize_id(season: i32, week: i32, team: &str) -> String {
        format!("{season}-{week}-{team}")
    }

    pub fn assign_id(mut self) -> Self {
        self.bye_id = Self::synthesize_id(self.season, self.week, &self.team);
        self
    }
}
