use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RedZoneStats {
    pub passing_attempts: Option<i32>,
    pub passing_completions: Option<i32>,
    pub passing_yards: Option<i32>,
    pub passing_touchdowns: Option<i32>,
}

/// One player's box-score line for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerGameStats {
    #[serde(rename = "PlayerGameID")]
    pub player_game_id: i32,
    #[serde(rename = "PlayerID")]
    pub player_id: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub game_key: String,
    pub season_type: i32,
    pub season: i32,
    pub week: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: String,
    pub opponent: Option<String>,
    pub home_or_away: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub passing_attempts: Option<f64>,
    pub passing_completions: Option<f64>,
    pub passing_yards: Option<f64>,
    pub passing_touchdowns: Option<f64>,
    pub passing_interceptions: Option<f64>,
    pub passing_sacks: Option<f64>,
    pub passing_sack_yards: Option<f64>,
    pub rushing_attempts: Option<f64>,
    pub rushing_yards: Option<f64>,
    pub rushing_touchdowns: Option<f64>,
    pub receiving_targets: Option<f64>,
    pub receptions: Option<f64>,
    pub receiving_yards: Option<f64>,
    pub receiving_touchdowns: Option<f64>,
    pub fumbles: Option<f64>,
    pub fumbles_lost: Option<f64>,
    pub fantasy_points: Option<f64>,
    #[serde(rename = "FantasyPointsPPR")]
    pub fantasy_points_ppr: Option<f64>,
    pub red_zone_stats: Option<RedZoneStats>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Stat columns a leaderboard can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatField {
    PassingYards,
    PassingTouchdowns,
    RushingYards,
    RushingTouchdowns,
    ReceivingYards,
    ReceivingTouchdowns,
    Receptions,
    FantasyPoints,
    #[serde(rename = "FantasyPointsPPR")]
    FantasyPointsPpr,
}

impl StatField {
    pub const ALL: [StatField; 9] = [
        StatField::PassingYards,
        StatField::PassingTouchdowns,
        StatField::RushingYards,
        StatField::RushingTouchdowns,
        StatField::ReceivingYards,
        StatField::ReceivingTouchdowns,
        StatField::Receptions,
        StatField::FantasyPoints,
        StatField::FantasyPointsPpr,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            StatField::PassingYards => "PassingYards",
            StatField::PassingTouchdowns => "PassingTouchdowns",
            StatField::RushingYards => "RushingYards",
            StatField::RushingTouchdowns => "RushingTouchdowns",
            StatField::ReceivingYards => "ReceivingYards",
            StatField::ReceivingTouchdowns => "ReceivingTouchdowns",
            StatField::Receptions => "Receptions",
            StatField::FantasyPoints => "FantasyPoints",
            StatField::FantasyPointsPpr => "FantasyPointsPPR",
        }
    }

    /// JSON path of the field inside a stored stats document.
    pub fn json_path(self) -> String {
        format!("$.{}", self.field_name())
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for StatField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatField::ALL
            .into_iter()
            .find(|field| field.field_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown stat field: {s}"))
    }
}
