use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::null_as_default;

/// The three depth-chart sections of a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Offense,
    Defense,
    SpecialTeams,
}

impl Unit {
    pub const ALL: [Unit; 3] = [Unit::Offense, Unit::Defense, Unit::SpecialTeams];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepthChartSlot {
    #[serde(rename = "DepthChartID")]
    pub depth_chart_id: i32,
    #[serde(rename = "TeamID")]
    pub team_id: i32,
    #[serde(rename = "PlayerID")]
    pub player_id: i32,
    pub name: Option<String>,
    pub position_category: Option<String>,
    pub position: Option<String>,
    pub depth_order: i32,
}

/// Upstream `DepthCharts` record: slots grouped by unit, keyed only by `TeamID`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TeamDepthChart {
    #[serde(rename = "TeamID")]
    pub team_id: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offense: Vec<DepthChartSlot>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub defense: Vec<DepthChartSlot>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub special_teams: Vec<DepthChartSlot>,
}

/// Stored depth chart, denormalized with the team abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepthChart {
    #[serde(rename = "TeamID")]
    pub team_id: i32,
    pub team: String,
    pub offense: Vec<DepthChartSlot>,
    pub defense: Vec<DepthChartSlot>,
    pub special_teams: Vec<DepthChartSlot>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl DepthChart {
    /// Compose the stored document from an upstream record. `team` may be
    /// empty when the team is not known locally.
    pub fn compose(upstream: TeamDepthChart, team: String) -> Self {
        Self {
            team_id: upstream.team_id,
            team,
            offense: upstream.offense,
            defense: upstream.defense,
            special_teams: upstream.special_teams,
            last_updated: None,
        }
    }

    pub fn slots(&self, unit: Unit) -> &[DepthChartSlot] {
        match unit {
            Unit::Offense => &self.offense,
            Unit::Defense => &self.defense,
            Unit::SpecialTeams => &self.special_teams,
        }
    }

    pub fn player_status(&self, player_id: i32) -> Vec<PlayerDepthStatus> {
        Unit::ALL
            .into_iter()
            .flat_map(|unit| {
                self.slots(unit)
                    .iter()
                    .filter(move |slot| slot.player_id == player_id)
                    .map(move |slot| PlayerDepthStatus {
                        team: self.team.clone(),
                        unit,
                        position: slot.position.clone(),
                        position_category: slot.position_category.clone(),
                        depth_order: slot.depth_order,
                    })
            })
            .collect()
    }
}

/// Where a player sits on one team's depth chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerDepthStatus {
    pub team: String,
    pub unit: Unit,
    pub position: Option<String>,
    pub position_category: Option<String>,
    pub depth_order: i32,
}
