use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::game::Game;
use super::serde_util::{naive_datetime, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayStat {
    #[serde(rename = "PlayStatID")]
    pub play_stat_id: i32,
    #[serde(rename = "PlayID")]
    pub play_id: i32,
    pub sequence: Option<i32>,
    #[serde(rename = "PlayerID")]
    pub player_id: i32,
    pub name: Option<String>,
    pub team: Option<String>,
    pub opponent: Option<String>,
    pub home_or_away: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Play {
    #[serde(rename = "PlayID")]
    pub play_id: i32,
    #[serde(rename = "QuarterID")]
    pub quarter_id: Option<i32>,
    pub quarter_name: Option<String>,
    pub sequence: i32,
    pub time_remaining_minutes: Option<i32>,
    pub time_remaining_seconds: Option<i32>,
    #[serde(default, with = "naive_datetime")]
    pub play_time: Option<NaiveDateTime>,
    pub team: Option<String>,
    pub opponent: Option<String>,
    pub down: Option<i32>,
    pub distance: Option<i32>,
    pub yard_line: Option<i32>,
    pub yard_line_territory: Option<String>,
    pub yards_to_end_zone: Option<i32>,
    #[serde(rename = "Type")]
    pub play_type: Option<String>,
    pub yards_gained: Option<i32>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_scoring_play: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub play_stats: Vec<PlayStat>,
}

impl Play {
    pub fn involves(&self, player_id: i32) -> bool {
        self.play_stats.iter().any(|stat| stat.player_id == player_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quarter {
    #[serde(rename = "QuarterID")]
    pub quarter_id: i32,
    #[serde(rename = "ScoreID")]
    pub score_id: Option<i32>,
    pub number: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub away_team_score: Option<i32>,
    pub home_team_score: Option<i32>,
}

/// Payload of the `PlayByPlayFinal` feed. The game key lives on the nested score.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayByPlayResponse {
    pub score: Game,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quarters: Vec<Quarter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plays: Vec<Play>,
}

/// Stored play-by-play document: one per game, plays ordered by `Sequence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayByPlay {
    pub game_key: String,
    pub score: Game,
    pub quarters: Vec<Quarter>,
    pub plays: Vec<Play>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<PlayByPlayResponse> for PlayByPlay {
    fn from(response: PlayByPlayResponse) -> Self {
        let mut plays = response.plays;
        plays.sort_by_key(|play| play.sequence);
        Self {
            game_key: response.score.game_key.clone(),
            score: response.score,
            quarters: response.quarters,
            plays,
            last_updated: None,
        }
    }
}

impl PlayByPlay {
    pub fn scoring_plays(&self) -> impl Iterator<Item = &Play> {
        self.plays.iter().filter(|play| play.is_scoring_play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_orders_plays_by_sequence() {
        let json = r#"{
            "Score": {"GameKey": "202310101", "SeasonType": 1, "Season": 2023, "Week": 1,
                      "AwayTeam": "DET", "HomeTeam": "KC"},
            "Quarters": null,
            "Plays": [
                {"PlayID": 11, "Sequence": 2, "IsScoringPlay": true,
                 "PlayStats": [{"PlayStatID": 1, "PlayID": 11, "PlayerID": 4314}]},
                {"PlayID": 10, "Sequence": 1, "IsScoringPlay": false, "PlayStats": null}
            ]
        }"#;
        let response: PlayByPlayResponse = serde_json::from_str(json).unwrap();
        let pbp = PlayByPlay::from(response);

        assert_eq!(pbp.game_key, "202310101");
        assert!(pbp.quarters.is_empty());
        assert_eq!(
            pbp.plays.iter().map(|p| p.play_id).collect::<Vec<_>>(),
            vec![10, 11]
        );
        assert_eq!(pbp.scoring_plays().count(), 1);
        assert!(pbp.plays[1].involves(4314));
        assert!(!pbp.plays[0].involves(4314));
    }
}
