use std::fmt;

use crate::models::Season;

/// Every upstream feed the sync reads, with its path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Teams,
    Players,
    Stadiums,
    Referees,
    DepthCharts,
    Standings(Season),
    Schedules(Season),
    Byes(Season),
    Scores { season: Season, week: i32 },
    PlayerGameStats { season: Season, week: i32, team: String },
    PlayByPlay { season: Season, week: i32, home_team: String },
}

impl Endpoint {
    /// Path relative to the configured base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Teams => "/scores/json/TeamsBasic".to_string(),
            Endpoint::Players => "/scores/json/PlayersByAvailable".to_string(),
            Endpoint::Stadiums => "/scores/json/Stadiums".to_string(),
            Endpoint::Referees => "/scores/json/Referees".to_string(),
            Endpoint::DepthCharts => "/scores/json/DepthCharts".to_string(),
            Endpoint::Standings(season) => format!("/scores/json/Standings/{}", season.param()),
            Endpoint::Schedules(season) => format!("/scores/json/Schedules/{}", season.param()),
            Endpoint::Byes(season) => format!("/scores/json/Byes/{}", season.param()),
            Endpoint::Scores { season, week } => {
                format!("/stats/json/ScoresFinal/{}/{week}", season.param())
            }
            Endpoint::PlayerGameStats { season, week, team } => format!(
                "/stats/json/PlayerGameStatsByTeamFinal/{}/{week}/{}",
                season.param(),
                urlencoding::encode(team)
            ),
            Endpoint::PlayByPlay {
                season,
                week,
                home_team,
            } => format!(
                "/pbp/json/PlayByPlayFinal/{}/{week}/{}",
                season.param(),
                urlencoding::encode(home_team)
            ),
        }
    }

    /// Staleness-tracker key. Parameterized feeds get one key per parameter set.
    pub fn feed_key(&self) -> String {
        match self {
            Endpoint::Teams => "teams".to_string(),
            Endpoint::Players => "players".to_string(),
            Endpoint::Stadiums => "stadiums".to_string(),
            Endpoint::Referees => "referees".to_string(),
            Endpoint::DepthCharts => "depth_charts".to_string(),
            Endpoint::Standings(season) => format!("standings_{}", season.param()),
            Endpoint::Schedules(season) => format!("schedules_{}", season.param()),
            Endpoint::Byes(season) => format!("bye_weeks_{}", season.param()),
            Endpoint::Scores { season, week } => format!("games_{}_w{week}", season.param()),
            Endpoint::PlayerGameStats { season, week, team } => {
                format!("player_stats_{}_w{week}_{team}", season.param())
            }
            Endpoint::PlayByPlay {
                season,
                week,
                home_team,
            } => format!("play_by_play_{}_w{week}_{home_team}", season.param()),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
