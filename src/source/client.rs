use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{
    ByeWeek, Game, Player, PlayerGameStats, PlayByPlay, PlayByPlayResponse, Referee, Schedule,
    Season, Stadium, Standing, Team, TeamDepthChart,
};
use crate::source::{Endpoint, SourceError, Transport};

/// Typed view over a [`Transport`]: one method per feed.
#[derive(Clone)]
pub struct SportsDataClient {
    transport: Arc<dyn Transport>,
}

impl SportsDataClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, SourceError> {
        let path = endpoint.path();
        let body = self.transport.get(&path).await?;
        debug!(endpoint = %path, bytes = body.len(), "Received upstream payload");

        serde_json::from_slice(&body).map_err(|e| SourceError::Decode {
            endpoint: path,
            message: e.to_string(),
        })
    }

    pub async fn teams(&self) -> Result<Vec<Team>, SourceError> {
        self.fetch(&Endpoint::Teams).await
    }

    pub async fn players(&self) -> Result<Vec<Player>, SourceError> {
        self.fetch(&Endpoint::Players).await
    }

    pub async fn stadiums(&self) -> Result<Vec<Stadium>, SourceError> {
        self.fetch(&Endpoint::Stadiums).await
    }

    pub async fn referees(&self) -> Result<Vec<Referee>, SourceError> {
        self.fetch(&Endpoint::Referees).await
    }

    pub async fn depth_charts(&self) -> Result<Vec<TeamDepthChart>, SourceError> {
        self.fetch(&Endpoint::DepthCharts).await
    }

    pub async fn standings(&self, season: Season) -> Result<Vec<Standing>, SourceError> {
        self.fetch(&Endpoint::Standings(season)).await
    }

    pub async fn schedules(&self, season: Season) -> Result<Vec<Schedule>, SourceError> {
        self.fetch(&Endpoint::Schedules(season)).await
    }

    /// Bye weeks with their synthesized `ByeID`.
    pub async fn byes(&self, season: Season) -> Result<Vec<ByeWeek>, SourceError> {
        let byes: Vec<ByeWeek> = self.fetch(&Endpoint::Byes(season)).await?;
        Ok(byes.into_iter().map(ByeWeek::assign_id).collect())
    }

    pub async fn scores(&self, season: Season, week: i32) -> Result<Vec<Game>, SourceError> {
        self.fetch(&Endpoint::Scores { season, week }).await
    }

    pub async fn player_game_stats(
        &self,
        season: Season,
        week: i32,
        team: &str,
    ) -> Result<Vec<PlayerGameStats>, SourceError> {
        self.fetch(&Endpoint::PlayerGameStats {
            season,
            week,
            team: team.to_string(),
        })
        .await
    }

    pub async fn play_by_play(
        &self,
        season: Season,
        week: i32,
        home_team: &str,
    ) -> Result<PlayByPlay, SourceError> {
        let response: PlayByPlayResponse = self
            .fetch(&Endpoint::PlayByPlay {
                season,
                week,
                home_team: home_team.to_string(),
            })
            .await?;
        Ok(response.into())
    }
}
