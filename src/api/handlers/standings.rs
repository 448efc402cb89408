use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::handlers::{found, parse, parse_opt, text};
use crate::api::AppState;
use crate::db::Stored;
use crate::models::Standing;

#[derive(Debug, Deserialize)]
pub struct StandingQuery {
    season: Option<String>,
    conference: Option<String>,
    division: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeamStandingQuery {
    season: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<StandingQuery>,
) -> Result<Json<Vec<Stored<Standing>>>, ApiError> {
    let season = parse_opt("season", query.season.as_deref())?;
    let standings = state
        .stores
        .standings
        .filter(season, text(&query.conference), text(&query.division))
        .await?;
    Ok(Json(standings))
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stored<Standing>>, ApiError> {
    let id: i64 = parse("id", &id)?;
    found(state.stores.standings.get(id).await?, format!("standing {id}"))
}

/// A team's standing for `?season=`, or its most recent season.
pub async fn by_team(
    State(state): State<AppState>,
    Path(team): Path<String>,
    Query(query): Query<TeamStandingQuery>,
) -> Result<Json<Stored<Standing>>, ApiError> {
    let season = parse_opt("season", query.season.as_deref())?;
    let team = team.trim().to_uppercase();
    found(
        state.stores.standings.by_team(&team, season).await?,
        format!("standing for {team}"),
    )
}
