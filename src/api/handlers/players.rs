use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::handlers::{found, parse, parse_opt, text};
use crate::api::AppState;
use crate::db::Stored;
use crate::models::{Player, PlayerDepthStatus, PlayerGameStats};

#[derive(Debug, Deserialize)]
pub struct PlayerQuery {
    team: Option<String>,
    position: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    season: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<Vec<Stored<Player>>>, ApiError> {
    let players = state
        .stores
        .players
        .filter(text(&query.team), text(&query.position))
        .await?;
    Ok(Json(players))
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stored<Player>>, ApiError> {
    let id: i64 = parse("id", &id)?;
    found(state.stores.players.get(id).await?, format!("player {id}"))
}

pub async fn by_player_id(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Stored<Player>>, ApiError> {
    let player_id: i32 = parse("player id", &player_id)?;
    found(
        state.stores.players.by_player_id(player_id).await?,
        format!("player {player_id}"),
    )
}

pub async fn depth_status(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Vec<PlayerDepthStatus>>, ApiError> {
    let player_id: i32 = parse("player id", &player_id)?;
    Ok(Json(state.stores.depth_charts.player_status(player_id).await?))
}

/// Game-by-game lines for a season, defaulting to the configured season.
pub async fn season_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> Result<Json<Vec<Stored<PlayerGameStats>>>, ApiError> {
    let player_id: i32 = parse("player id", &player_id)?;
    let season = parse_opt("season", query.season.as_deref())?
        .unwrap_or_else(|| state.orchestrator.default_season().year);
    let stats = state
        .stores
        .player_stats
        .by_player_season(player_id, season)
        .await?;
    Ok(Json(stats))
}
