use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::handlers::{found, parse, parse_opt, phase, text};
use crate::api::AppState;
use crate::db::Stored;
use crate::models::{Game, Play};

#[derive(Debug, Deserialize)]
pub struct GameQuery {
    team: Option<String>,
    season: Option<String>,
    week: Option<String>,
    season_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaysQuery {
    scoring: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<GameQuery>,
) -> Result<Json<Vec<Stored<Game>>>, ApiError> {
    let season = parse_opt("season", query.season.as_deref())?;
    let week = parse_opt("week", query.week.as_deref())?;
    let season_type = phase(
        &state,
        query.season_type.as_deref(),
        season.is_some() || week.is_some(),
    )?;
    let games = state
        .stores
        .games
        .filter(text(&query.team), season, week, season_type)
        .await?;
    Ok(Json(games))
}

pub async fn live(State(state): State<AppState>) -> Result<Json<Vec<Stored<Game>>>, ApiError> {
    Ok(Json(state.stores.games.live().await?))
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stored<Game>>, ApiError> {
    let id: i64 = parse("id", &id)?;
    found(state.stores.games.get(id).await?, format!("game {id}"))
}

pub async fn by_key(
    State(state): State<AppState>,
    Path(game_key): Path<String>,
) -> Result<Json<Stored<Game>>, ApiError> {
    found(
        state.stores.games.by_game_key(&game_key).await?,
        format!("game {game_key}"),
    )
}

/// Plays of one game in sequence order; `?scoring=true` keeps scoring plays only.
pub async fn plays(
    State(state): State<AppState>,
    Path(game_key): Path<String>,
    Query(query): Query<PlaysQuery>,
) -> Result<Json<Vec<Play>>, ApiError> {
    let scoring_only = parse_opt::<bool>("scoring", query.scoring.as_deref())?.unwrap_or(false);
    let store = &state.stores.play_by_play;

    let plays = if scoring_only {
        store.scoring_plays(&game_key).await?
    } else {
        store.by_game_key(&game_key).await?.map(|pbp| pbp.doc.plays)
    };

    found(plays, format!("play-by-play for game {game_key}"))
}
