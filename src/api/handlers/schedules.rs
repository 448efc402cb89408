use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::handlers::{found, parse, parse_opt, phase, text};
use crate::api::AppState;
use crate::db::Stored;
use crate::models::Schedule;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    team: Option<String>,
    season: Option<String>,
    week: Option<String>,
    season_type: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<Stored<Schedule>>>, ApiError> {
    let season = parse_opt("season", query.season.as_deref())?;
    let week = parse_opt("week", query.week.as_deref())?;
    let season_type = phase(
        &state,
        query.season_type.as_deref(),
        season.is_some() || week.is_some(),
    )?;
    let schedules = state
        .stores
        .schedules
        .filter(text(&query.team), season, week, season_type)
        .await?;
    Ok(Json(schedules))
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stored<Schedule>>, ApiError> {
    let id: i64 = parse("id", &id)?;
    found(state.stores.schedules.get(id).await?, format!("schedule {id}"))
}

pub async fn by_key(
    State(state): State<AppState>,
    Path(game_key): Path<String>,
) -> Result<Json<Stored<Schedule>>, ApiError> {
    found(
        state.stores.schedules.by_game_key(&game_key).await?,
        format!("schedule {game_key}"),
    )
}
