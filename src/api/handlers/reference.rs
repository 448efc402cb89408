use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::handlers::{found, parse, parse_opt};
use crate::api::AppState;
use crate::db::Stored;
use crate::models::{ByeWeek, DepthChart, Referee, Stadium};

#[derive(Debug, Deserialize)]
pub struct ByeWeekQuery {
    season: Option<String>,
    week: Option<String>,
}

pub async fn stadiums(State(state): State<AppState>) -> Result<Json<Vec<Stored<Stadium>>>, ApiError> {
    Ok(Json(state.stores.stadiums.all().await?))
}

pub async fn stadium(
    State(state): State<AppState>,
    Path(stadium_id): Path<String>,
) -> Result<Json<Stored<Stadium>>, ApiError> {
    let stadium_id: i32 = parse("stadium id", &stadium_id)?;
    found(
        state.stores.stadiums.by_stadium_id(stadium_id).await?,
        format!("stadium {stadium_id}"),
    )
}

pub async fn referees(State(state): State<AppState>) -> Result<Json<Vec<Stored<Referee>>>, ApiError> {
    Ok(Json(state.stores.referees.all().await?))
}

pub async fn bye_weeks(
    State(state): State<AppState>,
    Query(query): Query<ByeWeekQuery>,
) -> Result<Json<Vec<Stored<ByeWeek>>>, ApiError> {
    let season = parse_opt("season", query.season.as_deref())?
        .unwrap_or_else(|| state.orchestrator.default_season().year);
    let week = parse_opt("week", query.week.as_deref())?;
    Ok(Json(state.stores.bye_weeks.by_season(season, week).await?))
}

pub async fn depth_charts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<DepthChart>>>, ApiError> {
    Ok(Json(state.stores.depth_charts.all().await?))
}

pub async fn team_depth_chart(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<Stored<DepthChart>>, ApiError> {
    let team = team.trim().to_uppercase();
    found(
        state.stores.depth_charts.by_team(&team).await?,
        format!("depth chart for {team}"),
    )
}
