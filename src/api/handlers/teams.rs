use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::handlers::{found, parse, text};
use crate::api::AppState;
use crate::db::Stored;
use crate::models::Team;

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    conference: Option<String>,
    division: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<Json<Vec<Stored<Team>>>, ApiError> {
    let conference = text(&query.conference);
    let division = text(&query.division);
    let teams = if conference.is_none() && division.is_none() {
        state.stores.teams.all().await?
    } else {
        state.stores.teams.by_division(conference, division).await?
    };
    Ok(Json(teams))
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stored<Team>>, ApiError> {
    let id: i64 = parse("id", &id)?;
    found(state.stores.teams.get(id).await?, format!("team {id}"))
}

pub async fn by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Stored<Team>>, ApiError> {
    let key = key.trim().to_uppercase();
    found(state.stores.teams.by_key(&key).await?, format!("team {key}"))
}
