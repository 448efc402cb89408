use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::handlers::parse_opt;
use crate::api::AppState;
use crate::sync::SyncError;

const MIN_SEASON: i32 = 2000;
const MAX_SEASON: i32 = 2100;

#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    season: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncAccepted {
    pub message: String,
    pub season: i32,
}

/// Start a background sync for `?season=` (default: the configured season)
/// and return 202 without waiting for it.
pub async fn trigger_sync(
    State(state): State<AppState>,
    Query(query): Query<SyncQuery>,
) -> Result<(StatusCode, Json<SyncAccepted>), ApiError> {
    let year = parse_opt("season", query.season.as_deref())?
        .unwrap_or_else(|| state.orchestrator.default_season().year);
    if !(MIN_SEASON..=MAX_SEASON).contains(&year) {
        return Err(ApiError::BadRequest(format!(
            "season must be a year between {MIN_SEASON} and {MAX_SEASON}"
        )));
    }

    let season = state.orchestrator.season(year);
    match state.orchestrator.spawn_season_sync(season) {
        Ok(_handle) => {
            info!(season = %season, "Sync triggered over HTTP");
            Ok((
                StatusCode::ACCEPTED,
                Json(SyncAccepted {
                    message: "Data synchronization started".to_string(),
                    season: year,
                }),
            ))
        }
        Err(SyncError::AlreadyRunning) => Err(ApiError::Conflict(
            "a sync run is already in progress".to_string(),
        )),
    }
}
