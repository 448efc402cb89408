use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::handlers::{parse, parse_opt};
use crate::api::AppState;
use crate::db::Stored;
use crate::models::{PlayerGameStats, StatField};

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    season: Option<String>,
    week: Option<String>,
    stat: Option<String>,
    limit: Option<String>,
}

/// `GET /stats/top?season=&week=&stat=&limit=`: week leaders for one stat.
pub async fn top(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<Stored<PlayerGameStats>>>, ApiError> {
    let season: i32 = parse_opt("season", query.season.as_deref())?
        .unwrap_or_else(|| state.orchestrator.default_season().year);
    let week: i32 = parse(
        "week",
        query
            .week
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("week is required".to_string()))?,
    )?;
    let stat: StatField = parse(
        "stat",
        query
            .stat
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("stat is required".to_string()))?,
    )?;
    let limit: i64 = parse_opt("limit", query.limit.as_deref())?.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest(format!("limit must be between 1 and {MAX_LIMIT}")));
    }

    let leaders = state
        .stores
        .player_stats
        .top(season, week, stat, limit)
        .await?;
    Ok(Json(leaders))
}
