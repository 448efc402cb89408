pub mod admin;
pub mod games;
pub mod players;
pub mod reference;
pub mod schedules;
pub mod standings;
pub mod stats;
pub mod teams;

use std::any::Any;
use std::fmt::Display;
use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::models::SeasonType;
use crate::monitoring::health::HealthReport;

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.orchestrator.status().snapshot().await)
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("route".to_string())
}

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
        .into_response()
}

/// Parse a required path or query value, mapping failure to a 400.
pub(crate) fn parse<T>(name: &str, raw: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid {name} '{raw}': {e}")))
}

/// Parse an optional query value; empty strings count as absent.
pub(crate) fn parse_opt<T>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse(name, value).map(Some),
        None => Ok(None),
    }
}

/// Optional text filter; empty strings count as absent.
pub(crate) fn text(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Numeric `SeasonType` for a list filter. An explicit `season_type`
/// (`REG`, `PRE`, `POST`) wins; otherwise a season or week filter is scoped
/// to the configured phase, and an unscoped listing spans every phase.
pub(crate) fn phase(state: &AppState, raw: Option<&str>, scoped: bool) -> Result<Option<i32>, ApiError> {
    let explicit = parse_opt::<SeasonType>("season_type", raw)?;
    let kind = match explicit {
        Some(kind) => Some(kind),
        None if scoped => Some(state.orchestrator.default_season().kind),
        None => None,
    };
    Ok(kind.map(SeasonType::code))
}

pub(crate) fn found<T>(value: Option<T>, what: impl Into<String>) -> Result<Json<T>, ApiError> {
    value.map(Json).ok_or_else(|| ApiError::NotFound(what.into()))
}
