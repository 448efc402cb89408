//! HTTP facade: read-only JSON routes over the stores plus one protected
//! trigger for a background sync.

pub mod auth;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Stores;
use crate::sync::Orchestrator;

pub use auth::AdminAuth;
pub use error::ApiError;

/// Shared state accessible by all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub orchestrator: Arc<Orchestrator>,
    pub admin: AdminAuth,
}

impl AppState {
    pub fn new(stores: Stores, orchestrator: Arc<Orchestrator>, admin: AdminAuth) -> Self {
        Self {
            stores,
            orchestrator,
            admin,
        }
    }
}

pub fn router(state: AppState) -> Router {
    use handlers::{admin, games, players, reference, schedules, standings, stats, teams};

    let admin_routes = Router::new()
        .route("/sync", post(admin::trigger_sync))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    let api = Router::new()
        .route("/teams", get(teams::list))
        .route("/teams/{id}", get(teams::by_id))
        .route("/teams/key/{key}", get(teams::by_key))
        .route("/players", get(players::list))
        .route("/players/{id}", get(players::by_id))
        .route("/players/pid/{player_id}", get(players::by_player_id))
        .route("/players/pid/{player_id}/depth", get(players::depth_status))
        .route("/players/pid/{player_id}/stats", get(players::season_stats))
        .route("/games", get(games::list))
        .route("/games/live", get(games::live))
        .route("/games/{id}", get(games::by_id))
        .route("/games/key/{game_key}", get(games::by_key))
        .route("/games/key/{game_key}/plays", get(games::plays))
        .route("/standings", get(standings::list))
        .route("/standings/{id}", get(standings::by_id))
        .route("/standings/team/{team}", get(standings::by_team))
        .route("/schedules", get(schedules::list))
        .route("/schedules/{id}", get(schedules::by_id))
        .route("/schedules/key/{game_key}", get(schedules::by_key))
        .route("/stadiums", get(reference::stadiums))
        .route("/stadiums/{stadium_id}", get(reference::stadium))
        .route("/referees", get(reference::referees))
        .route("/byeweeks", get(reference::bye_weeks))
        .route("/depthcharts", get(reference::depth_charts))
        .route("/depthcharts/team/{team}", get(reference::team_depth_chart))
        .route("/stats/top", get(stats::top))
        .nest("/admin", admin_routes);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on `listener` until `shutdown` flips to true. In-flight requests
/// are allowed to finish.
pub async fn serve(listener: TcpListener, state: AppState, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
        })
        .await
        .context("HTTP server error")
}
