use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use gridiron_sync::api::{self, AdminAuth, AppState};
use gridiron_sync::config::{AppConfig, Secrets};
use gridiron_sync::db::{Database, Stores};
use gridiron_sync::monitoring::health::SyncStatus;
use gridiron_sync::monitoring::logger;
use gridiron_sync::source::{HttpTransport, SportsDataClient};
use gridiron_sync::sync::scheduler::spawn_scheduler;
use gridiron_sync::sync::{FeedStatus, Orchestrator, SyncError};

#[derive(Debug, Parser)]
#[command(name = "gridiron-sync", version, about = "NFL data sync and query service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API and run the periodic sync (default).
    Serve {
        /// Serve reads only; syncs run solely through the admin trigger.
        #[arg(long)]
        no_scheduler: bool,
    },
    /// Run one full sync and exit.
    Sync {
        /// Season year; defaults to the configured season.
        #[arg(long)]
        season: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, secrets) = AppConfig::load()?;

    logger::init_logging(&config.monitoring)?;

    info!(
        season = %config.sync.season(),
        database = %config.database.path,
        "gridiron-sync starting"
    );

    let Secrets {
        sportsdata_api_key,
        admin_token,
    } = secrets;
    let api_key = sportsdata_api_key.context("SPORTSDATA_API_KEY must be set")?;

    let db = Database::open(&config.database.path).await?;
    let stores = Stores::new(&db);
    let transport = HttpTransport::new(&config.sportsdata, api_key)?;
    let orchestrator = Arc::new(Orchestrator::new(
        SportsDataClient::new(Arc::new(transport)),
        stores.clone(),
        config.sync.clone(),
        SyncStatus::new(),
    ));

    match cli.command.unwrap_or(Command::Serve { no_scheduler: false }) {
        Command::Serve { no_scheduler } => {
            let state = AppState::new(stores, orchestrator, AdminAuth::new(admin_token.as_ref()));
            run_server(&config, state, no_scheduler).await
        }
        Command::Sync { season } => run_once(&orchestrator, season).await,
    }
}

async fn run_server(config: &AppConfig, state: AppState, no_scheduler: bool) -> Result<()> {
    if !state.admin.is_enabled() {
        warn!("ADMIN_TOKEN is not set; admin routes will reject every request");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let scheduler = (!no_scheduler).then(|| {
        spawn_scheduler(
            Arc::clone(&state.orchestrator),
            config.sync.interval(),
            shutdown_rx.clone(),
        )
    });

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    api::serve(listener, state, shutdown_rx).await?;

    if let Some(handle) = scheduler {
        // a run in progress is allowed to finish
        if let Err(e) = handle.await {
            warn!(error = %e, "Scheduler task ended abnormally");
        }
    }

    info!("gridiron-sync stopped");
    Ok(())
}

async fn run_once(orchestrator: &Orchestrator, season: Option<i32>) -> Result<()> {
    let season = season
        .map(|year| orchestrator.season(year))
        .unwrap_or_else(|| orchestrator.default_season());

    let report = match orchestrator.sync_season(season).await {
        Ok(report) => report,
        Err(SyncError::AlreadyRunning) => anyhow::bail!("a sync run is already in progress"),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    let failed = report.count(FeedStatus::Failed);
    if failed > 0 {
        warn!(failed, "Sync finished with failed feeds");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
