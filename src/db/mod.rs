//! SQLite persistence: the database handle, document collections and the
//! sync metadata used for staleness decisions.

pub mod collection;
pub mod depth_charts;
pub mod error;
pub mod games;
pub mod metadata;
pub mod play_by_play;
pub mod player_stats;
pub mod players;
pub mod reference;
pub mod schedules;
pub mod standings;
pub mod teams;

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{
    ByeWeek, DepthChart, Game, Player, PlayerGameStats, PlayByPlay, Referee, Schedule, Stadium,
    Standing, Team,
};

pub use collection::{BulkOutcome, Collection, Document, Stored, UpsertOutcome};
pub use error::StoreError;
pub use metadata::{AttemptStatus, SyncMetadata, SyncMetadataStore};

const IN_MEMORY: &str = ":memory:";

/// Owned handle to the database. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at `path` and apply migrations.
    /// `:memory:` opens a private in-memory database.
    pub async fn open(path: &str) -> Result<Self> {
        if path == IN_MEMORY {
            return Self::in_memory().await;
        }

        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{path}"))
            .context("Invalid database path")?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        let db = Self { pool };
        db.migrate().await?;
        info!(path, "Database ready");
        Ok(db)
    }

    /// Every connection to `:memory:` is a separate database, so the pool
    /// holds exactly one connection and never recycles it.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("Invalid in-memory database options")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        let migration_sql = include_str!("../../migrations/001_init.sql");
        // sqlx runs one statement per call
        for statement in migration_sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .with_context(|| format!("Failed to execute migration: {trimmed}"))?;
            }
        }
        Ok(())
    }
}

/// One store per entity plus the sync metadata, all sharing one pool.
#[derive(Clone)]
pub struct Stores {
    pub teams: Collection<Team>,
    pub players: Collection<Player>,
    pub games: Collection<Game>,
    pub schedules: Collection<Schedule>,
    pub standings: Collection<Standing>,
    pub player_stats: Collection<PlayerGameStats>,
    pub play_by_play: Collection<PlayByPlay>,
    pub depth_charts: Collection<DepthChart>,
    pub stadiums: Collection<Stadium>,
    pub referees: Collection<Referee>,
    pub bye_weeks: Collection<ByeWeek>,
    pub metadata: SyncMetadataStore,
}

impl Stores {
    pub fn new(db: &Database) -> Self {
        let pool = db.pool().clone();
        Self {
            teams: Collection::new(pool.clone()),
            players: Collection::new(pool.clone()),
            games: Collection::new(pool.clone()),
            schedules: Collection::new(pool.clone()),
            standings: Collection::new(pool.clone()),
            player_stats: Collection::new(pool.clone()),
            play_by_play: Collection::new(pool.clone()),
            depth_charts: Collection::new(pool.clone()),
            stadiums: Collection::new(pool.clone()),
            referees: Collection::new(pool.clone()),
            bye_weeks: Collection::new(pool.clone()),
            metadata: SyncMetadataStore::new(pool),
        }
    }
}
