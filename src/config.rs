use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

use crate::models::season::{Season, SeasonType};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub sportsdata: SportsDataConfig,
    pub sync: SyncConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SportsDataConfig {
    pub base_url: String,
    pub call_delay_ms: u64,
    pub connect_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_response_bytes: usize,
}

impl SportsDataConfig {
    pub fn call_delay(&self) -> Duration {
        Duration::from_millis(self.call_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub season: i32,
    pub season_type: SeasonType,
    pub interval_hours: u64,
    pub freshness_hours: FreshnessConfig,
}

impl SyncConfig {
    pub fn season(&self) -> Season {
        Season::new(self.season, self.season_type)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours * 3600)
    }
}

/// Maximum age, in hours, before a slowly-changing feed is fetched again.
#[derive(Debug, Clone, Deserialize)]
pub struct FreshnessConfig {
    pub teams: f64,
    pub stadiums: f64,
    pub referees: f64,
    pub bye_weeks: f64,
    pub players: f64,
    pub depth_charts: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Secrets loaded exclusively from environment variables.
/// Not serializable, not stored in config files.
pub struct Secrets {
    pub sportsdata_api_key: Option<SecretString>,
    pub admin_token: Option<SecretString>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            sportsdata_api_key: non_empty_env("SPORTSDATA_API_KEY").map(SecretString::from),
            admin_token: non_empty_env("ADMIN_TOKEN").map(SecretString::from),
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file (`GRIDIRON_CONFIG` or config/default.toml),
    /// then overlay environment variables.
    pub fn load() -> Result<(Self, Secrets)> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("GRIDIRON_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = Self::from_file(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok((config, Secrets::from_env()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Overlay process settings from the environment. `lookup` is injected so
    /// tests do not have to mutate the real process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = get("APP_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = get("APP_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("APP_PORT is not a valid port: {port}"))?;
        }
        if let Some(path) = get("DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(url) = get("SPORTSDATA_API_BASE_URL") {
            self.sportsdata.base_url = url;
        }
        if let Some(delay) = get("API_CALL_DELAY_MS") {
            self.sportsdata.call_delay_ms = delay
                .parse()
                .with_context(|| format!("API_CALL_DELAY_MS is not a number: {delay}"))?;
        }
        if let Some(season) = get("SYNC_SEASON") {
            self.sync.season = season
                .parse()
                .with_context(|| format!("SYNC_SEASON is not a year: {season}"))?;
        }
        if let Some(kind) = get("SYNC_SEASON_TYPE") {
            self.sync.season_type = kind
                .parse()
                .map_err(|e| anyhow::anyhow!("SYNC_SEASON_TYPE: {e}"))?;
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.monitoring.log_level = level;
        }

        if self.sync.interval_hours == 0 {
            bail!("sync.interval_hours must be greater than zero");
        }

        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
