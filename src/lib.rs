//! NFL data sync service: pulls SportsData.io feeds into SQLite on a
//! schedule and serves them over a small read-only HTTP API.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod monitoring;
pub mod source;
pub mod sync;
