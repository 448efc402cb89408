//! Entity shapes synchronized from the SportsData.io NFL feeds.
//!
//! Field names follow the upstream PascalCase JSON so that stored documents
//! and HTTP responses carry the same shape the API returns, plus a
//! `last_updated` stamp written by the stores. The upstream `LastUpdated`
//! field is a naive Eastern timestamp and is not retained.

pub mod depth_chart;
pub mod game;
pub mod play_by_play;
pub mod player;
pub mod reference;
pub mod schedule;
pub mod season;
pub mod serde_util;
pub mod standing;
pub mod stats;
pub mod team;

pub use depth_chart::{DepthChart, DepthChartSlot, PlayerDepthStatus, TeamDepthChart, Unit};
pub use game::Game;
pub use play_by_play::{Play, PlayByPlay, PlayByPlayResponse, PlayStat, Quarter};
pub use player::Player;
pub use reference::{ByeWeek, Referee, Stadium};
pub use schedule::Schedule;
pub use season::{Season, SeasonType, MAX_REGULAR_SEASON_WEEK};
pub use standing::Standing;
pub use stats::{PlayerGameStats, StatField};
pub use team::Team;
