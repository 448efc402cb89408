//! Current-week detection from a schedule snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::serde_util::eastern_to_utc;
use crate::models::{Schedule, MAX_REGULAR_SEASON_WEEK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekSource {
    /// Taken from the next game on the schedule.
    Schedule,
    /// No upcoming game was found; the last regular-season week is assumed.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekEstimate {
    pub week: i32,
    pub source: WeekSource,
}

impl WeekEstimate {
    pub fn fallback() -> Self {
        Self {
            week: MAX_REGULAR_SEASON_WEEK,
            source: WeekSource::Fallback,
        }
    }
}

/// The week of the earliest game kicking off at or after `now`. Kickoffs are
/// Eastern wall-clock times. Bye entries and undated games are ignored. Without such a game (schedule not loaded,
/// season over) the estimate falls back to week 17.
pub fn detect_current_week(now: DateTime<Utc>, schedules: &[Schedule]) -> WeekEstimate {
    schedules
        .iter()
        .filter(|schedule| !schedule.is_bye() && schedule.week >= 1)
        .filter_map(|schedule| {
            let kickoff = eastern_to_utc(schedule.kickoff()?)?;
            (kickoff >= now).then_some((kickoff, schedule.week))
        })
        .min()
        .map(|(_, week)| WeekEstimate {
            week,
            source: WeekSource::Schedule,
        })
        .unwrap_or_else(WeekEstimate::fallback)
}
