use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::serde_util::naive_datetime::FORMAT;
use crate::models::{Schedule, Season};

impl Document for Schedule {
    const COLLECTION: &'static str = "schedules";

    fn natural_key(&self) -> String {
        self.game_key.clone()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<Schedule> {
    pub async fn by_game_key(&self, game_key: &str) -> Result<Option<Stored<Schedule>>, StoreError> {
        self.get_by_key(game_key).await
    }

    pub async fn filter(
        &self,
        team: Option<&str>,
        season: Option<i32>,
        week: Option<i32>,
        season_type: Option<i32>,
    ) -> Result<Vec<Stored<Schedule>>, StoreError> {
        let sql = self.select(
            "WHERE (?1 IS NULL OR json_extract(doc, '$.HomeTeam') = ?1
                               OR json_extract(doc, '$.AwayTeam') = ?1)
               AND (?2 IS NULL OR json_extract(doc, '$.Season') = ?2)
               AND (?3 IS NULL OR json_extract(doc, '$.Week') = ?3)
               AND (?4 IS NULL OR json_extract(doc, '$.SeasonType') = ?4)
             ORDER BY json_extract(doc, '$.Week'), json_extract(doc, '$.Date'), id",
        );
        self.fetch_all(
            sqlx::query_as(&sql)
                .bind(team)
                .bind(season)
                .bind(week)
                .bind(season_type),
        )
        .await
    }

    pub async fn by_team(&self, team: &str) -> Result<Vec<Stored<Schedule>>, StoreError> {
        self.filter(Some(team), None, None, None).await
    }

    pub async fn by_week(
        &self,
        season: i32,
        week: i32,
        season_type: Option<i32>,
    ) -> Result<Vec<Stored<Schedule>>, StoreError> {
        self.filter(None, Some(season), Some(week), season_type).await
    }

    /// Every schedule entry of one season phase.
    pub async fn by_season(&self, season: Season) -> Result<Vec<Stored<Schedule>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Season') = ?1
               AND json_extract(doc, '$.SeasonType') = ?2
             ORDER BY json_extract(doc, '$.Week'), json_extract(doc, '$.Date'), id",
        );
        self.fetch_all(sqlx::query_as(&sql).bind(season.year).bind(season.kind.code()))
            .await
    }

    /// The next `limit` games kicking off at or after `from`. Stored kickoffs
    /// are Eastern wall-clock times, so `from` is compared in that zone.
    pub async fn upcoming(
        &self,
        from: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Stored<Schedule>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Date') >= ?1
             ORDER BY json_extract(doc, '$.Date'), id
             LIMIT ?2",
        );
        let from = from.with_timezone(&New_York).naive_local().format(FORMAT).to_string();
        self.fetch_all(sqlx::query_as(&sql).bind(from).bind(limit))
            .await
    }
}
