use chrono::{DateTime, NaiveDateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::serde_util::naive_datetime::FORMAT;
use crate::models::Game;

impl Document for Game {
    const COLLECTION: &'static str = "games";

    fn natural_key(&self) -> String {
        self.game_key.clone()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<Game> {
    pub async fn by_game_key(&self, game_key: &str) -> Result<Option<Stored<Game>>, StoreError> {
        self.get_by_key(game_key).await
    }

    /// Games filtered by team (home or away), season, week and numeric
    /// `SeasonType`; `None` matches all.
    pub async fn filter(
        &self,
        team: Option<&str>,
        season: Option<i32>,
        week: Option<i32>,
        season_type: Option<i32>,
    ) -> Result<Vec<Stored<Game>>, StoreError> {
        let sql = self.select(
            "WHERE (?1 IS NULL OR json_extract(doc, '$.HomeTeam') = ?1
                               OR json_extract(doc, '$.AwayTeam') = ?1)
               AND (?2 IS NULL OR json_extract(doc, '$.Season') = ?2)
               AND (?3 IS NULL OR json_extract(doc, '$.Week') = ?3)
               AND (?4 IS NULL OR json_extract(doc, '$.SeasonType') = ?4)
             ORDER BY json_extract(doc, '$.Date'), id",
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

    pub async fn by_team(&self, team: &str, season: Option<i32>) -> Result<Vec<Stored<Game>>, StoreError> {
        self.filter(Some(team), season, None, None).await
    }

    pub async fn by_week(
        &self,
        season: i32,
        week: i32,
        season_type: Option<i32>,
    ) -> Result<Vec<Stored<Game>>, StoreError> {
        self.filter(None, Some(season), Some(week), season_type).await
    }

    pub async fn live(&self) -> Result<Vec<Stored<Game>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Status') = 'InProgress'
                OR json_extract(doc, '$.IsInProgress') = 1
             ORDER BY json_extract(doc, '$.Date'), id",
        );
        self.fetch_all(sqlx::query_as(&sql)).await
    }

    /// Games kicking off in `[from, to]`.
    pub async fn by_date_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Stored<Game>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Date') >= ?1 AND json_extract(doc, '$.Date') <= ?2
             ORDER BY json_extract(doc, '$.Date'), id",
        );
        let from = from.format(FORMAT).to_string();
        let to = to.format(FORMAT).to_string();
        self.fetch_all(sqlx::query_as(&sql).bind(from).bind(to)).await
    }
}
