use chrono::{DateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::{ByeWeek, Referee, Stadium};

impl Document for Stadium {
    const COLLECTION: &'static str = "stadiums";

    fn natural_key(&self) -> String {
        self.stadium_id.to_string()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<Stadium> {
    pub async fn by_stadium_id(&self, stadium_id: i32) -> Result<Option<Stored<Stadium>>, StoreError> {
        self.get_by_key(&stadium_id.to_string()).await
    }

    pub async fn by_name(&self, name: &str) -> Result<Option<Stored<Stadium>>, StoreError> {
        let sql = self.select("WHERE json_extract(doc, '$.Name') = ?1 ORDER BY id LIMIT 1");
        self.fetch_optional(sqlx::query_as(&sql).bind(name)).await
    }
}

impl Document for Referee {
    const COLLECTION: &'static str = "referees";

    fn natural_key(&self) -> String {
        self.referee_id.to_string()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<Referee> {
    pub async fn by_referee_id(&self, referee_id: i32) -> Result<Option<Stored<Referee>>, StoreError> {
        self.get_by_key(&referee_id.to_string()).await
    }

    pub async fn by_name(&self, name: &str) -> Result<Option<Stored<Referee>>, StoreError> {
        let sql = self.select("WHERE json_extract(doc, '$.Name') = ?1 ORDER BY id LIMIT 1");
        self.fetch_optional(sqlx::query_as(&sql).bind(name)).await
    }
}

impl Document for ByeWeek {
    const COLLECTION: &'static str = "bye_weeks";

    fn natural_key(&self) -> String {
        if self.team.is_empty() {
            return String::new();
        }
        ByeWeek::synthesize_id(self.season, self.week, &self.team)
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<ByeWeek> {
    /// Bye weeks of a season, optionally narrowed to one week.
    pub async fn by_season(&self, season: i32, week: Option<i32>) -> Result<Vec<Stored<ByeWeek>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Season') = ?1
               AND (?2 IS NULL OR json_extract(doc, '$.Week') = ?2)
             ORDER BY json_extract(doc, '$.Week'), json_extract(doc, '$.Team')",
        );
        self.fetch_all(sqlx::query_as(&sql).bind(season).bind(week))
            .await
    }

    pub async fn team_bye(&self, team: &str, season: i32) -> Result<Option<Stored<ByeWeek>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Team') = ?1 AND json_extract(doc, '$.Season') = ?2
             ORDER BY id LIMIT 1",
        );
        self.fetch_optional(sqlx::query_as(&sql).bind(team).bind(season))
            .await
    }
}
