use chrono::{DateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::Standing;

impl Document for Standing {
    const COLLECTION: &'static str = "standings";

    /// `Season:SeasonType:Team`
    fn natural_key(&self) -> String {
        if self.team.is_empty() {
            return String::new();
        }
        format!("{}:{}:{}", self.season, self.season_type, self.team)
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<Standing> {
    pub async fn filter(
        &self,
        season: Option<i32>,
        conference: Option<&str>,
        division: Option<&str>,
    ) -> Result<Vec<Stored<Standing>>, StoreError> {
        let sql = self.select(
            "WHERE (?1 IS NULL OR json_extract(doc, '$.Season') = ?1)
               AND (?2 IS NULL OR json_extract(doc, '$.Conference') = ?2)
               AND (?3 IS NULL OR json_extract(doc, '$.Division') = ?3)
             ORDER BY json_extract(doc, '$.Season') DESC,
                      json_extract(doc, '$.Conference'),
                      json_extract(doc, '$.Division'),
                      json_extract(doc, '$.DivisionRank'),
                      id",
        );
        self.fetch_all(sqlx::query_as(&sql).bind(season).bind(conference).bind(division))
            .await
    }

    /// A team's standing for `season`, or for the most recent stored season.
    pub async fn by_team(
        &self,
        team: &str,
        season: Option<i32>,
    ) -> Result<Option<Stored<Standing>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Team') = ?1
               AND (?2 IS NULL OR json_extract(doc, '$.Season') = ?2)
             ORDER BY json_extract(doc, '$.Season') DESC, json_extract(doc, '$.SeasonType'), id
             LIMIT 1",
        );
        self.fetch_optional(sqlx::query_as(&sql).bind(team).bind(season))
            .await
    }
}
