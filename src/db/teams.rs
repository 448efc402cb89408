use chrono::{DateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::Team;

impl Document for Team {
    const COLLECTION: &'static str = "teams";

    fn natural_key(&self) -> String {
        self.team_id.to_string()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<Team> {
    pub async fn by_team_id(&self, team_id: i32) -> Result<Option<Stored<Team>>, StoreError> {
        self.get_by_key(&team_id.to_string()).await
    }

    /// Lookup by abbreviation (`KC`).
    pub async fn by_key(&self, key: &str) -> Result<Option<Stored<Team>>, StoreError> {
        let sql = self.select("WHERE json_extract(doc, '$.Key') = ?1");
        self.fetch_optional(sqlx::query_as(&sql).bind(key)).await
    }

    pub async fn by_division(
        &self,
        conference: Option<&str>,
        division: Option<&str>,
    ) -> Result<Vec<Stored<Team>>, StoreError> {
        let sql = self.select(
            "WHERE (?1 IS NULL OR json_extract(doc, '$.Conference') = ?1)
               AND (?2 IS NULL OR json_extract(doc, '$.Division') = ?2)
             ORDER BY json_extract(doc, '$.Key')",
        );
        self.fetch_all(sqlx::query_as(&sql).bind(conference).bind(division))
            .await
    }
}
