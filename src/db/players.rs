use chrono::{DateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::Player;

impl Document for Player {
    const COLLECTION: &'static str = "players";

    fn natural_key(&self) -> String {
        self.player_id.to_string()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<Player> {
    pub async fn by_player_id(&self, player_id: i32) -> Result<Option<Stored<Player>>, StoreError> {
        self.get_by_key(&player_id.to_string()).await
    }

    /// Players filtered by team abbreviation and/or position; `None` matches all.
    pub async fn filter(
        &self,
        team: Option<&str>,
        position: Option<&str>,
    ) -> Result<Vec<Stored<Player>>, StoreError> {
        let sql = self.select(
            "WHERE (?1 IS NULL OR json_extract(doc, '$.Team') = ?1)
               AND (?2 IS NULL OR json_extract(doc, '$.Position') = ?2)
             ORDER BY id",
        );
        self.fetch_all(sqlx::query_as(&sql).bind(team).bind(position))
            .await
    }
}
