use chrono::{DateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::{DepthChart, PlayerDepthStatus};

impl Document for DepthChart {
    const COLLECTION: &'static str = "depth_charts";

    fn natural_key(&self) -> String {
        self.team_id.to_string()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<DepthChart> {
    pub async fn by_team_id(&self, team_id: i32) -> Result<Option<Stored<DepthChart>>, StoreError> {
        self.get_by_key(&team_id.to_string()).await
    }

    pub async fn by_team(&self, team: &str) -> Result<Option<Stored<DepthChart>>, StoreError> {
        let sql = self.select("WHERE json_extract(doc, '$.Team') = ?1 ORDER BY id LIMIT 1");
        self.fetch_optional(sqlx::query_as(&sql).bind(team)).await
    }

    /// Every slot the player holds, across teams and units.
    pub async fn player_status(&self, player_id: i32) -> Result<Vec<PlayerDepthStatus>, StoreError> {
        let sql = self.select(
            "WHERE EXISTS (
                SELECT 1 FROM json_each(doc, '$.Offense') AS slot
                WHERE json_extract(slot.value, '$.PlayerID') = ?1
                UNION ALL
                SELECT 1 FROM json_each(doc, '$.Defense') AS slot
                WHERE json_extract(slot.value, '$.PlayerID') = ?1
                UNION ALL
                SELECT 1 FROM json_each(doc, '$.SpecialTeams') AS slot
                WHERE json_extract(slot.value, '$.PlayerID') = ?1
             )
             ORDER BY id",
        );
        let charts = self.fetch_all(sqlx::query_as(&sql).bind(player_id)).await?;
        Ok(charts
            .iter()
            .flat_map(|chart| chart.player_status(player_id))
            .collect())
    }
}
