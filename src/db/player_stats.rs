use chrono::{DateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::{PlayerGameStats, StatField};

impl Document for PlayerGameStats {
    const COLLECTION: &'static str = "player_game_stats";

    fn natural_key(&self) -> String {
        self.player_game_id.to_string()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<PlayerGameStats> {
    pub async fn by_player_game_id(
        &self,
        player_game_id: i32,
    ) -> Result<Option<Stored<PlayerGameStats>>, StoreError> {
        self.get_by_key(&player_game_id.to_string()).await
    }

    pub async fn by_player_and_game(
        &self,
        player_id: i32,
        game_key: &str,
    ) -> Result<Option<Stored<PlayerGameStats>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.PlayerID') = ?1 AND json_extract(doc, '$.GameKey') = ?2",
        );
        self.fetch_optional(sqlx::query_as(&sql).bind(player_id).bind(game_key))
            .await
    }

    pub async fn by_game(&self, game_key: &str) -> Result<Vec<Stored<PlayerGameStats>>, StoreError> {
        let sql = self.select("WHERE json_extract(doc, '$.GameKey') = ?1 ORDER BY id");
        self.fetch_all(sqlx::query_as(&sql).bind(game_key)).await
    }

    pub async fn by_player_season(
        &self,
        player_id: i32,
        season: i32,
    ) -> Result<Vec<Stored<PlayerGameStats>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.PlayerID') = ?1 AND json_extract(doc, '$.Season') = ?2
             ORDER BY json_extract(doc, '$.SeasonType'), json_extract(doc, '$.Week')",
        );
        self.fetch_all(sqlx::query_as(&sql).bind(player_id).bind(season))
            .await
    }

    pub async fn by_team_week(
        &self,
        team: &str,
        season: i32,
        week: i32,
    ) -> Result<Vec<Stored<PlayerGameStats>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Team') = ?1
               AND json_extract(doc, '$.Season') = ?2
               AND json_extract(doc, '$.Week') = ?3
             ORDER BY id",
        );
        self.fetch_all(sqlx::query_as(&sql).bind(team).bind(season).bind(week))
            .await
    }

    /// Leaders for one week ranked by `stat`, highest first. Rows without the
    /// stat are excluded.
    pub async fn top(
        &self,
        season: i32,
        week: i32,
        stat: StatField,
        limit: i64,
    ) -> Result<Vec<Stored<PlayerGameStats>>, StoreError> {
        let sql = self.select(
            "WHERE json_extract(doc, '$.Season') = ?1
               AND json_extract(doc, '$.Week') = ?2
               AND json_extract(doc, ?3) IS NOT NULL
             ORDER BY json_extract(doc, ?3) DESC, id
             LIMIT ?4",
        );
        self.fetch_all(
            sqlx::query_as(&sql)
                .bind(season)
                .bind(week)
                .bind(stat.json_path())
                .bind(limit),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, Stores};

    fn line(player_game_id: i32, player_id: i32, week: i32, yards: Option<f64>) -> PlayerGameStats {
        serde_json::from_value(serde_json::json!({
            "PlayerGameID": player_game_id,
            "PlayerID": player_id,
            "GameKey": format!("2023101{week:02}"),
            "SeasonType": 1,
            "Season": 2023,
            "Week": week,
            "Team": "KC",
            "RushingYards": yards,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_top_ranks_by_stat_and_skips_missing() {
        let db = Database::in_memory().await.unwrap();
        let stores = Stores::new(&db);

        let outcome = stores
            .player_stats
            .upsert_many(vec![
                line(1, 10, 1, Some(45.0)),
                line(2, 11, 1, Some(112.0)),
                line(3, 12, 1, None),
                line(4, 13, 1, Some(78.0)),
                line(5, 10, 2, Some(200.0)),
            ])
            .await;
        assert_eq!(outcome.created, 5);

        let top = stores
            .player_stats
            .top(2023, 1, StatField::RushingYards, 2)
            .await
            .unwrap();
        let ids: Vec<i32> = top.iter().map(|s| s.player_id).collect();
        assert_eq!(ids, vec![11, 13]);

        let season = stores.player_stats.by_player_season(10, 2023).await.unwrap();
        assert_eq!(season.len(), 2);
        assert_eq!(season[0].week, 1);
    }
}
