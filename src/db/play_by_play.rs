use chrono::{DateTime, Utc};

use crate::db::{Collection, Document, StoreError, Stored};
use crate::models::{Play, PlayByPlay};

impl Document for PlayByPlay {
    const COLLECTION: &'static str = "play_by_play";

    fn natural_key(&self) -> String {
        self.game_key.clone()
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }
}

impl Collection<PlayByPlay> {
    pub async fn by_game_key(&self, game_key: &str) -> Result<Option<Stored<PlayByPlay>>, StoreError> {
        self.get_by_key(game_key).await
    }

    /// Scoring plays of one game in sequence order; `None` when the game is unknown.
    pub async fn scoring_plays(&self, game_key: &str) -> Result<Option<Vec<Play>>, StoreError> {
        let pbp = self.by_game_key(game_key).await?;
        Ok(pbp.map(|stored| stored.doc.scoring_plays().cloned().collect()))
    }

    /// Every stored play with a stat line for `player_id`, as `(GameKey, Play)`.
    pub async fn plays_involving(&self, player_id: i32) -> Result<Vec<(String, Play)>, StoreError> {
        let sql = self.select(
            "WHERE EXISTS (
                SELECT 1 FROM json_each(doc, '$.Plays') AS play,
                              json_each(play.value, '$.PlayStats') AS stat
                WHERE json_extract(stat.value, '$.PlayerID') = ?1
             )
             ORDER BY id",
        );
        let games = self.fetch_all(sqlx::query_as(&sql).bind(player_id)).await?;

        Ok(games
            .into_iter()
            .flat_map(|stored| {
                let PlayByPlay { game_key, plays, .. } = stored.doc;
                plays
                    .into_iter()
                    .filter(|play| play.involves(player_id))
                    .map(move |play| (game_key.clone(), play))
            })
            .collect())
    }
}
