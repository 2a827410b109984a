use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{PlayerSeasonStats, StatsError};

/// Materialized season stats, replaced wholesale on every recompute
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn replace_season(
        &self,
        season_id: &str,
        stats: Vec<PlayerSeasonStats>,
    ) -> Result<(), StatsError>;
    async fn reset_season(&self, season_id: &str) -> Result<(), StatsError>;
    async fn get_player_stats(
        &self,
        season_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerSeasonStats>, StatsError>;
    async fn season_stats(&self, season_id: &str) -> Result<Vec<PlayerSeasonStats>, StatsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    seasons: Arc<RwLock<HashMap<String, BTreeMap<String, PlayerSeasonStats>>>>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    #[instrument(skip(self, stats), fields(players = stats.len()))]
    async fn replace_season(
        &self,
        season_id: &str,
        stats: Vec<PlayerSeasonStats>,
    ) -> Result<(), StatsError> {
        if let Some(stray) = stats.iter().find(|s| s.season_id != season_id) {
            return Err(StatsError::Validation(format!(
                "stats for {} belong to season {}",
                stray.player_id, stray.season_id
            )));
        }

        let rebuilt = stats
            .into_iter()
            .map(|s| (s.player_id.clone(), s))
            .collect();
        let mut seasons = self.seasons.write().await;
        seasons.insert(season_id.to_string(), rebuilt);
        debug!("Season stats replaced");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reset_season(&self, season_id: &str) -> Result<(), StatsError> {
        let mut seasons = self.seasons.write().await;
        seasons.remove(season_id);
        Ok(())
    }

    async fn get_player_stats(
        &self,
        season_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerSeasonStats>, StatsError> {
        let seasons = self.seasons.read().await;
        Ok(seasons
            .get(season_id)
            .and_then(|players| players.get(player_id))
            .cloned())
    }

    async fn season_stats(&self, season_id: &str) -> Result<Vec<PlayerSeasonStats>, StatsError> {
        let seasons = self.seasons.read().await;
        Ok(seasons
            .get(season_id)
            .map(|players| players.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(player: &str, games: u32) -> PlayerSeasonStats {
        PlayerSeasonStats {
            games_played: games,
            ..PlayerSeasonStats::new(player, "2025")
        }
    }

    #[tokio::test]
    async fn replace_overwrites_whole_season() {
        let repo = InMemoryStatsRepository::new();
        repo.replace_season("2025", vec![stats("alice", 4), stats("bob", 2)])
            .await
            .unwrap();
        repo.replace_season("2025", vec![stats("alice", 9)])
            .await
            .unwrap();

        let season = repo.season_stats("2025").await.unwrap();
        assert_eq!(season.len(), 1);
        assert_eq!(season[0].games_played, 9);
        assert!(repo.get_player_stats("2025", "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_stats_from_another_season() {
        let repo = InMemoryStatsRepository::new();
        let mut stray = stats("carol", 1);
        stray.season_id = "2024".to_string();

        let result = repo.replace_season("2025", vec![stray]).await;
        assert!(matches!(result, Err(StatsError::Validation(_))));
    }

    #[tokio::test]
    async fn reset_clears_season() {
        let repo = InMemoryStatsRepository::new();
        repo.replace_season("2025", vec![stats("alice", 4)])
            .await
            .unwrap();
        repo.reset_season("2025").await.unwrap();

        assert!(repo.season_stats("2025").await.unwrap().is_empty());
        assert!(repo.get_player_stats("2025", "alice").await.unwrap().is_none());
    }
}
