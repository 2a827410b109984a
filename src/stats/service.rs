use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{info, instrument, warn};

use super::{
    archive::MatchArchive,
    collectors::{EventCountsCollector, GameOutcomeCollector, MatchAppearanceCollector},
    repository::StatsRepository,
    validate_record, CollectedData, CompletedMatchRecord, PlayerSeasonStats, RecomputeSummary,
    SeasonStatsBuilder, SkippedMatch, StatCollector, StatsError,
};
use crate::rating::PlayerRating;

pub struct StatsService {
    collectors: Vec<Arc<dyn StatCollector>>,
    repository: Arc<dyn StatsRepository>,
    archive: Arc<dyn MatchArchive>,
    season_mutexes: Arc<RwLock<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl StatsService {
    pub fn builder(
        repository: Arc<dyn StatsRepository>,
        archive: Arc<dyn MatchArchive>,
    ) -> StatsServiceBuilder {
        StatsServiceBuilder::new(repository, archive)
    }

    pub fn collectors(&self) -> Vec<Arc<dyn StatCollector>> {
        self.collectors.clone()
    }

    pub fn archive(&self) -> Arc<dyn MatchArchive> {
        Arc::clone(&self.archive)
    }

    /// Rebuilds every player's stats for a season from the archive.
    ///
    /// Malformed records are skipped and reported; everything else is folded
    /// into a fresh set of stats that replaces the season in one write.
    #[instrument(skip(self))]
    pub async fn recompute_season(&self, season_id: &str) -> Result<RecomputeSummary, StatsError> {
        let season_lock = self.season_lock(season_id).await;
        let _guard = season_lock.lock().await;

        let records = self.archive.season_records(season_id).await?;
        let mut builder = SeasonStatsBuilder::new(season_id);
        let mut processed_matches = 0;
        let mut skipped = Vec::new();

        for record in &records {
            match self.collect_record(record).await {
                Ok(collected) => {
                    builder.extend(&collected);
                    processed_matches += 1;
                }
                Err(err) => {
                    warn!(match_id = %record.match_id, %err, "Skipping malformed match record");
                    skipped.push(SkippedMatch {
                        match_id: record.match_id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let stats = builder.finish();
        let players = stats.len();
        self.repository.replace_season(season_id, stats).await?;

        info!(
            season_id,
            processed_matches,
            skipped = skipped.len(),
            players,
            "Season stats recomputed"
        );

        Ok(RecomputeSummary {
            season_id: season_id.to_string(),
            processed_matches,
            skipped,
            players,
        })
    }

    pub async fn get_player_stats(
        &self,
        season_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerSeasonStats>, StatsError> {
        self.repository.get_player_stats(season_id, player_id).await
    }

    pub async fn get_rating(
        &self,
        season_id: &str,
        player_id: &str,
    ) -> Result<Option<PlayerRating>, StatsError> {
        let stats = self.repository.get_player_stats(season_id, player_id).await?;
        Ok(stats.as_ref().map(PlayerRating::from_stats))
    }

    /// All rated players of a season, best HSL index first
    pub async fn season_ratings(&self, season_id: &str) -> Result<Vec<PlayerRating>, StatsError> {
        let mut ratings: Vec<PlayerRating> = self
            .repository
            .season_stats(season_id)
            .await?
            .iter()
            .map(PlayerRating::from_stats)
            .collect();
        ratings.sort_by(|a, b| {
            b.rating
                .hsl_index
                .total_cmp(&a.rating.hsl_index)
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        Ok(ratings)
    }

    pub async fn reset_season(&self, season_id: &str) -> Result<(), StatsError> {
        self.repository.reset_season(season_id).await?;
        self.clear_season_lock(season_id).await;
        Ok(())
    }

    /// Validates a record and runs every collector over it; nothing is kept
    /// from a record that fails any step.
    async fn collect_record(
        &self,
        record: &CompletedMatchRecord,
    ) -> Result<Vec<CollectedData>, StatsError> {
        validate_record(record)?;
        let mut collected = Vec::new();
        for collector in &self.collectors {
            collected.extend(collector.collect(record).await?);
        }
        Ok(collected)
    }

    async fn season_lock(&self, season_id: &str) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.season_mutexes.read().await;
            if let Some(lock) = guard.get(season_id) {
                return lock.clone();
            }
        }

        let mut guard = self.season_mutexes.write().await;
        guard
            .entry(season_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    async fn clear_season_lock(&self, season_id: &str) {
        let mut guard = self.season_mutexes.write().await;
        guard.remove(season_id);
    }
}

pub struct StatsServiceBuilder {
    collectors: Vec<Arc<dyn StatCollector>>,
    repository: Arc<dyn StatsRepository>,
    archive: Arc<dyn MatchArchive>,
}

impl StatsServiceBuilder {
    fn new(repository: Arc<dyn StatsRepository>, archive: Arc<dyn MatchArchive>) -> Self {
        Self {
            collectors: vec![
                Arc::new(GameOutcomeCollector::new()),
                Arc::new(MatchAppearanceCollector::new()),
                Arc::new(EventCountsCollector::new()),
            ],
            repository,
            archive,
        }
    }

    pub fn with_collector(mut self, collector: Arc<dyn StatCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    pub fn build(self) -> StatsService {
        StatsService {
            collectors: self.collectors,
            repository: self.repository,
            archive: self.archive,
            season_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
