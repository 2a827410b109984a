use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{CompletedMatchRecord, StatsError};

/// Historical record store of finalized matches
#[async_trait]
pub trait MatchArchive: Send + Sync {
    /// Stores a record, replacing any earlier record of the same match.
    async fn store(&self, record: CompletedMatchRecord) -> Result<(), StatsError>;
    async fn season_records(&self, season_id: &str) -> Result<Vec<CompletedMatchRecord>, StatsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryMatchArchive {
    records: Arc<RwLock<HashMap<String, CompletedMatchRecord>>>,
}

impl InMemoryMatchArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchArchive for InMemoryMatchArchive {
    #[instrument(skip(self, record), fields(match_id = %record.match_id))]
    async fn store(&self, record: CompletedMatchRecord) -> Result<(), StatsError> {
        let mut records = self.records.write().await;
        debug!(season_id = %record.season_id, "Archiving completed match");
        records.insert(record.match_id.clone(), record);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn season_records(&self, season_id: &str) -> Result<Vec<CompletedMatchRecord>, StatsError> {
        let records = self.records.read().await;
        let mut season: Vec<CompletedMatchRecord> = records
            .values()
            .filter(|record| record.season_id == season_id)
            .cloned()
            .collect();
        season.sort_by(|a, b| {
            a.finalized_at
                .cmp(&b.finalized_at)
                .then_with(|| a.match_id.cmp(&b.match_id))
        });
        debug!(count = season.len(), "Loaded season records");
        Ok(season)
    }
}
