use async_trait::async_trait;

use super::super::{CollectedData, CompletedMatchRecord, StatCollector, StatsError};

/// Passes the singles event counters of every player through
pub struct EventCountsCollector;

impl Default for EventCountsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCountsCollector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatCollector for EventCountsCollector {
    async fn collect(&self, record: &CompletedMatchRecord) -> Result<Vec<CollectedData>, StatsError> {
        Ok(record
            .events
            .iter()
            .map(|counts| CollectedData::EventCounts {
                player_id: counts.player_id.clone(),
                counts: counts.clone(),
            })
            .collect())
    }
}
