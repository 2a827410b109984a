pub mod archive;
pub mod collectors;
pub mod handlers;
pub mod service;

mod errors;
pub mod models;
pub mod repository;
mod season;
mod validation;

pub use archive::{InMemoryMatchArchive, MatchArchive};
pub use errors::StatsError;
pub use handlers::{player_rating, recompute_season, season_ratings};
pub use models::*;
pub use repository::{InMemoryStatsRepository, StatsRepository};
pub use season::SeasonStatsBuilder;
pub use service::StatsService;
pub use validation::validate_record;

use async_trait::async_trait;

pub type CollectedDataBatch = Vec<CollectedData>;

/// Extracts one kind of fact from an archived match.
#[async_trait]
pub trait StatCollector: Send + Sync {
    async fn collect(&self, record: &CompletedMatchRecord) -> Result<CollectedDataBatch, StatsError>;
}
