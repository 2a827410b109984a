use std::sync::Arc;

use darts_league::{
    app,
    matches::InMemoryMatchRepository,
    stats::{InMemoryMatchArchive, InMemoryStatsRepository},
    AppState, MatchService, StatsService,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub match_service: Arc<MatchService>,
    pub stats_service: Arc<StatsService>,
    pub archive: Arc<InMemoryMatchArchive>,
    pub season_id: String,
}

impl TestSetup {
    pub fn router(&self) -> axum::Router {
        app(AppState::new(
            self.match_service.clone(),
            self.stats_service.clone(),
        ))
    }
}

pub struct TestSetupBuilder {
    season_id: String,
    recompute_on_finalize: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            season_id: "2025".to_string(),
            recompute_on_finalize: true,
        }
    }

    #[allow(dead_code)]
    pub fn with_season(mut self, season_id: &str) -> Self {
        self.season_id = season_id.to_string();
        self
    }

    #[allow(dead_code)]
    pub fn without_recompute_on_finalize(mut self) -> Self {
        self.recompute_on_finalize = false;
        self
    }

    pub fn build(self) -> TestSetup {
        let archive = Arc::new(InMemoryMatchArchive::new());
        let stats_service = Arc::new(
            StatsService::builder(Arc::new(InMemoryStatsRepository::new()), archive.clone())
                .build(),
        );
        let match_service = Arc::new(
            MatchService::new(Arc::new(InMemoryMatchRepository::new()), archive.clone())
                .with_stats_service(stats_service.clone(), self.recompute_on_finalize),
        );

        TestSetup {
            match_service,
            stats_service,
            archive,
            season_id: self.season_id,
        }
    }
}
