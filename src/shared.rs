use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::matches::{MatchError, MatchService};
use crate::stats::{StatsError, StatsService};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub match_service: Arc<MatchService>,
    pub stats_service: Arc<StatsService>,
}

impl AppState {
    pub fn new(match_service: Arc<MatchService>, stats_service: Arc<StatsService>) -> Self {
        Self {
            match_service,
            stats_service,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Match(MatchError::MatchFinalized) => {
                (StatusCode::CONFLICT, MatchError::MatchFinalized.kind())
            }
            AppError::Match(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.kind()),
            AppError::Stats(StatsError::Validation(_)) => (StatusCode::BAD_REQUEST, "validation"),
            AppError::Stats(StatsError::MalformedRecord { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "malformed_record")
            }
            AppError::Stats(StatsError::Repository(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "repository")
            }
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::matches::{InMemoryMatchRepository, MatchRepository};
    use crate::stats::{InMemoryMatchArchive, InMemoryStatsRepository, MatchArchive, StatsRepository};

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        match_repository: Option<Arc<dyn MatchRepository>>,
        stats_repository: Option<Arc<dyn StatsRepository>>,
        archive: Option<Arc<dyn MatchArchive>>,
        recompute_on_finalize: bool,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                match_repository: None,
                stats_repository: None,
                archive: None,
                recompute_on_finalize: true,
            }
        }

        pub fn with_match_repository(mut self, repository: Arc<dyn MatchRepository>) -> Self {
            self.match_repository = Some(repository);
            self
        }

        pub fn with_stats_repository(mut self, repository: Arc<dyn StatsRepository>) -> Self {
            self.stats_repository = Some(repository);
            self
        }

        pub fn with_archive(mut self, archive: Arc<dyn MatchArchive>) -> Self {
            self.archive = Some(archive);
            self
        }

        pub fn with_recompute_on_finalize(mut self, enabled: bool) -> Self {
            self.recompute_on_finalize = enabled;
            self
        }

        pub fn build(self) -> AppState {
            let archive = self
                .archive
                .unwrap_or_else(|| Arc::new(InMemoryMatchArchive::new()));
            let stats_service = Arc::new(
                StatsService::builder(
                    self.stats_repository
                        .unwrap_or_else(|| Arc::new(InMemoryStatsRepository::new())),
                    Arc::clone(&archive),
                )
                .build(),
            );
            let match_service = Arc::new(
                MatchService::new(
                    self.match_repository
                        .unwrap_or_else(|| Arc::new(InMemoryMatchRepository::new())),
                    archive,
                )
                .with_stats_service(Arc::clone(&stats_service), self.recompute_on_finalize),
            );
            AppState::new(match_service, stats_service)
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
