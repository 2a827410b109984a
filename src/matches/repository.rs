use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::MatchState;
use crate::shared::AppError;

/// Storage for matches that are being entered
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create_match(&self, state: &MatchState) -> Result<(), AppError>;
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchState>, AppError>;
    async fn save_match(&self, state: &MatchState) -> Result<(), AppError>;
}

/// In-memory implementation of MatchRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    matches: Arc<RwLock<HashMap<String, MatchState>>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, state))]
    async fn create_match(&self, state: &MatchState) -> Result<(), AppError> {
        debug!(match_id = %state.match_id, season_id = %state.season_id, "Creating match in memory");

        let mut matches = self.matches.write().await;
        if matches.contains_key(&state.match_id) {
            warn!(match_id = %state.match_id, "Match already exists in memory");
            return Err(AppError::Conflict(format!(
                "match {} already exists",
                state.match_id
            )));
        }
        matches.insert(state.match_id.clone(), state.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchState>, AppError> {
        let matches = self.matches.read().await;
        let found = matches.get(match_id).cloned();
        if found.is_none() {
            debug!(match_id, "Match not found in memory");
        }
        Ok(found)
    }

    #[instrument(skip(self, state))]
    async fn save_match(&self, state: &MatchState) -> Result<(), AppError> {
        let mut matches = self.matches.write().await;
        match matches.get_mut(&state.match_id) {
            Some(existing) => {
                *existing = state.clone();
                debug!(match_id = %state.match_id, "Match saved in memory");
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "match {} not found",
                state.match_id
            ))),
        }
    }
}
