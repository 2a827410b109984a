use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::{
    repository::MatchRepository, EventType, GameResult, MatchCommand, MatchError, MatchState,
    MatchStatus, PlayerEventCounts,
};
use crate::{
    lineup::{Position, Team},
    shared::AppError,
    stats::{MatchArchive, RecomputeSummary, StatsService},
    template::{self, MatchTemplateGame},
};

/// Entry point for everything that changes a match.
///
/// Writes to one match are serialized through a per-match lock; each write
/// loads the state, applies one command and saves the result.
pub struct MatchService {
    repository: Arc<dyn MatchRepository>,
    archive: Arc<dyn MatchArchive>,
    stats_service: Option<Arc<StatsService>>,
    recompute_on_finalize: bool,
    match_mutexes: Arc<RwLock<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl MatchService {
    pub fn new(repository: Arc<dyn MatchRepository>, archive: Arc<dyn MatchArchive>) -> Self {
        Self {
            repository,
            archive,
            stats_service: None,
            recompute_on_finalize: false,
            match_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_stats_service(
        mut self,
        stats_service: Arc<StatsService>,
        recompute_on_finalize: bool,
    ) -> Self {
        self.stats_service = Some(stats_service);
        self.recompute_on_finalize = recompute_on_finalize;
        self
    }

    pub fn template(&self, include_tiebreak: bool) -> Vec<&'static MatchTemplateGame> {
        template::games(include_tiebreak)
    }

    #[instrument(skip(self))]
    pub async fn create_match(
        &self,
        season_id: &str,
        home_team: &str,
        away_team: &str,
    ) -> Result<MatchState, AppError> {
        let fields = [
            ("season_id", season_id),
            ("home_team", home_team),
            ("away_team", away_team),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AppError::BadRequest(format!("{name} cannot be empty")));
        }

        let match_id = Uuid::new_v4().to_string();
        let state = MatchState::new(&match_id, season_id.trim(), home_team.trim(), away_team.trim());
        self.repository.create_match(&state).await?;

        info!(match_id = %match_id, season_id, "Match created");
        Ok(state)
    }

    pub async fn get_match(&self, match_id: &str) -> Result<MatchState, AppError> {
        self.repository
            .get_match(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("match {match_id} not found")))
    }

    #[instrument(skip(self))]
    pub async fn assign_lineup(
        &self,
        match_id: &str,
        team: Team,
        position: &str,
        player_id: &str,
    ) -> Result<Position, AppError> {
        let position = Position::parse_for(team, position)?;
        self.update(
            match_id,
            MatchCommand::AssignLineup {
                team,
                position,
                player_id: player_id.to_string(),
            },
        )
        .await?;
        Ok(position)
    }

    #[instrument(skip(self))]
    pub async fn substitute(
        &self,
        match_id: &str,
        team: Team,
        game_id: u8,
        from: &str,
        to: &str,
    ) -> Result<MatchState, AppError> {
        let from = Position::parse_for(team, from)?;
        let to = Position::parse_for(team, to)?;
        self.update(
            match_id,
            MatchCommand::Substitute {
                team,
                game_id,
                from,
                to,
            },
        )
        .await
    }

    pub async fn available_substitutes(
        &self,
        match_id: &str,
        team: Team,
        position: &str,
        game_id: u8,
    ) -> Result<(Position, Vec<Position>), AppError> {
        let position = Position::parse_for(team, position)?;
        let state = self.get_match(match_id).await?;
        Ok((position, state.available_substitutes(team, position, game_id)))
    }

    #[instrument(skip(self))]
    pub async fn record_game_result(
        &self,
        match_id: &str,
        game_id: u8,
        home_legs: u8,
        away_legs: u8,
    ) -> Result<GameResult, AppError> {
        let state = self
            .update(
                match_id,
                MatchCommand::RecordResult {
                    game_id,
                    home_legs,
                    away_legs,
                },
            )
            .await?;
        let result = state.result(game_id).cloned().ok_or(AppError::Internal)?;

        info!(
            match_id,
            game_id,
            winner = %result.winner,
            completed_games = state.results().len(),
            "Game result recorded"
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn record_player_event(
        &self,
        match_id: &str,
        game_id: u8,
        player_id: &str,
        event: EventType,
        delta: i64,
    ) -> Result<PlayerEventCounts, AppError> {
        let state = self
            .update(
                match_id,
                MatchCommand::RecordEvent {
                    game_id,
                    player_id: player_id.to_string(),
                    event,
                    delta,
                },
            )
            .await?;
        let player_id = player_id.trim();
        Ok(state
            .events()
            .get(game_id, player_id)
            .cloned()
            .unwrap_or_else(|| PlayerEventCounts::new(game_id, player_id)))
    }

    pub async fn match_status(&self, match_id: &str) -> Result<MatchStatus, AppError> {
        Ok(self.get_match(match_id).await?.status())
    }

    /// Freezes a decided match, archives it and, when enabled, rebuilds the season.
    #[instrument(skip(self))]
    pub async fn finalize_match(
        &self,
        match_id: &str,
    ) -> Result<(MatchStatus, Option<RecomputeSummary>), AppError> {
        if self.get_match(match_id).await?.is_finalized() {
            return Err(MatchError::MatchFinalized.into());
        }

        let state = {
            let match_lock = self.match_lock(match_id).await;
            let _guard = match_lock.lock().await;

            let current = self.get_match(match_id).await?;
            let next = current.apply(MatchCommand::Finalize { at: Utc::now() })?;
            let record = next.to_record().ok_or(AppError::Internal)?;

            self.archive.store(record).await?;
            self.repository.save_match(&next).await?;
            next
        };
        // A finalized match rejects every further write
        self.clear_match_lock(match_id).await;
        info!(match_id, season_id = %state.season_id, "Match finalized");

        let summary = match &self.stats_service {
            Some(stats) if self.recompute_on_finalize => {
                match stats.recompute_season(&state.season_id).await {
                    Ok(summary) => Some(summary),
                    Err(err) => {
                        error!(?err, season_id = %state.season_id, "Failed to recompute season after finalize");
                        None
                    }
                }
            }
            _ => None,
        };

        Ok((state.status(), summary))
    }

    async fn update(&self, match_id: &str, command: MatchCommand) -> Result<MatchState, AppError> {
        // Finalized is terminal, so it can be checked before taking the lock
        if self.get_match(match_id).await?.is_finalized() {
            return Err(MatchError::MatchFinalized.into());
        }

        let match_lock = self.match_lock(match_id).await;
        let _guard = match_lock.lock().await;

        let current = self.get_match(match_id).await?;
        let next = current.apply(command)?;
        self.repository.save_match(&next).await?;
        Ok(next)
    }

    async fn match_lock(&self, match_id: &str) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.match_mutexes.read().await;
            if let Some(lock) = guard.get(match_id) {
                return lock.clone();
            }
        }

        let mut guard = self.match_mutexes.write().await;
        guard
            .entry(match_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    async fn clear_match_lock(&self, match_id: &str) {
        let mut guard = self.match_mutexes.write().await;
        guard.remove(match_id);
    }
}
