use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::RecomputeSummary;
use crate::{
    rating::PlayerRating,
    shared::{AppError, AppState},
};

/// POST /seasons/{id}/recompute
#[instrument(name = "recompute_season", skip(state))]
pub async fn recompute_season(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> Result<Json<RecomputeSummary>, AppError> {
    let summary = state.stats_service.recompute_season(&season_id).await?;
    info!(
        season_id = %season_id,
        processed = summary.processed_matches,
        skipped = summary.skipped.len(),
        "Recompute requested over HTTP"
    );
    Ok(Json(summary))
}

/// GET /seasons/{season}/players/{player}/rating
pub async fn player_rating(
    State(state): State<AppState>,
    Path((season_id, player_id)): Path<(String, String)>,
) -> Result<Json<PlayerRating>, AppError> {
    state
        .stats_service
        .get_rating(&season_id, &player_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("no stats for {player_id} in season {season_id}"))
        })
}

/// GET /seasons/{id}/ratings
pub async fn season_ratings(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> Result<Json<Vec<PlayerRating>>, AppError> {
    Ok(Json(state.stats_service.season_ratings(&season_id).await?))
}
