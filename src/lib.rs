// Library crate for the darts league server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod lineup;
pub mod matches;
pub mod rating;
pub mod shared;
pub mod stats;
pub mod substitution;
pub mod template;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use lineup::{Position, Team};
pub use matches::{MatchCommand, MatchError, MatchService, MatchState};
pub use rating::{PlayerRating, RatingScore};
pub use shared::{AppError, AppState};
pub use stats::{StatsError, StatsService};

/// Builds the HTTP router over the shared application state
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/template", get(matches::get_template))
        .route("/matches", post(matches::create_match))
        .route("/matches/:id/lineup", put(matches::assign_lineup))
        .route("/matches/:id/substitutions", post(matches::substitute))
        .route("/matches/:id/substitutes", get(matches::available_substitutes))
        .route("/matches/:id/games/:game_id", put(matches::record_game_result))
        .route("/matches/:id/events", post(matches::record_player_event))
        .route("/matches/:id/status", get(matches::match_status))
        .route("/matches/:id/finalize", post(matches::finalize_match))
        .route("/seasons/:id/recompute", post(stats::recompute_season))
        .route("/seasons/:id/ratings", get(stats::season_ratings))
        .route(
            "/seasons/:season/players/:player/rating",
            get(stats::player_rating),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
