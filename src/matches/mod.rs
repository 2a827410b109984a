// Public API - what other modules can use
pub use aggregator::{MatchAggregator, MatchPhase, PointsLabel, Tally, TeamPoints};
pub use errors::MatchError;
pub use events::{EventType, PlayerEventCounts, PlayerEventLedger, MAX_CHECKOUT};
pub use handlers::{
    assign_lineup, available_substitutes, create_match, finalize_match, get_template,
    match_status, record_game_result, record_player_event, substitute,
};
pub use recorder::{validate_legs, GameResult, Participants};
pub use repository::{InMemoryMatchRepository, MatchRepository};
pub use service::MatchService;
pub use state::{MatchCommand, MatchState, MatchStatus};

// Internal modules
mod aggregator;
mod errors;
mod events;
mod handlers;
mod recorder;
pub mod repository;
pub mod service;
mod state;
pub mod types;
