pub use appearance::MatchAppearanceCollector;
pub use event_counts::EventCountsCollector;
pub use game_outcome::GameOutcomeCollector;

mod appearance;
mod event_counts;
mod game_outcome;
