use super::{fast_checkout_score, round_one_decimal, RatingFormula};
use crate::stats::PlayerSeasonStats;

pub const VERSION: u32 = 1;

pub const SINGLES_WIN_WEIGHT: f64 = 40.0;
pub const SINGLES_LEG_WIN_WEIGHT: f64 = 80.0;
pub const OVERALL_WIN_WEIGHT: f64 = 20.0;
pub const HIGH_95_PER_LEG_WEIGHT: f64 = 30.0;
pub const HIGH_133_PER_LEG_WEIGHT: f64 = 60.0;
pub const HIGH_170_PER_LEG_WEIGHT: f64 = 150.0;
pub const FAST_CHECKOUT_PER_LEG_WEIGHT: f64 = 25.0;
pub const MISS_PER_LEG_PENALTY: f64 = 30.0;

/// Games after which a rating is fully trusted, and the head start before that
pub const RELIABILITY_GAMES: f64 = 60.0;
pub const RELIABILITY_OFFSET: f64 = 10.0;

/// Attendance credit per game played, the lowest score an active player gets
pub const FLOOR_PER_GAME: f64 = 1.5;

pub fn reliability(games_played: u32) -> f64 {
    ((f64::from(games_played) + RELIABILITY_OFFSET) / RELIABILITY_GAMES).min(1.0)
}

pub fn hsl_index(stats: &PlayerSeasonStats) -> f64 {
    let weighted = SINGLES_WIN_WEIGHT * stats.singles_win_rate()
        + SINGLES_LEG_WIN_WEIGHT * stats.singles_leg_win_rate()
        + OVERALL_WIN_WEIGHT * stats.game_win_rate()
        + HIGH_95_PER_LEG_WEIGHT * stats.per_singles_leg(f64::from(stats.high_95))
        + HIGH_133_PER_LEG_WEIGHT * stats.per_singles_leg(f64::from(stats.high_133))
        + HIGH_170_PER_LEG_WEIGHT * stats.per_singles_leg(f64::from(stats.high_170))
        + FAST_CHECKOUT_PER_LEG_WEIGHT * stats.per_singles_leg(fast_checkout_score(stats))
        - MISS_PER_LEG_PENALTY * stats.per_singles_leg(f64::from(stats.misses));

    let floor = (f64::from(stats.games_played) * FLOOR_PER_GAME).max(0.0);
    round_one_decimal((weighted * reliability(stats.games_played)).max(floor))
}

pub struct HslIndex;

impl RatingFormula for HslIndex {
    fn name(&self) -> &'static str {
        "hsl_index"
    }

    fn version(&self) -> u32 {
        VERSION
    }

    fn score(&self, stats: &PlayerSeasonStats) -> f64 {
        hsl_index(stats)
    }
}
