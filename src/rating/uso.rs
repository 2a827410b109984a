use super::{fast_checkout_score, round_one_decimal, RatingFormula};
use crate::stats::PlayerSeasonStats;

pub const VERSION: u32 = 1;

pub const MATCH_WIN_WEIGHT: f64 = 35.0;
pub const LEG_WIN_WEIGHT: f64 = 35.0;
pub const HIGH_95_PER_LEG_WEIGHT: f64 = 15.0;
pub const HIGH_133_PER_LEG_WEIGHT: f64 = 30.0;
pub const HIGH_170_PER_LEG_WEIGHT: f64 = 80.0;
pub const FAST_CHECKOUT_PER_LEG_WEIGHT: f64 = 10.0;

pub fn uso_index(stats: &PlayerSeasonStats) -> f64 {
    round_one_decimal(
        MATCH_WIN_WEIGHT * stats.match_win_rate()
            + LEG_WIN_WEIGHT * stats.leg_win_rate()
            + HIGH_95_PER_LEG_WEIGHT * stats.per_singles_leg(f64::from(stats.high_95))
            + HIGH_133_PER_LEG_WEIGHT * stats.per_singles_leg(f64::from(stats.high_133))
            + HIGH_170_PER_LEG_WEIGHT * stats.per_singles_leg(f64::from(stats.high_170))
            + FAST_CHECKOUT_PER_LEG_WEIGHT * stats.per_singles_leg(fast_checkout_score(stats)),
    )
}

pub struct UsoIndex;

impl RatingFormula for UsoIndex {
    fn name(&self) -> &'static str {
        "uso_index"
    }

    fn version(&self) -> u32 {
        VERSION
    }

    fn score(&self, stats: &PlayerSeasonStats) -> f64 {
        uso_index(stats)
    }
}
