use super::{round_one_decimal, RatingFormula};
use crate::stats::PlayerSeasonStats;

pub const VERSION: u32 = 1;

pub const SINGLES_WIN_WEIGHT: f64 = 60.0;

pub const HIGH_95_MAX_POINTS: f64 = 20.0;
pub const HIGH_95_SATURATION: u32 = 10;
pub const HIGH_133_MAX_POINTS: f64 = 10.0;
pub const HIGH_133_SATURATION: u32 = 5;
pub const HIGH_170_MAX_POINTS: f64 = 5.0;
pub const HIGH_170_SATURATION: u32 = 2;

pub const CHECKOUT_MAX_POINTS: f64 = 5.0;
pub const CHECKOUT_CEILING: f64 = 170.0;

/// Linear credit up to `saturation` occurrences, flat afterwards
fn capped(count: u32, saturation: u32, max_points: f64) -> f64 {
    f64::from(count.min(saturation)) / f64::from(saturation) * max_points
}

pub fn legacy_bpi(stats: &PlayerSeasonStats) -> f64 {
    let checkout = f64::from(stats.max_checkout).min(CHECKOUT_CEILING) / CHECKOUT_CEILING
        * CHECKOUT_MAX_POINTS;

    round_one_decimal(
        SINGLES_WIN_WEIGHT * stats.singles_win_rate()
            + capped(stats.high_95, HIGH_95_SATURATION, HIGH_95_MAX_POINTS)
            + capped(stats.high_133, HIGH_133_SATURATION, HIGH_133_MAX_POINTS)
            + capped(stats.high_170, HIGH_170_SATURATION, HIGH_170_MAX_POINTS)
            + checkout,
    )
}

pub struct LegacyBpi;

impl RatingFormula for LegacyBpi {
    fn name(&self) -> &'static str {
        "legacy_bpi"
    }

    fn version(&self) -> u32 {
        VERSION
    }

    fn score(&self, stats: &PlayerSeasonStats) -> f64 {
        legacy_bpi(stats)
    }
}
