pub mod bpi;
pub mod hsl;
pub mod uso;

pub use bpi::LegacyBpi;
pub use hsl::HslIndex;
pub use uso::UsoIndex;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::PlayerSeasonStats;

/// A pure, versioned scoring function over a player's season stats.
pub trait RatingFormula: Send + Sync {
    fn name(&self) -> &'static str;

    fn version(&self) -> u32;

    fn score(&self, stats: &PlayerSeasonStats) -> f64;
}

/// Every formula the league publishes, in display order
pub fn formulas() -> [&'static dyn RatingFormula; 3] {
    [&HslIndex, &LegacyBpi, &UsoIndex]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingScore {
    pub hsl_index: f64,
    pub legacy_bpi: f64,
    pub uso_index: f64,
}

impl RatingScore {
    pub fn from_stats(stats: &PlayerSeasonStats) -> Self {
        Self {
            hsl_index: HslIndex.score(stats),
            legacy_bpi: LegacyBpi.score(stats),
            uso_index: UsoIndex.score(stats),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub player_id: String,
    pub season_id: String,
    pub games_played: u32,
    #[serde(flatten)]
    pub rating: RatingScore,
    /// Formula name to the version its score was computed with
    pub formula_versions: BTreeMap<String, u32>,
}

impl PlayerRating {
    pub fn from_stats(stats: &PlayerSeasonStats) -> Self {
        Self {
            player_id: stats.player_id.clone(),
            season_id: stats.season_id.clone(),
            games_played: stats.games_played,
            rating: RatingScore::from_stats(stats),
            formula_versions: formulas()
                .iter()
                .map(|formula| (formula.name().to_string(), formula.version()))
                .collect(),
        }
    }
}

/// `numerator / denominator`, or 0 when nothing was played
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weighted fast-checkout count: quicker finishes are worth more
pub fn fast_checkout_score(stats: &PlayerSeasonStats) -> f64 {
    4.0 * f64::from(stats.checkout_3)
        + 2.0 * f64::from(stats.checkout_4)
        + f64::from(stats.checkout_5)
        + 0.5 * f64::from(stats.checkout_6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_nothing_is_zero() {
        assert_eq!(ratio(3.0, 0.0), 0.0);
        assert_eq!(ratio(3.0, 4.0), 0.75);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_one_decimal(58.46), 58.5);
        assert_eq!(round_one_decimal(66.0833), 66.1);
        assert_eq!(round_one_decimal(0.04), 0.0);
    }

    #[test]
    fn empty_stats_rate_zero_everywhere() {
        let stats = PlayerSeasonStats::new("p", "2025");
        assert_eq!(RatingScore::from_stats(&stats), RatingScore::default());
    }

    #[test]
    fn formulas_have_distinct_names() {
        let names: Vec<&str> = formulas().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["hsl_index", "legacy_bpi", "uso_index"]);
    }

    #[test]
    fn player_rating_flattens_scores() {
        let mut stats = PlayerSeasonStats::new("alice", "2025");
        stats.games_played = 20;
        let json = serde_json::to_value(PlayerRating::from_stats(&stats)).unwrap();

        assert_eq!(json["player_id"], "alice");
        assert_eq!(json["hsl_index"], 30.0);
        assert_eq!(json["legacy_bpi"], 0.0);
        assert_eq!(json["formula_versions"]["hsl_index"], 1);
        assert_eq!(json["formula_versions"]["uso_index"], 1);
    }
}
