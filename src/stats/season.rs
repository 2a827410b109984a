use std::collections::BTreeMap;

use super::{CollectedData, PlayerSeasonStats};
use crate::template::GameKind;

/// Folds collected match data into per-player season totals.
#[derive(Debug)]
pub struct SeasonStatsBuilder {
    season_id: String,
    players: BTreeMap<String, PlayerSeasonStats>,
}

impl SeasonStatsBuilder {
    pub fn new(season_id: &str) -> Self {
        Self {
            season_id: season_id.to_string(),
            players: BTreeMap::new(),
        }
    }

    pub fn apply(&mut self, data: &CollectedData) {
        let season_id = &self.season_id;
        let stats = self
            .players
            .entry(data.player_id().to_string())
            .or_insert_with(|| PlayerSeasonStats::new(data.player_id(), season_id));

        match data {
            CollectedData::GameOutcome {
                kind,
                won,
                legs_won,
                legs_lost,
                ..
            } => {
                stats.games_played += 1;
                stats.legs_won += u32::from(*legs_won);
                stats.legs_lost += u32::from(*legs_lost);
                if *won {
                    stats.games_won += 1;
                }
                if *kind == GameKind::Single {
                    stats.singles_played += 1;
                    stats.singles_legs_won += u32::from(*legs_won);
                    stats.singles_legs_lost += u32::from(*legs_lost);
                    if *won {
                        stats.singles_won += 1;
                    }
                }
            }
            CollectedData::Appearance { won_match, .. } => {
                stats.matches_played += 1;
                if *won_match {
                    stats.matches_won += 1;
                }
            }
            CollectedData::EventCounts { counts, .. } => {
                stats.high_95 += counts.high_95;
                stats.high_133 += counts.high_133;
                stats.high_170 += counts.high_170;
                stats.misses += counts.misses;
                stats.checkout_3 += counts.checkout_3;
                stats.checkout_4 += counts.checkout_4;
                stats.checkout_5 += counts.checkout_5;
                stats.checkout_6 += counts.checkout_6;
                stats.max_checkout = stats.max_checkout.max(counts.max_checkout);
            }
        }
    }

    pub fn extend<'a>(&mut self, data: impl IntoIterator<Item = &'a CollectedData>) {
        data.into_iter().for_each(|item| self.apply(item));
    }

    pub fn finish(self) -> Vec<PlayerSeasonStats> {
        self.players.into_values().collect()
    }
}
