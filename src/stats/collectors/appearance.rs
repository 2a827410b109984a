use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use super::super::{CollectedData, CompletedMatchRecord, StatCollector, StatsError};
use crate::{lineup::Team, matches::MatchAggregator};

/// One entry per player who took part in the match, with the match outcome
pub struct MatchAppearanceCollector;

impl Default for MatchAppearanceCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchAppearanceCollector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatCollector for MatchAppearanceCollector {
    async fn collect(&self, record: &CompletedMatchRecord) -> Result<Vec<CollectedData>, StatsError> {
        let results: BTreeMap<_, _> = record
            .results
            .iter()
            .map(|result| (result.game_id, result.clone()))
            .collect();
        let tally = MatchAggregator::new(&results).tally();
        if tally.is_tied() {
            return Err(StatsError::malformed(&record.match_id, "match has no winner"));
        }
        let winner = if tally.home > tally.away {
            Team::Home
        } else {
            Team::Away
        };

        let mut data = Vec::new();
        for team in [Team::Home, Team::Away] {
            let players: BTreeSet<&String> = record
                .results
                .iter()
                .flat_map(|result| result.participants.side(team))
                .collect();
            data.extend(players.into_iter().map(|player_id| CollectedData::Appearance {
                player_id: player_id.clone(),
                won_match: team == winner,
            }));
        }

        Ok(data)
    }
}
