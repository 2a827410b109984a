use async_trait::async_trait;

use super::super::{CollectedData, CompletedMatchRecord, StatCollector, StatsError};
use crate::{lineup::Team, template};

/// One entry per player per game: won or lost, and the legs on each side
pub struct GameOutcomeCollector;

impl Default for GameOutcomeCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl GameOutcomeCollector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatCollector for GameOutcomeCollector {
    async fn collect(&self, record: &CompletedMatchRecord) -> Result<Vec<CollectedData>, StatsError> {
        let mut data = Vec::new();

        for result in &record.results {
            let game = template::game(result.game_id).ok_or_else(|| {
                StatsError::malformed(&record.match_id, format!("unknown game {}", result.game_id))
            })?;

            for team in [Team::Home, Team::Away] {
                let legs_won = result.legs(team);
                let legs_lost = result.legs(team.opponent());
                data.extend(result.participants.side(team).iter().map(|player_id| {
                    CollectedData::GameOutcome {
                        player_id: player_id.clone(),
                        game_id: result.game_id,
                        kind: game.kind,
                        won: result.winner == team,
                        legs_won,
                        legs_lost,
                    }
                }));
            }
        }

        Ok(data)
    }
}
