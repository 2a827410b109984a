use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    matches::{GameResult, PlayerEventCounts},
    rating::ratio,
    template::GameKind,
};

/// Archive shape of a finalized match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedMatchRecord {
    pub match_id: String,
    pub season_id: String,
    pub home_team: String,
    pub away_team: String,
    pub results: Vec<GameResult>,
    pub events: Vec<PlayerEventCounts>,
    pub finalized_at: DateTime<Utc>,
}

/// Season aggregate for one player, rebuilt from archived matches on every recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeasonStats {
    pub player_id: String,
    pub season_id: String,
    pub matches_played: u32,
    pub matches_won: u32,
    pub games_played: u32,
    pub games_won: u32,
    pub singles_played: u32,
    pub singles_won: u32,
    pub legs_won: u32,
    pub legs_lost: u32,
    pub singles_legs_won: u32,
    pub singles_legs_lost: u32,
    pub high_95: u32,
    pub high_133: u32,
    pub high_170: u32,
    pub misses: u32,
    pub checkout_3: u32,
    pub checkout_4: u32,
    pub checkout_5: u32,
    pub checkout_6: u32,
    pub max_checkout: u32,
}

impl PlayerSeasonStats {
    pub fn new(player_id: &str, season_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            season_id: season_id.to_string(),
            ..Self::default()
        }
    }

    pub fn singles_legs(&self) -> u32 {
        self.singles_legs_won + self.singles_legs_lost
    }

    pub fn match_win_rate(&self) -> f64 {
        ratio(f64::from(self.matches_won), f64::from(self.matches_played))
    }

    pub fn game_win_rate(&self) -> f64 {
        ratio(f64::from(self.games_won), f64::from(self.games_played))
    }

    pub fn singles_win_rate(&self) -> f64 {
        ratio(f64::from(self.singles_won), f64::from(self.singles_played))
    }

    pub fn leg_win_rate(&self) -> f64 {
        ratio(
            f64::from(self.legs_won),
            f64::from(self.legs_won + self.legs_lost),
        )
    }

    pub fn singles_leg_win_rate(&self) -> f64 {
        ratio(f64::from(self.singles_legs_won), f64::from(self.singles_legs()))
    }

    /// Average of `value` over every singles leg played
    pub fn per_singles_leg(&self, value: f64) -> f64 {
        ratio(value, f64::from(self.singles_legs()))
    }
}

/// Facts extracted from one archived match, before they are folded into season stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectedData {
    GameOutcome {
        player_id: String,
        game_id: u8,
        kind: GameKind,
        won: bool,
        legs_won: u8,
        legs_lost: u8,
    },
    Appearance {
        player_id: String,
        won_match: bool,
    },
    EventCounts {
        player_id: String,
        counts: PlayerEventCounts,
    },
}

impl CollectedData {
    pub fn player_id(&self) -> &str {
        match self {
            CollectedData::GameOutcome { player_id, .. } => player_id,
            CollectedData::Appearance { player_id, .. } => player_id,
            CollectedData::EventCounts { player_id, .. } => player_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMatch {
    pub match_id: String,
    pub reason: String,
}

/// Outcome of rebuilding one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeSummary {
    pub season_id: String,
    pub processed_matches: usize,
    pub skipped: Vec<SkippedMatch>,
    pub players: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_zero_without_games() {
        let stats = PlayerSeasonStats::new("alice", "2025");
        assert_eq!(stats.match_win_rate(), 0.0);
        assert_eq!(stats.singles_leg_win_rate(), 0.0);
        assert_eq!(stats.per_singles_leg(4.0), 0.0);
    }

    #[test]
    fn leg_rates_use_won_and_lost_legs() {
        let mut stats = PlayerSeasonStats::new("alice", "2025");
        stats.legs_won = 6;
        stats.legs_lost = 2;
        stats.singles_legs_won = 3;
        stats.singles_legs_lost = 1;

        assert_eq!(stats.leg_win_rate(), 0.75);
        assert_eq!(stats.singles_leg_win_rate(), 0.75);
        assert_eq!(stats.per_singles_leg(2.0), 0.5);
    }
}
