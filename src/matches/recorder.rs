use serde::{Deserialize, Serialize};

use super::MatchError;
use crate::{
    lineup::{LineupRegistry, PlayerId, Team},
    substitution::SubstitutionLedger,
    template::{GameFormat, MatchTemplateGame},
};

/// Players who actually stood at the oche for each side of one game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participants {
    pub home: Vec<PlayerId>,
    pub away: Vec<PlayerId>,
}

impl Participants {
    pub fn side(&self, team: Team) -> &[PlayerId] {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    pub fn contains(&self, team: Team, player_id: &str) -> bool {
        self.side(team).iter().any(|p| p == player_id)
    }

    pub fn team_of(&self, player_id: &str) -> Option<Team> {
        [Team::Home, Team::Away]
            .into_iter()
            .find(|team| self.contains(*team, player_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: u8,
    pub home_legs: u8,
    pub away_legs: u8,
    pub winner: Team,
    pub participants: Participants,
}

impl GameResult {
    pub fn legs(&self, team: Team) -> u8 {
        match team {
            Team::Home => self.home_legs,
            Team::Away => self.away_legs,
        }
    }
}

/// Checks a leg score against the game's format and returns the winning side.
///
/// Each side is bounded by the format's legs-to-win; exactly one side must
/// reach it.
pub fn validate_legs(format: GameFormat, home_legs: u8, away_legs: u8) -> Result<Team, MatchError> {
    let target = format.legs_to_win();

    if home_legs > target || away_legs > target {
        return Err(MatchError::InvalidScore {
            home_legs,
            away_legs,
        });
    }

    match (home_legs == target, away_legs == target) {
        (true, false) => Ok(Team::Home),
        (false, true) => Ok(Team::Away),
        (true, true) => Err(MatchError::InvalidScore {
            home_legs,
            away_legs,
        }),
        (false, false) => Err(MatchError::AmbiguousResult {
            home_legs,
            away_legs,
        }),
    }
}

/// Validates the score and snapshots who played, following that game's substitutions.
pub fn build_result(
    game: &MatchTemplateGame,
    lineup: &LineupRegistry,
    substitutions: &SubstitutionLedger,
    home_legs: u8,
    away_legs: u8,
) -> Result<GameResult, MatchError> {
    let winner = validate_legs(game.format, home_legs, away_legs)?;

    let resolve = |team: Team| -> Result<Vec<PlayerId>, MatchError> {
        game.positions(team)
            .iter()
            .map(|position| {
                substitutions
                    .resolve_player(lineup, team, *position, game.id)
                    .cloned()
                    .ok_or(MatchError::IncompleteLineup(team))
            })
            .collect()
    };

    Ok(GameResult {
        game_id: game.id,
        home_legs,
        away_legs,
        winner,
        participants: Participants {
            home: resolve(Team::Home)?,
            away: resolve(Team::Away)?,
        },
    })
}
