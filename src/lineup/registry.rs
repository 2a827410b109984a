use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::position::{Position, Team};
use crate::matches::MatchError;

/// Identifier of a rostered player, supplied by the surrounding CRUD layer
pub type PlayerId = String;

/// Which player sits in which position code, for both teams of one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupRegistry {
    assignments: BTreeMap<Position, PlayerId>,
}

impl LineupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(
        &mut self,
        team: Team,
        position: Position,
        player_id: &str,
    ) -> Result<(), MatchError> {
        if position.team() != team {
            return Err(MatchError::InvalidPosition(position.to_string()));
        }

        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(MatchError::EmptyPlayer);
        }

        if let Some(occupied) = self.position_of(team, player_id) {
            if occupied != position {
                return Err(MatchError::DuplicatePlayer {
                    player_id: player_id.to_string(),
                    position: occupied,
                });
            }
        }

        self.assignments.insert(position, player_id.to_string());
        Ok(())
    }

    pub fn unassign(&mut self, position: Position) -> Option<PlayerId> {
        self.assignments.remove(&position)
    }

    pub fn player_at(&self, position: Position) -> Option<&PlayerId> {
        self.assignments.get(&position)
    }

    pub fn position_of(&self, team: Team, player_id: &str) -> Option<Position> {
        self.assignments
            .iter()
            .find(|(position, assigned)| position.team() == team && assigned.as_str() == player_id)
            .map(|(position, _)| *position)
    }

    pub fn is_starting_lineup_complete(&self, team: Team) -> bool {
        let mut seen = HashSet::new();
        Position::starters(team).all(|position| match self.player_at(position) {
            Some(player_id) => !player_id.trim().is_empty() && seen.insert(player_id.as_str()),
            None => false,
        })
    }

    /// Bench positions of `team` that have a player behind them
    pub fn filled_bench(&self, team: Team) -> impl Iterator<Item = Position> + '_ {
        Position::bench(team).filter(|position| self.assignments.contains_key(position))
    }

    pub fn assignments(&self) -> &BTreeMap<Position, PlayerId> {
        &self.assignments
    }
}
