use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    lineup::{LineupRegistry, PlayerId, Position, Team},
    matches::MatchError,
    template,
};

/// One active replacement: `to` plays instead of `from` in `game_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub game_id: u8,
    pub from: Position,
    pub to: Position,
}

/// Per-match record of substitutions and the pairing locks they create.
///
/// Once a starter has been replaced by a bench player in any game other than
/// the triple, the two positions are bonded for the rest of the match: neither
/// may be paired with a third position until the substitution is reverted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionLedger {
    active: Vec<Substitution>,
    locks: BTreeMap<Position, Position>,
}

impl SubstitutionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player filling `position` in `game_id`, after applying that game's substitutions.
    pub fn resolve_player<'a>(
        &self,
        lineup: &'a LineupRegistry,
        team: Team,
        position: Position,
        game_id: u8,
    ) -> Option<&'a PlayerId> {
        if position.team() != team {
            return None;
        }
        let effective = self.replacement(game_id, position).unwrap_or(position);
        lineup.player_at(effective)
    }

    /// Replaces `from` with `to` for one game. Passing `to == from` reverts.
    pub fn substitute(
        &mut self,
        lineup: &LineupRegistry,
        team: Team,
        game_id: u8,
        from: Position,
        to: Position,
    ) -> Result<(), MatchError> {
        let game = template::game(game_id).ok_or(MatchError::UnknownGame(game_id))?;

        for position in [from, to] {
            if position.team() != team {
                return Err(MatchError::InvalidPosition(position.to_string()));
            }
        }

        if !game.is_played_by(from) {
            return Err(MatchError::PositionNotPlaying {
                game_id,
                position: from,
            });
        }

        let unrestricted = game.kind.allows_unrestricted_substitution();

        if from == to {
            self.revert(game_id, from, unrestricted);
            return Ok(());
        }

        if !to.is_bench() {
            return Err(MatchError::NotABenchPosition(to));
        }
        let player_id = lineup.player_at(to).ok_or(MatchError::PositionVacant(to))?;

        if let Some(other) = self
            .active
            .iter()
            .find(|sub| sub.game_id == game_id && sub.to == to && sub.from != from)
        {
            return Err(MatchError::DuplicatePlayer {
                player_id: player_id.clone(),
                position: other.from,
            });
        }

        if !unrestricted {
            self.check_lock(from, to)?;
            self.check_lock(to, from)?;
            self.locks.insert(from, to);
            self.locks.insert(to, from);
        }

        match self
            .active
            .iter_mut()
            .find(|sub| sub.game_id == game_id && sub.from == from)
        {
            Some(existing) => existing.to = to,
            None => self.active.push(Substitution { game_id, from, to }),
        }

        Ok(())
    }

    /// Positions that may currently stand in for `position` in `game_id`.
    pub fn available_substitutes(
        &self,
        lineup: &LineupRegistry,
        team: Team,
        position: Position,
        game_id: u8,
    ) -> Vec<Position> {
        let Some(game) = template::game(game_id) else {
            return Vec::new();
        };
        if position.team() != team {
            return Vec::new();
        }

        if game.kind.allows_unrestricted_substitution() {
            return lineup
                .filled_bench(team)
                .filter(|bench| {
                    !self
                        .active
                        .iter()
                        .any(|sub| sub.game_id == game_id && sub.to == *bench && sub.from != position)
                })
                .collect();
        }

        if let Some(partner) = self.locks.get(&position) {
            return vec![*partner];
        }

        lineup
            .filled_bench(team)
            .filter(|bench| !self.locks.contains_key(bench))
            .collect()
    }

    pub fn locked_partner(&self, position: Position) -> Option<Position> {
        self.locks.get(&position).copied()
    }

    pub fn replacement(&self, game_id: u8, position: Position) -> Option<Position> {
        self.active
            .iter()
            .find(|sub| sub.game_id == game_id && sub.from == position)
            .map(|sub| sub.to)
    }

    pub fn active(&self) -> &[Substitution] {
        &self.active
    }

    fn check_lock(&self, position: Position, wanted: Position) -> Result<(), MatchError> {
        match self.locks.get(&position) {
            Some(partner) if *partner != wanted => Err(MatchError::PairingLocked {
                position,
                partner: *partner,
            }),
            _ => Ok(()),
        }
    }

    fn revert(&mut self, game_id: u8, position: Position, unrestricted: bool) {
        self.active
            .retain(|sub| !(sub.game_id == game_id && sub.from == position));

        // Triple substitutions never created a lock, so they must not clear one.
        if unrestricted {
            return;
        }
        let Some(partner) = self.locks.get(&position).copied() else {
            return;
        };
        // The pair stays bonded while another restricted game still uses it.
        let still_paired = self.active.iter().any(|sub| {
            sub.from == position
                && sub.to == partner
                && template::game(sub.game_id)
                    .is_some_and(|game| !game.kind.allows_unrestricted_substitution())
        });
        if !still_paired {
            self.locks.remove(&position);
            self.locks.remove(&partner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::position::{D1, D2, D3, D4, D5, D6, H1, H4};

    fn lineup() -> LineupRegistry {
        let mut lineup = LineupRegistry::new();
        for (position, player) in [
            (D1, "d1"),
            (D2, "d2"),
            (D3, "d3"),
            (D4, "d4"),
            (D5, "d5"),
            (D6, "d6"),
        ] {
            lineup.assign(Team::Away, position, player).unwrap();
        }
        lineup.assign(Team::Home, H1, "h1").unwrap();
        lineup
    }

    #[test]
    fn resolves_base_assignment_without_substitution() {
        let lineup = lineup();
        let ledger = SubstitutionLedger::new();
        assert_eq!(
            ledger.resolve_player(&lineup, Team::Away, D3, 1).map(String::as_str),
            Some("d3")
        );
    }

    #[test]
    fn resolves_substitute_only_for_that_game() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();
        ledger.substitute(&lineup, Team::Away, 1, D3, D5).unwrap();

        assert_eq!(
            ledger.resolve_player(&lineup, Team::Away, D3, 1).map(String::as_str),
            Some("d5")
        );
        assert_eq!(
            ledger.resolve_player(&lineup, Team::Away, D3, 6).map(String::as_str),
            Some("d3")
        );
    }

    #[test]
    fn rejects_position_that_does_not_play_the_game() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();
        // Game 1 is H1 vs D3
        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 1, D1, D4),
            Err(MatchError::PositionNotPlaying {
                game_id: 1,
                position: D1
            })
        );
    }

    #[test]
    fn locked_pair_blocks_third_position_until_reverted() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();

        ledger.substitute(&lineup, Team::Away, 1, D3, D5).unwrap();
        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 6, D3, D6),
            Err(MatchError::PairingLocked {
                position: D3,
                partner: D5
            })
        );

        ledger.substitute(&lineup, Team::Away, 1, D3, D3).unwrap();
        assert!(ledger.substitute(&lineup, Team::Away, 6, D3, D6).is_ok());
        assert_eq!(ledger.locked_partner(D3), Some(D6));
        assert_eq!(ledger.locked_partner(D5), None);
    }

    #[test]
    fn revert_keeps_lock_while_pair_active_in_another_game() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();

        ledger.substitute(&lineup, Team::Away, 1, D3, D5).unwrap();
        ledger.substitute(&lineup, Team::Away, 6, D3, D5).unwrap();
        ledger.substitute(&lineup, Team::Away, 1, D3, D3).unwrap();

        assert_eq!(ledger.replacement(1, D3), None);
        assert_eq!(ledger.replacement(6, D3), Some(D5));
        assert_eq!(ledger.locked_partner(D3), Some(D5));
        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 10, D3, D6),
            Err(MatchError::PairingLocked {
                position: D3,
                partner: D5
            })
        );

        ledger.substitute(&lineup, Team::Away, 6, D3, D3).unwrap();
        assert_eq!(ledger.locked_partner(D3), None);
        assert!(ledger.substitute(&lineup, Team::Away, 10, D3, D6).is_ok());
    }

    #[test]
    fn bench_player_bonded_to_one_starter() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();

        ledger.substitute(&lineup, Team::Away, 1, D3, D5).unwrap();
        // Game 2 is H2 vs D1: D5 is already bonded to D3
        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 2, D1, D5),
            Err(MatchError::PairingLocked {
                position: D5,
                partner: D3
            })
        );
    }

    #[test]
    fn same_pair_may_repeat_in_later_games() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();

        ledger.substitute(&lineup, Team::Away, 1, D3, D5).unwrap();
        assert!(ledger.substitute(&lineup, Team::Away, 6, D3, D5).is_ok());
        assert_eq!(ledger.replacement(6, D3), Some(D5));
    }

    #[test]
    fn triple_game_ignores_locks() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();

        ledger.substitute(&lineup, Team::Away, 1, D3, D5).unwrap();
        ledger.substitute(&lineup, Team::Away, 2, D1, D4).unwrap();

        assert!(ledger.substitute(&lineup, Team::Away, 9, D1, D5).is_ok());
        assert!(ledger.substitute(&lineup, Team::Away, 9, D2, D6).is_ok());
        assert_eq!(
            ledger.resolve_player(&lineup, Team::Away, D1, 9).map(String::as_str),
            Some("d5")
        );
        // Locks from other games are untouched
        assert_eq!(ledger.locked_partner(D1), Some(D4));
        assert_eq!(ledger.locked_partner(D6), None);
    }

    #[test]
    fn reverting_triple_substitution_keeps_other_locks() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();

        ledger.substitute(&lineup, Team::Away, 2, D1, D4).unwrap();
        ledger.substitute(&lineup, Team::Away, 9, D1, D6).unwrap();
        ledger.substitute(&lineup, Team::Away, 9, D1, D1).unwrap();

        assert_eq!(ledger.replacement(9, D1), None);
        assert_eq!(ledger.locked_partner(D1), Some(D4));
    }

    #[test]
    fn one_bench_player_cannot_cover_two_positions_in_a_game() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();

        ledger.substitute(&lineup, Team::Away, 9, D1, D4).unwrap();
        assert!(matches!(
            ledger.substitute(&lineup, Team::Away, 9, D2, D4),
            Err(MatchError::DuplicatePlayer { position: D1, .. })
        ));
    }

    #[test]
    fn replacement_must_be_filled_bench_seat() {
        let mut lineup = lineup();
        lineup.unassign(D6);
        let mut ledger = SubstitutionLedger::new();

        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 1, D3, D2),
            Err(MatchError::NotABenchPosition(D2))
        );
        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 1, D3, D6),
            Err(MatchError::PositionVacant(D6))
        );
        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 1, D3, H4),
            Err(MatchError::InvalidPosition("H4".to_string()))
        );
    }

    #[test]
    fn available_substitutes_follow_locks() {
        let mut lineup = lineup();
        lineup.unassign(D6);
        let mut ledger = SubstitutionLedger::new();

        assert_eq!(
            ledger.available_substitutes(&lineup, Team::Away, D3, 1),
            vec![D4, D5]
        );

        ledger.substitute(&lineup, Team::Away, 1, D3, D5).unwrap();
        assert_eq!(
            ledger.available_substitutes(&lineup, Team::Away, D3, 6),
            vec![D5]
        );
        assert_eq!(
            ledger.available_substitutes(&lineup, Team::Away, D2, 6),
            vec![D4]
        );
        assert_eq!(
            ledger.available_substitutes(&lineup, Team::Away, D1, 9),
            vec![D4, D5]
        );
    }

    #[test]
    fn unknown_game_is_rejected() {
        let lineup = lineup();
        let mut ledger = SubstitutionLedger::new();
        assert_eq!(
            ledger.substitute(&lineup, Team::Away, 42, D3, D5),
            Err(MatchError::UnknownGame(42))
        );
        assert!(ledger
            .available_substitutes(&lineup, Team::Away, D3, 42)
            .is_empty());
    }
}
