// MatchState is the whole of one match's entry: lineups, substitutions, game
// results and singles events. Every change goes through a MatchCommand so the
// aggregate can be replayed, serialized and validated without any UI around it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use super::{
    aggregator::{MatchAggregator, MatchPhase, Tally, TeamPoints},
    events::{EventType, PlayerEventLedger},
    recorder::{build_result, GameResult},
    MatchError,
};
use crate::{
    lineup::{LineupRegistry, PlayerId, Position, Team},
    stats::{validate_record, CompletedMatchRecord},
    substitution::SubstitutionLedger,
    template::{self, GameKind, TIEBREAK_GAME_ID},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchCommand {
    AssignLineup {
        team: Team,
        position: Position,
        player_id: PlayerId,
    },
    Substitute {
        team: Team,
        game_id: u8,
        from: Position,
        to: Position,
    },
    RecordResult {
        game_id: u8,
        home_legs: u8,
        away_legs: u8,
    },
    RecordEvent {
        game_id: u8,
        player_id: PlayerId,
        event: EventType,
        delta: i64,
    },
    Finalize {
        at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatus {
    pub state: MatchPhase,
    pub completed_games: usize,
    pub required_games: usize,
    pub tally: Tally,
    pub team_points: Option<TeamPoints>,
    pub finalized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub match_id: String,
    pub season_id: String,
    pub home_team: String,
    pub away_team: String,
    lineup: LineupRegistry,
    substitutions: SubstitutionLedger,
    results: BTreeMap<u8, GameResult>,
    events: PlayerEventLedger,
    finalized_at: Option<DateTime<Utc>>,
}

impl MatchState {
    pub fn new(match_id: &str, season_id: &str, home_team: &str, away_team: &str) -> Self {
        Self {
            match_id: match_id.to_string(),
            season_id: season_id.to_string(),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            lineup: LineupRegistry::new(),
            substitutions: SubstitutionLedger::new(),
            results: BTreeMap::new(),
            events: PlayerEventLedger::new(),
            finalized_at: None,
        }
    }

    /// Pure transition: returns the next state, leaving `self` untouched.
    pub fn apply(&self, command: MatchCommand) -> Result<MatchState, MatchError> {
        let mut next = self.clone();
        next.execute(command)?;
        Ok(next)
    }

    fn execute(&mut self, command: MatchCommand) -> Result<(), MatchError> {
        match command {
            MatchCommand::AssignLineup {
                team,
                position,
                player_id,
            } => self.assign_player(team, position, &player_id),
            MatchCommand::Substitute {
                team,
                game_id,
                from,
                to,
            } => self.substitute(team, game_id, from, to),
            MatchCommand::RecordResult {
                game_id,
                home_legs,
                away_legs,
            } => self.record_result(game_id, home_legs, away_legs).map(|_| ()),
            MatchCommand::RecordEvent {
                game_id,
                player_id,
                event,
                delta,
            } => self.record_event(game_id, &player_id, event, delta),
            MatchCommand::Finalize { at } => self.finalize(at),
        }
    }

    pub fn assign_player(
        &mut self,
        team: Team,
        position: Position,
        player_id: &str,
    ) -> Result<(), MatchError> {
        self.ensure_open()?;

        let trimmed = player_id.trim();
        let opponent = team.opponent();
        if !trimmed.is_empty()
            && (self.lineup.position_of(opponent, trimmed).is_some()
                || self.has_played(opponent, trimmed))
        {
            return Err(MatchError::PlayerOnOtherTeam {
                player_id: trimmed.to_string(),
                team: opponent,
            });
        }

        if let Some(current) = self.lineup.player_at(position) {
            let replacing = current.as_str() != trimmed;
            if replacing && (self.has_played(team, current) || self.events.has_any_events(current))
            {
                return Err(MatchError::PositionInUse(position));
            }
        }

        self.lineup.assign(team, position, player_id)?;
        debug!(match_id = %self.match_id, %position, player_id, "Lineup position assigned");
        Ok(())
    }

    pub fn substitute(
        &mut self,
        team: Team,
        game_id: u8,
        from: Position,
        to: Position,
    ) -> Result<(), MatchError> {
        self.ensure_open()?;

        let mut substitutions = self.substitutions.clone();
        substitutions.substitute(&self.lineup, team, game_id, from, to)?;

        let outgoing = self
            .substitutions
            .resolve_player(&self.lineup, team, from, game_id);
        let incoming = substitutions.resolve_player(&self.lineup, team, from, game_id);
        if let Some(outgoing) = outgoing {
            if incoming != Some(outgoing) && self.events.has_events(game_id, outgoing) {
                return Err(MatchError::EventsRecorded {
                    player_id: outgoing.clone(),
                    game_id,
                });
            }
        }

        self.substitutions = substitutions;
        debug!(match_id = %self.match_id, game_id, %from, %to, "Substitution applied");
        Ok(())
    }

    pub fn available_substitutes(&self, team: Team, position: Position, game_id: u8) -> Vec<Position> {
        self.substitutions
            .available_substitutes(&self.lineup, team, position, game_id)
    }

    pub fn resolve_player(&self, team: Team, position: Position, game_id: u8) -> Option<&PlayerId> {
        self.substitutions
            .resolve_player(&self.lineup, team, position, game_id)
    }

    pub fn record_result(
        &mut self,
        game_id: u8,
        home_legs: u8,
        away_legs: u8,
    ) -> Result<GameResult, MatchError> {
        self.ensure_open()?;

        let game = template::game(game_id).ok_or(MatchError::UnknownGame(game_id))?;
        if game.tiebreak_only && !self.aggregator().tiebreak_applicable() {
            return Err(MatchError::TiebreakNotApplicable);
        }

        for team in Team::iter() {
            if !self.lineup.is_starting_lineup_complete(team) {
                return Err(MatchError::IncompleteLineup(team));
            }
        }

        let result = build_result(
            game,
            &self.lineup,
            &self.substitutions,
            home_legs,
            away_legs,
        )?;
        if let Some(stale) = self
            .events
            .entries()
            .iter()
            .find(|counts| {
                counts.game_id == game_id && result.participants.team_of(&counts.player_id).is_none()
            })
        {
            return Err(MatchError::EventsRecorded {
                player_id: stale.player_id.clone(),
                game_id,
            });
        }
        let corrected = self.results.insert(game_id, result.clone()).is_some();

        if !game.tiebreak_only
            && self.results.contains_key(&TIEBREAK_GAME_ID)
            && !self.aggregator().tiebreak_applicable()
        {
            self.results.remove(&TIEBREAK_GAME_ID);
            warn!(
                match_id = %self.match_id,
                game_id,
                "Correction broke the level tally, discarding tiebreak result"
            );
        }

        debug!(
            match_id = %self.match_id,
            game_id,
            home_legs,
            away_legs,
            winner = %result.winner,
            corrected,
            "Game result recorded"
        );
        Ok(result)
    }

    pub fn record_event(
        &mut self,
        game_id: u8,
        player_id: &str,
        event: EventType,
        delta: i64,
    ) -> Result<(), MatchError> {
        self.ensure_open()?;

        let game = template::game(game_id).ok_or(MatchError::UnknownGame(game_id))?;
        if game.kind != GameKind::Single {
            return Err(MatchError::NotASinglesGame(game_id));
        }
        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(MatchError::EmptyPlayer);
        }
        if !self.plays_game(game_id, player_id) {
            return Err(MatchError::PlayerNotInGame {
                player_id: player_id.to_string(),
                game_id,
            });
        }

        self.events.record(game_id, player_id, event, delta)?;
        Ok(())
    }

    pub fn finalize(&mut self, at: DateTime<Utc>) -> Result<(), MatchError> {
        self.ensure_open()?;
        if self.aggregator().phase() != MatchPhase::Decided {
            return Err(MatchError::MatchNotDecided);
        }

        for counts in self.events.entries() {
            let played = self
                .results
                .get(&counts.game_id)
                .is_some_and(|result| result.participants.team_of(&counts.player_id).is_some());
            if !played {
                return Err(MatchError::PlayerNotInGame {
                    player_id: counts.player_id.clone(),
                    game_id: counts.game_id,
                });
            }
        }

        // Never archive a record the season rebuild would skip
        self.finalized_at = Some(at);
        if let Some(record) = self.to_record() {
            if let Err(err) = validate_record(&record) {
                self.finalized_at = None;
                return Err(MatchError::InconsistentRecord(err.to_string()));
            }
        }
        Ok(())
    }

    pub fn aggregator(&self) -> MatchAggregator<'_> {
        MatchAggregator::new(&self.results)
    }

    pub fn status(&self) -> MatchStatus {
        let aggregator = self.aggregator();
        MatchStatus {
            state: aggregator.phase(),
            completed_games: self.results.len(),
            required_games: aggregator.required_games(),
            tally: aggregator.tally(),
            team_points: aggregator.team_points(),
            finalized: self.is_finalized(),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }

    pub fn finalized_at(&self) -> Option<DateTime<Utc>> {
        self.finalized_at
    }

    pub fn lineup(&self) -> &LineupRegistry {
        &self.lineup
    }

    pub fn substitutions(&self) -> &SubstitutionLedger {
        &self.substitutions
    }

    pub fn results(&self) -> &BTreeMap<u8, GameResult> {
        &self.results
    }

    pub fn result(&self, game_id: u8) -> Option<&GameResult> {
        self.results.get(&game_id)
    }

    pub fn events(&self) -> &PlayerEventLedger {
        &self.events
    }

    /// Archive shape of a finalized match; `None` while the match is still open.
    pub fn to_record(&self) -> Option<CompletedMatchRecord> {
        let finalized_at = self.finalized_at?;
        Some(CompletedMatchRecord {
            match_id: self.match_id.clone(),
            season_id: self.season_id.clone(),
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            results: self.results.values().cloned().collect(),
            events: self.events.entries().to_vec(),
            finalized_at,
        })
    }

    fn ensure_open(&self) -> Result<(), MatchError> {
        if self.is_finalized() {
            return Err(MatchError::MatchFinalized);
        }
        Ok(())
    }

    /// Whether `player_id` plays `game_id`: the recorded participants if the
    /// game has a result, otherwise the lineup with that game's substitutions.
    fn plays_game(&self, game_id: u8, player_id: &str) -> bool {
        if let Some(result) = self.results.get(&game_id) {
            return result.participants.team_of(player_id).is_some();
        }
        let Some(game) = template::game(game_id) else {
            return false;
        };
        Team::iter().any(|team| {
            game.positions(team).iter().any(|position| {
                self.resolve_player(team, *position, game_id)
                    .is_some_and(|assigned| assigned == player_id)
            })
        })
    }

    fn has_played(&self, team: Team, player_id: &str) -> bool {
        self.results
            .values()
            .any(|result| result.participants.contains(team, player_id))
    }
}
