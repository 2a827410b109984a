use strum_macros::IntoStaticStr;
use thiserror::Error;

use crate::lineup::{Position, Team};

/// Rule violations raised while a match is being entered.
///
/// None of these are fatal: the caller gets the rejection back and the match
/// state is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchError {
    #[error("Invalid position code: {0}")]
    InvalidPosition(String),

    #[error("Player {player_id} already occupies position {position}")]
    DuplicatePlayer { player_id: String, position: Position },

    #[error("Player id cannot be empty")]
    EmptyPlayer,

    #[error("Position {position} does not play game {game_id}")]
    PositionNotPlaying { game_id: u8, position: Position },

    #[error("Position {position} is already paired with {partner}")]
    PairingLocked { position: Position, partner: Position },

    #[error("Position {0} is not a bench position")]
    NotABenchPosition(Position),

    #[error("No player is assigned to position {0}")]
    PositionVacant(Position),

    #[error("Neither side reached the winning leg count ({home_legs}-{away_legs})")]
    AmbiguousResult { home_legs: u8, away_legs: u8 },

    #[error("Leg score {home_legs}-{away_legs} is not possible in this format")]
    InvalidScore { home_legs: u8, away_legs: u8 },

    #[error("Unknown game: {0}")]
    UnknownGame(u8),

    #[error("Game {0} is not a singles game")]
    NotASinglesGame(u8),

    #[error("Invalid counter adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("Starting lineup of the {0} team is incomplete")]
    IncompleteLineup(Team),

    #[error("Tiebreak game can only be recorded when the regular games are tied")]
    TiebreakNotApplicable,

    #[error("Position {0} has recorded games and cannot be reassigned")]
    PositionInUse(Position),

    #[error("Player {player_id} is already in the {team} lineup")]
    PlayerOnOtherTeam { player_id: String, team: Team },

    #[error("Player {player_id} does not play game {game_id}")]
    PlayerNotInGame { player_id: String, game_id: u8 },

    #[error("Player {player_id} has events recorded in game {game_id}")]
    EventsRecorded { player_id: String, game_id: u8 },

    #[error("Match cannot be archived: {0}")]
    InconsistentRecord(String),

    #[error("Match has been finalized")]
    MatchFinalized,

    #[error("Match is not decided yet")]
    MatchNotDecided,
}

impl MatchError {
    /// Stable machine-readable name of the rejection
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
