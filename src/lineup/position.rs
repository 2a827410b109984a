use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::matches::MatchError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    /// Letter that prefixes every position code of this team
    pub const fn code_prefix(self) -> char {
        match self {
            Team::Home => 'H',
            Team::Away => 'D',
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}

/// Roster seat number. Seats 1-3 are starters, 4-6 the bench.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum Slot {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
}

impl Slot {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn is_starter(self) -> bool {
        (self as u8) <= 3
    }

    fn from_number(number: u8) -> Option<Slot> {
        Slot::iter().find(|slot| slot.number() == number)
    }
}

/// A team-qualified roster seat, written as a position code such as `H2` or `D5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    team: Team,
    slot: Slot,
}

impl Position {
    pub const fn new(team: Team, slot: Slot) -> Self {
        Self { team, slot }
    }

    pub const fn team(&self) -> Team {
        self.team
    }

    pub const fn slot(&self) -> Slot {
        self.slot
    }

    pub const fn is_starter(&self) -> bool {
        self.slot.is_starter()
    }

    pub fn is_bench(&self) -> bool {
        !self.is_starter()
    }

    /// Parses `code` and checks that it belongs to `team`.
    pub fn parse_for(team: Team, code: &str) -> Result<Position, MatchError> {
        let position: Position = code.parse()?;
        if position.team != team {
            return Err(MatchError::InvalidPosition(code.to_string()));
        }
        Ok(position)
    }

    /// All six positions of a team, starters first
    pub fn all(team: Team) -> impl Iterator<Item = Position> {
        Slot::iter().map(move |slot| Position::new(team, slot))
    }

    pub fn starters(team: Team) -> impl Iterator<Item = Position> {
        Position::all(team).filter(|position| position.is_starter())
    }

    pub fn bench(team: Team) -> impl Iterator<Item = Position> {
        Position::all(team).filter(|position| position.is_bench())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.team.code_prefix(), self.slot.number())
    }
}

impl FromStr for Position {
    type Err = MatchError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || MatchError::InvalidPosition(code.to_string());

        let mut chars = code.trim().chars();
        let team = match chars.next() {
            Some(prefix) if prefix.eq_ignore_ascii_case(&'H') => Team::Home,
            Some(prefix) if prefix.eq_ignore_ascii_case(&'D') => Team::Away,
            _ => return Err(invalid()),
        };

        let number: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        let slot = Slot::from_number(number).ok_or_else(invalid)?;

        Ok(Position::new(team, slot))
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

impl TryFrom<String> for Position {
    type Error = MatchError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

pub const H1: Position = Position::new(Team::Home, Slot::One);
pub const H2: Position = Position::new(Team::Home, Slot::Two);
pub const H3: Position = Position::new(Team::Home, Slot::Three);
pub const H4: Position = Position::new(Team::Home, Slot::Four);
pub const H5: Position = Position::new(Team::Home, Slot::Five);
pub const H6: Position = Position::new(Team::Home, Slot::Six);
pub const D1: Position = Position::new(Team::Away, Slot::One);
pub const D2: Position = Position::new(Team::Away, Slot::Two);
pub const D3: Position = Position::new(Team::Away, Slot::Three);
pub const D4: Position = Position::new(Team::Away, Slot::Four);
pub const D5: Position = Position::new(Team::Away, Slot::Five);
pub const D6: Position = Position::new(Team::Away, Slot::Six);
