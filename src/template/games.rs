use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::lineup::position::{D1, D2, D3, H1, H2, H3};
use crate::lineup::{Position, Team};

/// Id of the conditional tiebreak game
pub const TIEBREAK_GAME_ID: u8 = 17;

/// Number of games that are always played
pub const REGULAR_GAME_COUNT: usize = 16;

/// Round limit of the capped single-leg format
pub const CAPPED_ROUND_LIMIT: u8 = 15;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum GameKind {
    #[serde(rename = "single")]
    #[strum(serialize = "single")]
    Single,
    #[serde(rename = "double_501")]
    #[strum(serialize = "double_501")]
    Double501,
    #[serde(rename = "double_cricket")]
    #[strum(serialize = "double_cricket")]
    DoubleCricket,
    #[serde(rename = "triple_301")]
    #[strum(serialize = "triple_301")]
    Triple301,
    #[serde(rename = "tiebreak_701")]
    #[strum(serialize = "tiebreak_701")]
    Tiebreak701,
}

impl GameKind {
    /// Triple 301 lets a team bring in any bench player without pairing locks.
    pub fn allows_unrestricted_substitution(self) -> bool {
        matches!(self, GameKind::Triple301)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameFormat {
    BestOfThree,
    SingleLeg,
    SingleLegCapped,
}

impl GameFormat {
    /// Legs a side needs to take the game; also the most legs either side can have.
    pub const fn legs_to_win(self) -> u8 {
        match self {
            GameFormat::BestOfThree => 2,
            GameFormat::SingleLeg | GameFormat::SingleLegCapped => 1,
        }
    }

    pub const fn round_limit(self) -> Option<u8> {
        match self {
            GameFormat::SingleLegCapped => Some(CAPPED_ROUND_LIMIT),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTemplateGame {
    pub id: u8,
    pub kind: GameKind,
    pub format: GameFormat,
    pub home_positions: &'static [Position],
    pub away_positions: &'static [Position],
    pub tiebreak_only: bool,
}

impl MatchTemplateGame {
    pub fn positions(&self, team: Team) -> &'static [Position] {
        match team {
            Team::Home => self.home_positions,
            Team::Away => self.away_positions,
        }
    }

    pub fn is_played_by(&self, position: Position) -> bool {
        self.positions(position.team()).contains(&position)
    }
}

const fn game(
    id: u8,
    kind: GameKind,
    format: GameFormat,
    home_positions: &'static [Position],
    away_positions: &'static [Position],
) -> MatchTemplateGame {
    MatchTemplateGame {
        id,
        kind,
        format,
        home_positions,
        away_positions,
        tiebreak_only: false,
    }
}

use GameFormat::{BestOfThree, SingleLeg, SingleLegCapped};
use GameKind::{Double501, DoubleCricket, Single, Tiebreak701, Triple301};

// Play order. Every starter meets every opposing starter once in singles.
pub(super) static MATCH_GAMES: [MatchTemplateGame; 17] = [
    game(1, Single, BestOfThree, &[H1], &[D3]),
    game(2, Single, BestOfThree, &[H2], &[D1]),
    game(3, Single, BestOfThree, &[H3], &[D2]),
    game(4, Double501, BestOfThree, &[H1, H2], &[D1, D2]),
    game(5, Double501, BestOfThree, &[H2, H3], &[D1, D3]),
    game(6, Double501, BestOfThree, &[H1, H3], &[D2, D3]),
    game(7, Single, BestOfThree, &[H1], &[D1]),
    game(8, Single, BestOfThree, &[H2], &[D2]),
    game(9, Triple301, SingleLeg, &[H1, H2, H3], &[D1, D2, D3]),
    game(10, Single, BestOfThree, &[H3], &[D3]),
    game(11, DoubleCricket, SingleLegCapped, &[H1, H3], &[D1, D2]),
    game(12, DoubleCricket, SingleLegCapped, &[H1, H2], &[D2, D3]),
    game(13, DoubleCricket, SingleLegCapped, &[H2, H3], &[D1, D3]),
    game(14, Single, BestOfThree, &[H1], &[D2]),
    game(15, Single, BestOfThree, &[H2], &[D3]),
    game(16, Single, BestOfThree, &[H3], &[D1]),
    MatchTemplateGame {
        id: TIEBREAK_GAME_ID,
        kind: Tiebreak701,
        format: SingleLeg,
        home_positions: &[H1, H2, H3],
        away_positions: &[D1, D2, D3],
        tiebreak_only: true,
    },
];
