// The fixed sequence of sub-games that makes up one team match

pub use games::{
    GameFormat, GameKind, MatchTemplateGame, CAPPED_ROUND_LIMIT, REGULAR_GAME_COUNT,
    TIEBREAK_GAME_ID,
};

mod games;

use games::MATCH_GAMES;

/// Games in play order. The tiebreak game is appended only when asked for.
pub fn games(include_tiebreak: bool) -> Vec<&'static MatchTemplateGame> {
    MATCH_GAMES
        .iter()
        .filter(|game| include_tiebreak || !game.tiebreak_only)
        .collect()
}

pub fn game(id: u8) -> Option<&'static MatchTemplateGame> {
    MATCH_GAMES.iter().find(|game| game.id == id)
}
