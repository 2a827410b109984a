use std::collections::{BTreeMap, HashSet};

use super::{CompletedMatchRecord, StatsError};
use crate::{
    lineup::Team,
    matches::{validate_legs, GameResult, MatchAggregator, MatchPhase, MAX_CHECKOUT},
    template::{self, GameKind},
};

/// Checks an archived match before it is allowed into a season rebuild.
///
/// Archived records may come from imports or older versions of the service,
/// so everything the match protocol guarantees is checked again here.
pub fn validate_record(record: &CompletedMatchRecord) -> Result<(), StatsError> {
    let malformed = |reason: String| StatsError::malformed(&record.match_id, reason);

    if record.season_id.trim().is_empty() {
        return Err(malformed("season id is empty".to_string()));
    }

    let mut results: BTreeMap<u8, GameResult> = BTreeMap::new();
    for result in &record.results {
        let game = template::game(result.game_id)
            .ok_or_else(|| malformed(format!("unknown game {}", result.game_id)))?;

        let winner = validate_legs(game.format, result.home_legs, result.away_legs)
            .map_err(|err| malformed(format!("game {}: {err}", result.game_id)))?;
        if winner != result.winner {
            return Err(malformed(format!(
                "game {}: winner does not match legs",
                result.game_id
            )));
        }

        for team in [Team::Home, Team::Away] {
            let players = result.participants.side(team);
            if players.len() != game.positions(team).len()
                || players.iter().any(|player| player.trim().is_empty())
            {
                return Err(malformed(format!(
                    "game {}: {team} participants do not fit the game",
                    result.game_id
                )));
            }
        }

        if results.insert(result.game_id, result.clone()).is_some() {
            return Err(malformed(format!("game {} recorded twice", result.game_id)));
        }
    }

    if MatchAggregator::new(&results).phase() != MatchPhase::Decided {
        return Err(malformed("match is not decided".to_string()));
    }

    let home: HashSet<&str> = players_of(&results, Team::Home);
    if let Some(player) = players_of(&results, Team::Away)
        .into_iter()
        .find(|player| home.contains(player))
    {
        return Err(malformed(format!("player {player} played for both teams")));
    }

    let mut seen_events = HashSet::new();
    for counts in &record.events {
        let result = results.get(&counts.game_id).ok_or_else(|| {
            malformed(format!("events for game {} without a result", counts.game_id))
        })?;
        if template::game(counts.game_id).map(|game| game.kind) != Some(GameKind::Single) {
            return Err(malformed(format!(
                "events recorded for non-singles game {}",
                counts.game_id
            )));
        }
        if result.participants.team_of(&counts.player_id).is_none() {
            return Err(malformed(format!(
                "events for {} who did not play game {}",
                counts.player_id, counts.game_id
            )));
        }
        if counts.max_checkout > MAX_CHECKOUT {
            return Err(malformed(format!(
                "checkout {} is not possible",
                counts.max_checkout
            )));
        }
        if !seen_events.insert((counts.game_id, counts.player_id.as_str())) {
            return Err(malformed(format!(
                "events for {} in game {} recorded twice",
                counts.player_id, counts.game_id
            )));
        }
    }

    Ok(())
}

fn players_of(results: &BTreeMap<u8, GameResult>, team: Team) -> HashSet<&str> {
    results
        .values()
        .flat_map(|result| result.participants.side(team))
        .map(String::as_str)
        .collect()
}
