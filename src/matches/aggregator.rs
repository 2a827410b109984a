use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::warn;

use super::recorder::GameResult;
use crate::{
    lineup::Team,
    template::{REGULAR_GAME_COUNT, TIEBREAK_GAME_ID},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchPhase {
    InProgress,
    NeedsTiebreak,
    Decided,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub home: u8,
    pub away: u8,
}

impl Tally {
    fn count(&mut self, result: &GameResult) {
        match result.winner {
            Team::Home => self.home += 1,
            Team::Away => self.away += 1,
        }
    }

    pub fn is_tied(&self) -> bool {
        self.home == self.away
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PointsLabel {
    #[serde(rename = "V-P")]
    #[strum(serialize = "V-P")]
    HomeWinToNil,
    #[serde(rename = "V-PP")]
    #[strum(serialize = "V-PP")]
    HomeWin,
    #[serde(rename = "P-V")]
    #[strum(serialize = "P-V")]
    AwayWinToNil,
    #[serde(rename = "PP-V")]
    #[strum(serialize = "PP-V")]
    AwayWin,
    #[serde(rename = "VP-VP")]
    #[strum(serialize = "VP-VP")]
    Split,
}

/// League points awarded to each team for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPoints {
    pub home: u8,
    pub away: u8,
    pub label: PointsLabel,
}

impl TeamPoints {
    pub fn from_tally(tally: Tally) -> Self {
        let (home, away, label) = match (tally.home, tally.away) {
            (h, 0) if h > 0 => (3, 0, PointsLabel::HomeWinToNil),
            (h, a) if h > a => (3, 1, PointsLabel::HomeWin),
            (0, a) if a > 0 => (0, 3, PointsLabel::AwayWinToNil),
            (h, a) if a > h => (1, 3, PointsLabel::AwayWin),
            // A single-leg tiebreak always produces a winner, so a level tally
            // only shows up in imported data.
            _ => {
                warn!(home = tally.home, away = tally.away, "Level tally mapped to split points");
                (2, 2, PointsLabel::Split)
            }
        };
        Self { home, away, label }
    }
}

/// Read-only view over the recorded results of one match.
pub struct MatchAggregator<'a> {
    results: &'a BTreeMap<u8, GameResult>,
}

impl<'a> MatchAggregator<'a> {
    pub fn new(results: &'a BTreeMap<u8, GameResult>) -> Self {
        Self { results }
    }

    fn regular_results(&self) -> impl Iterator<Item = &'a GameResult> {
        let results: &'a BTreeMap<u8, GameResult> = self.results;
        results
            .values()
            .filter(|result| result.game_id != TIEBREAK_GAME_ID)
    }

    pub fn regular_count(&self) -> usize {
        self.regular_results().count()
    }

    pub fn regular_tally(&self) -> Tally {
        let mut tally = Tally::default();
        self.regular_results().for_each(|result| tally.count(result));
        tally
    }

    pub fn tiebreak(&self) -> Option<&'a GameResult> {
        self.results.get(&TIEBREAK_GAME_ID)
    }

    /// Wins per team across every recorded game, tiebreak included
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        self.results.values().for_each(|result| tally.count(result));
        tally
    }

    /// The tiebreak may be recorded (or corrected) only while all regular games
    /// are in and level.
    pub fn tiebreak_applicable(&self) -> bool {
        self.regular_count() == REGULAR_GAME_COUNT && self.regular_tally().is_tied()
    }

    pub fn phase(&self) -> MatchPhase {
        if self.regular_count() < REGULAR_GAME_COUNT {
            return MatchPhase::InProgress;
        }
        if self.regular_tally().is_tied() && self.tiebreak().is_none() {
            return MatchPhase::NeedsTiebreak;
        }
        MatchPhase::Decided
    }

    pub fn required_games(&self) -> usize {
        if self.tiebreak_applicable() {
            REGULAR_GAME_COUNT + 1
        } else {
            REGULAR_GAME_COUNT
        }
    }

    pub fn team_points(&self) -> Option<TeamPoints> {
        match self.phase() {
            MatchPhase::Decided => Some(TeamPoints::from_tally(self.tally())),
            _ => None,
        }
    }
}
