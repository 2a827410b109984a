//! Builders that drive a match through the service layer
#![allow(dead_code)] // Test utilities may not all be used in every test

use darts_league::{template, Team};

use super::setup::TestSetup;

/// Creates a match with full lineups; players are named `<team prefix><slot>`
/// with a per-match suffix so several matches can share player ids on purpose.
pub struct MatchBuilder {
    home_players: Vec<String>,
    away_players: Vec<String>,
    home_team: String,
    away_team: String,
}

impl MatchBuilder {
    pub fn new() -> Self {
        Self {
            home_players: (1..=6).map(|slot| format!("home-{slot}")).collect(),
            away_players: (1..=6).map(|slot| format!("away-{slot}")).collect(),
            home_team: "Arrows".to_string(),
            away_team: "Bullseyes".to_string(),
        }
    }

    pub fn with_home_players(mut self, players: &[&str]) -> Self {
        self.home_players = players.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_away_players(mut self, players: &[&str]) -> Self {
        self.away_players = players.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Creates the match and assigns every configured player; returns the match id.
    pub async fn build(self, setup: &TestSetup) -> String {
        let state = setup
            .match_service
            .create_match(&setup.season_id, &self.home_team, &self.away_team)
            .await
            .expect("match should be created");

        for (team, players) in [(Team::Home, &self.home_players), (Team::Away, &self.away_players)] {
            for (index, player) in players.iter().enumerate() {
                let code = format!("{}{}", team.code_prefix(), index + 1);
                setup
                    .match_service
                    .assign_lineup(&state.match_id, team, &code, player)
                    .await
                    .expect("lineup assignment should succeed");
            }
        }

        state.match_id
    }
}

/// Records all 16 regular games; the home side wins the listed game ids.
pub async fn play_regular_games(setup: &TestSetup, match_id: &str, home_wins: &[u8]) {
    for game in template::games(false) {
        let target = game.format.legs_to_win();
        let (home, away) = if home_wins.contains(&game.id) {
            (target, target - 1)
        } else {
            (target - 1, target)
        };
        setup
            .match_service
            .record_game_result(match_id, game.id, home, away)
            .await
            .expect("regular game result should be accepted");
    }
}
