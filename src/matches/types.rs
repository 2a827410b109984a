use serde::{Deserialize, Serialize};

use super::{EventType, MatchStatus};
use crate::{
    lineup::{PlayerId, Position, Team},
    stats::RecomputeSummary,
};

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    pub include_tiebreak: bool,
}

/// Request payload for opening a new match
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub season_id: String,
    pub home_team: String,
    pub away_team: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchCreatedResponse {
    pub match_id: String,
    pub season_id: String,
    pub home_team: String,
    pub away_team: String,
}

/// Position codes arrive as text and are checked against the team
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignLineupRequest {
    pub team: Team,
    pub position: String,
    pub player_id: PlayerId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineupAssignmentResponse {
    pub team: Team,
    pub position: Position,
    pub player_id: PlayerId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubstitutionRequest {
    pub team: Team,
    pub game_id: u8,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubstitutionResponse {
    pub game_id: u8,
    pub position: Position,
    /// Player who now plays `position` in this game
    pub player_id: Option<PlayerId>,
    pub locked_partner: Option<Position>,
}

#[derive(Debug, Deserialize)]
pub struct SubstitutesQuery {
    pub team: Team,
    pub position: String,
    pub game_id: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubstitutesResponse {
    pub position: Position,
    pub game_id: u8,
    pub substitutes: Vec<Position>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordGameRequest {
    pub home_legs: u8,
    pub away_legs: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordEventRequest {
    pub game_id: u8,
    pub player_id: PlayerId,
    pub event: EventType,
    #[serde(default = "default_delta")]
    pub delta: i64,
}

fn default_delta() -> i64 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinalizeResponse {
    pub status: MatchStatus,
    /// Present when finalizing triggered a season rebuild
    pub recompute: Option<RecomputeSummary>,
}
