use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    types::{
        AssignLineupRequest, CreateMatchRequest, FinalizeResponse, LineupAssignmentResponse,
        MatchCreatedResponse, RecordEventRequest, RecordGameRequest, SubstitutesQuery,
        SubstitutesResponse, SubstitutionRequest, SubstitutionResponse, TemplateQuery,
    },
    GameResult, MatchStatus, PlayerEventCounts,
};
use crate::{
    lineup::Position,
    shared::{AppError, AppState},
    template::MatchTemplateGame,
};

/// GET /template?include_tiebreak=
pub async fn get_template(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Json<Vec<&'static MatchTemplateGame>> {
    Json(state.match_service.template(query.include_tiebreak))
}

/// POST /matches
#[instrument(name = "create_match", skip(state))]
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<Json<MatchCreatedResponse>, AppError> {
    let created = state
        .match_service
        .create_match(&request.season_id, &request.home_team, &request.away_team)
        .await?;

    Ok(Json(MatchCreatedResponse {
        match_id: created.match_id,
        season_id: created.season_id,
        home_team: created.home_team,
        away_team: created.away_team,
    }))
}

/// PUT /matches/{id}/lineup
#[instrument(name = "assign_lineup", skip(state))]
pub async fn assign_lineup(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<AssignLineupRequest>,
) -> Result<Json<LineupAssignmentResponse>, AppError> {
    let position = state
        .match_service
        .assign_lineup(&match_id, request.team, &request.position, &request.player_id)
        .await?;

    Ok(Json(LineupAssignmentResponse {
        team: request.team,
        position,
        player_id: request.player_id.trim().to_string(),
    }))
}

/// POST /matches/{id}/substitutions
#[instrument(name = "substitute", skip(state))]
pub async fn substitute(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<SubstitutionRequest>,
) -> Result<Json<SubstitutionResponse>, AppError> {
    let updated = state
        .match_service
        .substitute(
            &match_id,
            request.team,
            request.game_id,
            &request.from,
            &request.to,
        )
        .await?;

    let position = Position::parse_for(request.team, &request.from)?;
    info!(match_id = %match_id, game_id = request.game_id, %position, "Substitution stored");

    Ok(Json(SubstitutionResponse {
        game_id: request.game_id,
        position,
        player_id: updated
            .resolve_player(request.team, position, request.game_id)
            .cloned(),
        locked_partner: updated.substitutions().locked_partner(position),
    }))
}

/// GET /matches/{id}/substitutes?team=&position=&game_id=
pub async fn available_substitutes(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Query(query): Query<SubstitutesQuery>,
) -> Result<Json<SubstitutesResponse>, AppError> {
    let (position, substitutes) = state
        .match_service
        .available_substitutes(&match_id, query.team, &query.position, query.game_id)
        .await?;

    Ok(Json(SubstitutesResponse {
        position,
        game_id: query.game_id,
        substitutes,
    }))
}

/// PUT /matches/{id}/games/{game_id}
#[instrument(name = "record_game_result", skip(state))]
pub async fn record_game_result(
    State(state): State<AppState>,
    Path((match_id, game_id)): Path<(String, u8)>,
    Json(request): Json<RecordGameRequest>,
) -> Result<Json<GameResult>, AppError> {
    let result = state
        .match_service
        .record_game_result(&match_id, game_id, request.home_legs, request.away_legs)
        .await?;
    Ok(Json(result))
}

/// POST /matches/{id}/events
#[instrument(name = "record_player_event", skip(state))]
pub async fn record_player_event(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<RecordEventRequest>,
) -> Result<Json<PlayerEventCounts>, AppError> {
    let counts = state
        .match_service
        .record_player_event(
            &match_id,
            request.game_id,
            &request.player_id,
            request.event,
            request.delta,
        )
        .await?;
    Ok(Json(counts))
}

/// GET /matches/{id}/status
pub async fn match_status(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchStatus>, AppError> {
    Ok(Json(state.match_service.match_status(&match_id).await?))
}

/// POST /matches/{id}/finalize
#[instrument(name = "finalize_match", skip(state))]
pub async fn finalize_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<FinalizeResponse>, AppError> {
    let (status, recompute) = state.match_service.finalize_match(&match_id).await?;
    Ok(Json(FinalizeResponse { status, recompute }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::{InMemoryMatchRepository, MatchRepository, MatchState};
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post, put},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    fn router() -> Router {
        Router::new()
            .route("/template", get(get_template))
            .route("/matches", post(create_match))
            .route("/matches/:id/lineup", put(assign_lineup))
            .route("/matches/:id/substitutions", post(substitute))
            .route("/matches/:id/substitutes", get(available_substitutes))
            .route("/matches/:id/games/:game_id", put(record_game_result))
            .route("/matches/:id/events", post(record_player_event))
            .route("/matches/:id/status", get(match_status))
            .with_state(AppStateBuilder::new().build())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/matches",
            Some(json!({"season_id": "2025", "home_team": "Arrows", "away_team": "Bullseyes"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["match_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn template_hides_tiebreak_by_default() {
        let app = router();
        let (status, body) = send(&app, "GET", "/template", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 16);

        let (_, body) = send(&app, "GET", "/template?include_tiebreak=true", None).await;
        let games = body.as_array().unwrap();
        assert_eq!(games.len(), 17);
        assert_eq!(games[16]["kind"], "tiebreak_701");
        assert_eq!(games[8]["home_positions"], json!(["H1", "H2", "H3"]));
    }

    #[tokio::test]
    async fn lineup_and_substitution_flow() {
        let app = router();
        let id = create(&app).await;

        for (team, code, player) in [
            ("away", "D1", "a1"),
            ("away", "D2", "a2"),
            ("away", "D3", "a3"),
            ("away", "D5", "a5"),
        ] {
            let (status, body) = send(
                &app,
                "PUT",
                &format!("/matches/{id}/lineup"),
                Some(json!({"team": team, "position": code, "player_id": player})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["position"], code);
        }

        let (status, body) = send(
            &app,
            "GET",
            &format!("/matches/{id}/substitutes?team=away&position=D3&game_id=1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["substitutes"], json!(["D5"]));

        let (status, body) = send(
            &app,
            "POST",
            &format!("/matches/{id}/substitutions"),
            Some(json!({"team": "away", "game_id": 1, "from": "d3", "to": "D5"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["player_id"], "a5");
        assert_eq!(body["locked_partner"], "D5");
    }

    #[tokio::test]
    async fn rule_violation_maps_to_unprocessable_entity() {
        let app = router();
        let id = create(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/matches/{id}/games/1"),
            Some(json!({"home_legs": 2, "away_legs": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "incomplete_lineup");

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/matches/{id}/lineup"),
            Some(json!({"team": "home", "position": "H7", "player_id": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "invalid_position");
    }

    #[tokio::test]
    async fn event_for_player_outside_game_is_rejected() {
        let app = router();
        let id = create(&app).await;
        send(
            &app,
            "PUT",
            &format!("/matches/{id}/lineup"),
            Some(json!({"team": "home", "position": "H2", "player_id": "h2"})),
        )
        .await;

        // Game 1 is H1 vs D3
        let (status, body) = send(
            &app,
            "POST",
            &format!("/matches/{id}/events"),
            Some(json!({"game_id": 1, "player_id": "h2", "event": "high_95"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "player_not_in_game");
    }

    #[tokio::test]
    async fn unknown_match_is_not_found() {
        let app = router();
        let (status, body) = send(&app, "GET", "/matches/missing/status", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
    }

    #[tokio::test]
    async fn status_reads_from_injected_repository() {
        let repository = Arc::new(InMemoryMatchRepository::new());
        repository
            .create_match(&MatchState::new("stored-1", "2025", "Arrows", "Bullseyes"))
            .await
            .unwrap();
        let app = Router::new()
            .route("/matches/:id/status", get(match_status))
            .with_state(
                AppStateBuilder::new()
                    .with_match_repository(repository)
                    .build(),
            );

        let (status, body) = send(&app, "GET", "/matches/stored-1/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["finalized"], false);
    }

    #[tokio::test]
    async fn status_of_new_match_is_in_progress() {
        let app = router();
        let id = create(&app).await;
        let (status, body) = send(&app, "GET", &format!("/matches/{id}/status"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "in_progress");
        assert_eq!(body["completed_games"], 0);
        assert_eq!(body["required_games"], 16);
        assert_eq!(body["team_points"], Value::Null);
    }
}
