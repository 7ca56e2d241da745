//! Matching game endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use flashcard_core::{MatchGame, Resolution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::services::sessions::{StudyMode, StudySession};
use crate::AppState;

/// POST /api/sets/:id/match
/// Loads the set, deals a board and starts the round timer
pub async fn start(
    State(state): State<AppState>,
    Path(set_id): Path<String>,
) -> Result<(StatusCode, Json<MatchSessionResponse>)> {
    let mut rng = StdRng::from_os_rng();
    let game = MatchGame::load(&state.store, &set_id, &mut rng, (*state.timings).clone())
        .await
        .inspect_err(|e| {
            if e.is_terminal() {
                tracing::warn!("Aborting match round for set {}: {}", set_id, e);
            }
        })?;

    let board = game.board();
    let session_id = state
        .sessions
        .insert(&set_id, StudySession::Match(game))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(MatchSessionResponse {
            session_id,
            set_id,
            board,
        }),
    ))
}

/// GET /api/match/:session
pub async fn board(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MatchSessionResponse>> {
    let response = state
        .sessions
        .with_session(session_id, StudyMode::Match, |set_id, session| {
            Ok(MatchSessionResponse {
                session_id,
                set_id: set_id.to_string(),
                board: session.as_match_mut()?.board(),
            })
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/match/:session/click
pub async fn click(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<ClickResponse>> {
    let response = state
        .sessions
        .with_session(session_id, StudyMode::Match, |_, session| {
            let game = session.as_match_mut()?;
            let outcome = game.click(payload.index)?;

            if let ClickOutcome::Resolved {
                resolution: Resolution::Match { complete: true, .. },
            } = outcome
            {
                if let Some(result) = game.result() {
                    tracing::info!(
                        "Match session {} completed in {} seconds",
                        session_id,
                        result.seconds
                    );
                }
            }

            Ok(ClickResponse {
                outcome,
                board: game.board(),
            })
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /api/match/:session
pub async fn end(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.sessions.remove(session_id, StudyMode::Match).await?;
    Ok(StatusCode::NO_CONTENT)
}
