//! Flip-card review endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use flashcard_core::{FlashcardRepository, FlipDeck, GameError};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::services::sessions::{StudyMode, StudySession};
use crate::AppState;

/// POST /api/sets/:id/flip
pub async fn start(
    State(state): State<AppState>,
    Path(set_id): Path<String>,
) -> Result<(StatusCode, Json<FlipSessionResponse>)> {
    let deck = load_deck(&state, &set_id)
        .await
        .inspect_err(|e| tracing::warn!("Aborting flip review for set {}: {}", set_id, e))?;

    let cards = deck.view();
    let session_id = state.sessions.insert(&set_id, StudySession::Flip(deck)).await;

    Ok((
        StatusCode::CREATED,
        Json(FlipSessionResponse {
            session_id,
            set_id,
            cards,
        }),
    ))
}

/// GET /api/flip/:session
pub async fn view(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<FlipSessionResponse>> {
    respond(&state, session_id, |_| Ok(())).await
}

/// POST /api/flip/:session/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<FlipSessionResponse>> {
    respond(&state, session_id, |deck| {
        deck.toggle(payload.index)?;
        Ok(())
    })
    .await
}

/// POST /api/flip/:session/reset
pub async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<FlipSessionResponse>> {
    respond(&state, session_id, |deck| {
        deck.reset();
        Ok(())
    })
    .await
}

/// DELETE /api/flip/:session
pub async fn end(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.sessions.remove(session_id, StudyMode::Flip).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_deck(state: &AppState, set_id: &str) -> std::result::Result<FlipDeck, GameError> {
    let set = state.store.fetch_flashcard_set(set_id).await?;
    FlipDeck::new(set.terms)
}

async fn respond<F>(state: &AppState, session_id: Uuid, f: F) -> Result<Json<FlipSessionResponse>>
where
    F: FnOnce(&mut FlipDeck) -> Result<()>,
{
    let response = state
        .sessions
        .with_session(session_id, StudyMode::Flip, |set_id, session| {
            let deck = session.as_flip_mut()?;
            f(deck)?;
            Ok(FlipSessionResponse {
                session_id,
                set_id: set_id.to_string(),
                cards: deck.view(),
            })
        })
        .await?;
    Ok(Json(response))
}
