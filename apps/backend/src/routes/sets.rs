//! Flashcard set endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::services::sets::prepare_set;
use crate::AppState;

/// GET /api/sets
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SetListQuery>,
) -> Result<Json<SetListResponse>> {
    let sets = state.store.list(query.owner_id.as_deref()).await?;
    Ok(Json(SetListResponse {
        sets: sets.iter().map(SetSummary::from).collect(),
    }))
}

/// POST /api/sets
/// Creates a set, or replaces the one with the given id
pub async fn save(
    State(state): State<AppState>,
    Json(payload): Json<SaveSetRequest>,
) -> Result<(StatusCode, Json<FlashcardSet>)> {
    let set = prepare_set(payload)?;
    let saved = state.store.save(set).await?;

    tracing::info!("Saved flashcard set {} ({} terms)", saved.id, saved.terms.len());

    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/sets/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FlashcardSet>> {
    let set = state.store.get(&id).await?;
    Ok(Json(set))
}

/// DELETE /api/sets/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.store.delete(&id).await?;
    tracing::info!("Deleted flashcard set {}", id);
    Ok(StatusCode::NO_CONTENT)
}
