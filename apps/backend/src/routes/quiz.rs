//! Typed quiz endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use flashcard_core::QuizSession;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::services::sessions::{StudyMode, StudySession};
use crate::AppState;

/// POST /api/sets/:id/quiz
pub async fn start(
    State(state): State<AppState>,
    Path(set_id): Path<String>,
) -> Result<(StatusCode, Json<QuizSessionResponse>)> {
    let quiz = QuizSession::load(&state.store, &set_id, &state.timings)
        .await
        .inspect_err(|e| {
            if e.is_terminal() {
                tracing::warn!("Aborting quiz for set {}: {}", set_id, e);
            }
        })?;

    let view = quiz.view();
    let session_id = state.sessions.insert(&set_id, StudySession::Quiz(quiz)).await;

    Ok((
        StatusCode::CREATED,
        Json(QuizSessionResponse {
            session_id,
            set_id,
            quiz: view,
        }),
    ))
}

/// GET /api/quiz/:session
pub async fn view(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<QuizSessionResponse>> {
    let response = state
        .sessions
        .with_session(session_id, StudyMode::Quiz, |set_id, session| {
            Ok(QuizSessionResponse {
                session_id,
                set_id: set_id.to_string(),
                quiz: session.as_quiz_mut()?.view(),
            })
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/quiz/:session/answer
pub async fn answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let response = state
        .sessions
        .with_session(session_id, StudyMode::Quiz, |_, session| {
            let quiz = session.as_quiz_mut()?;
            let outcome = quiz.submit(&payload.answer);
            Ok(AnswerResponse {
                outcome,
                quiz: quiz.view(),
            })
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/quiz/:session/quit
pub async fn quit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<QuizSessionResponse>> {
    let response = state
        .sessions
        .with_session(session_id, StudyMode::Quiz, |set_id, session| {
            let quiz = session.as_quiz_mut()?;
            quiz.quit();
            if let Some(result) = quiz.result() {
                tracing::info!(
                    "Quiz session {} finished: {}/{}",
                    session_id,
                    result.score,
                    result.total
                );
            }
            Ok(QuizSessionResponse {
                session_id,
                set_id: set_id.to_string(),
                quiz: quiz.view(),
            })
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /api/quiz/:session
pub async fn end(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.sessions.remove(session_id, StudyMode::Quiz).await?;
    Ok(StatusCode::NO_CONTENT)
}
