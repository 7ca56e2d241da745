//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from flashcard-core
pub use flashcard_core::{
    ClickOutcome, FaceKind, FlashcardRecord, FlashcardSet, FlipCardView, MatchBoard, QuizView,
    SubmitOutcome,
};

// === Database Entity Types ===

/// Flashcard set stored in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbFlashcardSet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub icon_color: String,
    pub terms: Json<Vec<FlashcardRecord>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbFlashcardSet {
    /// Convert to flashcard-core FlashcardSet
    pub fn to_core_set(&self) -> FlashcardSet {
        FlashcardSet {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            owner_id: self.owner_id.clone(),
            owner_name: self.owner_name.clone(),
            icon_color: self.icon_color.clone(),
            terms: self.terms.0.clone(),
        }
    }
}

// === Set API Types ===

/// Save (create or update) request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveSetRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub icon_color: Option<String>,
    #[serde(default)]
    pub terms: Vec<FlashcardRecord>,
}

/// Set list filter
#[derive(Debug, Clone, Deserialize)]
pub struct SetListQuery {
    pub owner_id: Option<String>,
}

/// Set listing entry without its terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub icon_color: String,
    pub term_count: usize,
}

impl From<&FlashcardSet> for SetSummary {
    fn from(set: &FlashcardSet) -> Self {
        Self {
            id: set.id.clone(),
            title: set.title.clone(),
            description: set.description.clone(),
            owner_name: set.owner_name.clone(),
            icon_color: set.icon_color.clone(),
            term_count: set.terms.len(),
        }
    }
}

/// Set list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetListResponse {
    pub sets: Vec<SetSummary>,
}

// === Study Session API Types ===

/// Board of a match round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSessionResponse {
    pub session_id: Uuid,
    pub set_id: String,
    pub board: MatchBoard,
}

/// Click on a board face
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickRequest {
    pub index: usize,
}

/// Click result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickResponse {
    pub outcome: ClickOutcome,
    pub board: MatchBoard,
}

/// State of a quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSessionResponse {
    pub session_id: Uuid,
    pub set_id: String,
    pub quiz: QuizView,
}

/// Typed answer for the current card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Answer result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub outcome: SubmitOutcome,
    pub quiz: QuizView,
}

/// State of a flip review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipSessionResponse {
    pub session_id: Uuid,
    pub set_id: String,
    pub cards: Vec<FlipCardView>,
}

/// Card to turn over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub index: usize,
}
