//! Core types for flashcard study sessions.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default title for sets saved without one.
pub const DEFAULT_TITLE: &str = "Untitled Set";

/// Default description for sets saved without one.
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";

/// Default icon color for sets saved without one.
pub const DEFAULT_ICON_COLOR: &str = "#cccccc";

/// A single term/definition pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    pub term: String,
    pub definition: String,
}

impl FlashcardRecord {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// A named collection of flashcards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub icon_color: String,
    pub terms: Vec<FlashcardRecord>,
}

impl FlashcardSet {
    /// Create a set with default metadata.
    pub fn new(id: impl Into<String>, terms: Vec<FlashcardRecord>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            owner_id: None,
            owner_name: None,
            icon_color: DEFAULT_ICON_COLOR.to_string(),
            terms,
        }
    }
}

/// Which side of a pair a face shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceKind {
    Term,
    Definition,
}

/// One tile on the matching board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceItem {
    pub text: String,
    pub kind: FaceKind,
    /// Term text of the originating record. Duplicate terms share a pair id.
    pub pair_id: String,
}

impl FaceItem {
    /// A term and its own definition match; two faces of the same kind never do.
    pub fn pairs_with(&self, other: &FaceItem) -> bool {
        self.pair_id == other.pair_id && self.kind != other.kind
    }
}

/// Timing and sizing knobs for the study engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyTimings {
    pub pairs_per_round: usize,
    pub tick: Duration,
    pub selection_clear: Duration,
    pub mismatch_display: Duration,
    pub quiz_feedback: Duration,
}

impl Default for StudyTimings {
    fn default() -> Self {
        Self {
            pairs_per_round: 5,
            tick: Duration::from_millis(10),
            selection_clear: Duration::from_millis(500),
            mismatch_display: Duration::from_millis(500),
            quiz_feedback: Duration::from_millis(1500),
        }
    }
}
