//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised while starting or playing a study round.
///
/// `EmptySet`, `NotFound` and `Fetch` are terminal for the round: the caller
/// must abort instead of rendering a board. `InvalidFace` only rejects the
/// offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("flashcard set has no usable pairs")]
    EmptySet,

    #[error("flashcard set not found: {0}")]
    NotFound(String),

    #[error("failed to load flashcard set: {0}")]
    Fetch(String),

    #[error("face index {index} out of range for deck of {len}")]
    InvalidFace { index: usize, len: usize },
}

impl GameError {
    /// Whether the error ends the round.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InvalidFace { .. })
    }
}
