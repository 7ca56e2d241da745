//! Core flashcard study engines shared by the backend.
//!
//! Provides:
//! - Matching game (deck builder, selection state machine, round timer)
//! - Typed quiz with trimmed, case-insensitive answer grading
//! - Flip-card review
//! - Virtual-time scheduler for the feedback delays
//! - `FlashcardRepository` seam for loading sets

pub mod answer;
pub mod deck;
pub mod error;
pub mod flip;
pub mod game;
pub mod quiz;
pub mod repository;
pub mod scheduler;
pub mod selection;
pub mod timer;
pub mod types;

pub use answer::{grade_answer, normalize_answer, AnswerCheck};
pub use deck::build_deck;
pub use error::{GameError, Result};
pub use flip::{FlipCardView, FlipDeck};
pub use game::{MatchBoard, MatchGame, MatchResult};
pub use quiz::{QuizFeedback, QuizResult, QuizSession, QuizView, SubmitOutcome};
pub use repository::{FlashcardRepository, MemoryRepository, RepositoryError};
pub use scheduler::{Scheduler, TimerToken};
pub use selection::{ClickOutcome, Resolution, Selection, SelectionPhase};
pub use timer::{format_clock, format_seconds, RoundTimer, TimerState};
pub use types::{FaceItem, FaceKind, FlashcardRecord, FlashcardSet, StudyTimings};
