//! Typed quiz engine.
//!
//! Cards are asked in order. Every graded answer shows feedback for a fixed
//! delay, then the quiz moves on whether or not the answer was right.

use crate::answer::grade_answer;
use crate::error::{GameError, Result};
use crate::repository::FlashcardRepository;
use crate::scheduler::{Scheduler, TimerToken};
use crate::types::{FlashcardRecord, StudyTimings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Feedback for one graded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizFeedback {
    pub correct: bool,
    /// The expected definition, as stored.
    pub expected: String,
}

impl QuizFeedback {
    /// Message shown while the feedback is on screen.
    pub fn message(&self) -> String {
        if self.correct {
            "Correct!".to_string()
        } else {
            format!("Wrong! The correct answer is: {}", self.expected)
        }
    }
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Graded { feedback: QuizFeedback },
    /// Feedback still showing, or the quiz is over.
    Ignored,
}

/// Final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

/// Render-ready snapshot of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizView {
    pub index: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    pub score: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<QuizFeedback>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QuizResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Advance;

/// One pass through a set in typed-answer mode.
#[derive(Debug, Clone)]
pub struct QuizSession {
    cards: Vec<FlashcardRecord>,
    index: usize,
    score: usize,
    completed: bool,
    feedback: Option<QuizFeedback>,
    scheduler: Scheduler<Advance>,
    advance: Option<TimerToken>,
    feedback_delay: Duration,
}

impl QuizSession {
    pub fn new(cards: Vec<FlashcardRecord>, timings: &StudyTimings) -> Result<Self> {
        if cards.is_empty() {
            return Err(GameError::EmptySet);
        }
        Ok(Self {
            cards,
            index: 0,
            score: 0,
            completed: false,
            feedback: None,
            scheduler: Scheduler::new(),
            advance: None,
            feedback_delay: timings.quiz_feedback,
        })
    }

    /// Fetch a set and start a quiz over all of its cards.
    pub async fn load<Repo>(repo: &Repo, set_id: &str, timings: &StudyTimings) -> Result<Self>
    where
        Repo: FlashcardRepository + ?Sized,
    {
        let set = repo.fetch_flashcard_set(set_id).await?;
        Self::new(set.terms, timings)
    }

    /// Grade an answer for the current card.
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        if self.completed || self.advance.is_some() {
            return SubmitOutcome::Ignored;
        }

        let card = &self.cards[self.index];
        let check = grade_answer(input, &card.definition);
        if check.is_correct {
            self.score += 1;
        }

        let feedback = QuizFeedback {
            correct: check.is_correct,
            expected: card.definition.clone(),
        };
        self.feedback = Some(feedback.clone());
        self.advance = Some(self.scheduler.schedule(self.feedback_delay, Advance));

        SubmitOutcome::Graded { feedback }
    }

    /// Let `delta` of wall time pass.
    pub fn advance(&mut self, delta: Duration) {
        for Advance in self.scheduler.advance(delta) {
            self.advance = None;
            self.feedback = None;
            if self.index + 1 < self.cards.len() {
                self.index += 1;
            } else {
                self.completed = true;
            }
        }
    }

    /// End the quiz early.
    pub fn quit(&mut self) {
        self.cancel_pending();
        self.feedback = None;
        self.completed = true;
    }

    /// Drop the pending advance. Called when the session is torn down.
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.advance.take() {
            self.scheduler.cancel(token);
        }
    }

    pub fn current_term(&self) -> Option<&str> {
        if self.completed {
            None
        } else {
            Some(&self.cards[self.index].term)
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.completed.then(|| QuizResult {
            score: self.score,
            total: self.cards.len(),
        })
    }

    pub fn view(&self) -> QuizView {
        QuizView {
            index: self.index,
            total: self.cards.len(),
            term: self.current_term().map(str::to_string),
            score: self.score,
            feedback: self.feedback.clone(),
            completed: self.completed,
            result: self.result(),
        }
    }
}
