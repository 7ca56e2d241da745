//! Matching game controller.
//!
//! Composes the deck builder, selection state machine, round timer and the
//! one-shot clears into a single reducer. Time enters only through
//! [`MatchGame::advance`].

use crate::deck::build_deck;
use crate::error::Result;
use crate::repository::FlashcardRepository;
use crate::scheduler::{Scheduler, TimerToken};
use crate::selection::{ClickOutcome, Resolution, Selection, SelectionPhase};
use crate::timer::{format_clock, format_seconds, RoundTimer};
use crate::types::{FaceItem, FlashcardRecord, StudyTimings};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchTimeout {
    ClearSelection,
    ClearMismatch,
}

/// Final report of a completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub elapsed_ms: u64,
    /// `mm:ss:hh`
    pub clock: String,
    /// Seconds with two decimals.
    pub seconds: String,
}

impl MatchResult {
    fn from_elapsed(elapsed: Duration) -> Self {
        Self {
            elapsed_ms: elapsed.as_millis() as u64,
            clock: format_clock(elapsed),
            seconds: format_seconds(elapsed),
        }
    }
}

/// Render-ready snapshot of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBoard {
    pub faces: Vec<FaceItem>,
    pub phase: SelectionPhase,
    pub selected: Vec<usize>,
    pub matched: Vec<usize>,
    pub incorrect: Vec<usize>,
    pub running: bool,
    pub elapsed_ms: u64,
    pub clock: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
}

/// One round of the matching game.
#[derive(Debug, Clone)]
pub struct MatchGame {
    deck: Vec<FaceItem>,
    selection: Selection,
    timer: RoundTimer,
    scheduler: Scheduler<MatchTimeout>,
    timings: StudyTimings,
    selection_clear: Option<TimerToken>,
    mismatch_clear: Option<TimerToken>,
    result: Option<MatchResult>,
}

impl MatchGame {
    /// Build a round from loaded records and start its timer.
    pub fn new<R>(records: &[FlashcardRecord], rng: &mut R, timings: StudyTimings) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let deck = build_deck(records, timings.pairs_per_round, rng)?;
        Ok(Self::from_deck(deck, timings))
    }

    /// Start a round over an already built deck.
    pub fn from_deck(deck: Vec<FaceItem>, timings: StudyTimings) -> Self {
        Self {
            selection: Selection::new(deck.len()),
            timer: RoundTimer::start(timings.tick),
            scheduler: Scheduler::new(),
            timings,
            selection_clear: None,
            mismatch_clear: None,
            result: None,
            deck,
        }
    }

    /// Fetch a set and start a round over it.
    ///
    /// Missing sets, store failures and empty sets abort before any board exists.
    pub async fn load<Repo, R>(
        repo: &Repo,
        set_id: &str,
        rng: &mut R,
        timings: StudyTimings,
    ) -> Result<Self>
    where
        Repo: FlashcardRepository + ?Sized,
        R: Rng + ?Sized,
    {
        let set = repo.fetch_flashcard_set(set_id).await?;
        Self::new(&set.terms, rng, timings)
    }

    /// Route a click from the board.
    pub fn click(&mut self, index: usize) -> Result<ClickOutcome> {
        let outcome = self.selection.click(index, &self.deck)?;

        if let ClickOutcome::Resolved { resolution } = outcome {
            match resolution {
                Resolution::Match { complete, .. } => {
                    if complete && self.timer.stop() {
                        self.result = Some(MatchResult::from_elapsed(self.timer.elapsed()));
                    }
                }
                Resolution::Mismatch { .. } => {
                    if let Some(token) = self.mismatch_clear.take() {
                        self.scheduler.cancel(token);
                    }
                    self.mismatch_clear = Some(
                        self.scheduler
                            .schedule(self.timings.mismatch_display, MatchTimeout::ClearMismatch),
                    );
                }
            }
            if let Some(token) = self.selection_clear.take() {
                self.scheduler.cancel(token);
            }
            self.selection_clear = Some(
                self.scheduler
                    .schedule(self.timings.selection_clear, MatchTimeout::ClearSelection),
            );
        }

        Ok(outcome)
    }

    /// Let `delta` of wall time pass.
    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
        for timeout in self.scheduler.advance(delta) {
            match timeout {
                MatchTimeout::ClearSelection => {
                    self.selection.clear_selection();
                    self.selection_clear = None;
                }
                MatchTimeout::ClearMismatch => {
                    self.selection.clear_mismatch();
                    self.mismatch_clear = None;
                }
            }
        }
    }

    /// Drop pending clears. Called when the round is torn down.
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.selection_clear.take() {
            self.scheduler.cancel(token);
        }
        if let Some(token) = self.mismatch_clear.take() {
            self.scheduler.cancel(token);
        }
        self.scheduler.cancel_all();
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn deck(&self) -> &[FaceItem] {
        &self.deck
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn board(&self) -> MatchBoard {
        let elapsed = self.timer.elapsed();
        MatchBoard {
            faces: self.deck.clone(),
            phase: self.selection.phase(),
            selected: self.selection.selected().to_vec(),
            matched: self.selection.matched().iter().copied().collect(),
            incorrect: self
                .selection
                .incorrect()
                .map(|(a, b)| vec![a, b])
                .unwrap_or_default(),
            running: self.timer.is_running(),
            elapsed_ms: elapsed.as_millis() as u64,
            clock: format_clock(elapsed),
            result: self.result.clone(),
        }
    }
}
