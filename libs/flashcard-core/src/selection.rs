//! Selection state machine for the matching board.

use crate::error::{GameError, Result};
use crate::types::FaceItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How many faces are currently chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    Idle,
    OneChosen,
    Resolving,
}

/// Outcome of evaluating two chosen faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Resolution {
    Match {
        first: usize,
        second: usize,
        complete: bool,
    },
    Mismatch {
        first: usize,
        second: usize,
    },
}

/// What a click did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Matched face, or a pair is still being resolved.
    Ignored,
    Selected { index: usize },
    Deselected { index: usize },
    Resolved { resolution: Resolution },
}

/// Chosen, matched and mismatched face indices for one round.
#[derive(Debug, Clone)]
pub struct Selection {
    deck_len: usize,
    selected: Vec<usize>,
    matched: BTreeSet<usize>,
    incorrect: Option<(usize, usize)>,
}

impl Selection {
    pub fn new(deck_len: usize) -> Self {
        Self {
            deck_len,
            selected: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            incorrect: None,
        }
    }

    /// Apply a click on `index`.
    pub fn click(&mut self, index: usize, deck: &[FaceItem]) -> Result<ClickOutcome> {
        if index >= self.deck_len || index >= deck.len() {
            return Err(GameError::InvalidFace {
                index,
                len: self.deck_len,
            });
        }

        if self.matched.contains(&index) || self.selected.len() == 2 {
            return Ok(ClickOutcome::Ignored);
        }

        if let Some(pos) = self.selected.iter().position(|&i| i == index) {
            self.selected.remove(pos);
            return Ok(ClickOutcome::Deselected { index });
        }

        self.selected.push(index);
        if self.selected.len() < 2 {
            return Ok(ClickOutcome::Selected { index });
        }

        let (first, second) = (self.selected[0], self.selected[1]);
        let resolution = if deck[first].pairs_with(&deck[second]) {
            self.matched.insert(first);
            self.matched.insert(second);
            Resolution::Match {
                first,
                second,
                complete: self.is_complete(),
            }
        } else {
            self.incorrect = Some((first, second));
            Resolution::Mismatch { first, second }
        };

        Ok(ClickOutcome::Resolved { resolution })
    }

    /// Release the chosen faces after a resolution.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Remove the mismatch highlight.
    pub fn clear_mismatch(&mut self) {
        self.incorrect = None;
    }

    pub fn phase(&self) -> SelectionPhase {
        match self.selected.len() {
            0 => SelectionPhase::Idle,
            1 => SelectionPhase::OneChosen,
            _ => SelectionPhase::Resolving,
        }
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn matched(&self) -> &BTreeSet<usize> {
        &self.matched
    }

    pub fn incorrect(&self) -> Option<(usize, usize)> {
        self.incorrect
    }

    pub fn is_complete(&self) -> bool {
        self.deck_len > 0 && self.matched.len() == self.deck_len
    }
}
