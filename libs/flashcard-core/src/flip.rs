//! Flip-card review.

use crate::error::{GameError, Result};
use crate::types::{FaceKind, FlashcardRecord};
use serde::{Deserialize, Serialize};

/// One card as currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipCardView {
    pub text: String,
    pub side: FaceKind,
}

/// Every card of a set, each showing either its term or its definition.
#[derive(Debug, Clone)]
pub struct FlipDeck {
    cards: Vec<FlashcardRecord>,
    flipped: Vec<bool>,
}

impl FlipDeck {
    pub fn new(cards: Vec<FlashcardRecord>) -> Result<Self> {
        if cards.is_empty() {
            return Err(GameError::EmptySet);
        }
        let flipped = vec![false; cards.len()];
        Ok(Self { cards, flipped })
    }

    /// Turn a card over. Returns the side now showing.
    pub fn toggle(&mut self, index: usize) -> Result<FaceKind> {
        let len = self.cards.len();
        let flipped = self
            .flipped
            .get_mut(index)
            .ok_or(GameError::InvalidFace { index, len })?;
        *flipped = !*flipped;
        Ok(side(*flipped))
    }

    /// Show every term again.
    pub fn reset(&mut self) {
        self.flipped.iter_mut().for_each(|f| *f = false);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn view(&self) -> Vec<FlipCardView> {
        self.cards
            .iter()
            .zip(&self.flipped)
            .map(|(card, &flipped)| FlipCardView {
                text: if flipped {
                    card.definition.clone()
                } else {
                    card.term.clone()
                },
                side: side(flipped),
            })
            .collect()
    }
}

fn side(flipped: bool) -> FaceKind {
    if flipped {
        FaceKind::Definition
    } else {
        FaceKind::Term
    }
}
