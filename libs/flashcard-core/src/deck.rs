//! Pair deck construction for the matching game.

use crate::error::{GameError, Result};
use crate::types::{FaceItem, FaceKind, FlashcardRecord};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build a shuffled matching deck from the first `pairs` records.
///
/// Each record contributes a term face and a definition face, both tagged
/// with the term text as their pair id. The full list is shuffled uniformly.
pub fn build_deck<R>(records: &[FlashcardRecord], pairs: usize, rng: &mut R) -> Result<Vec<FaceItem>>
where
    R: Rng + ?Sized,
{
    let take = pairs.min(records.len());
    if take == 0 {
        return Err(GameError::EmptySet);
    }

    let mut deck: Vec<FaceItem> = records[..take]
        .iter()
        .flat_map(|card| {
            [
                FaceItem {
                    text: card.term.clone(),
                    kind: FaceKind::Term,
                    pair_id: card.term.clone(),
                },
                FaceItem {
                    text: card.definition.clone(),
                    kind: FaceKind::Definition,
                    pair_id: card.term.clone(),
                },
            ]
        })
        .collect();

    deck.shuffle(rng);
    Ok(deck)
}
