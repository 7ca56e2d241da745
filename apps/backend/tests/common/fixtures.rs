//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

use flashcard_study_backend::models::MatchBoard;

/// Capital city pairs used across the study tests.
pub const CAPITALS: &[(&str, &str)] = &[
    ("France", "Paris"),
    ("Italy", "Rome"),
    ("Spain", "Madrid"),
    ("Germany", "Berlin"),
    ("Portugal", "Lisbon"),
    ("Austria", "Vienna"),
    ("Greece", "Athens"),
];

/// Generate `n` numbered term/definition pairs as a save request body.
pub fn save_set_request(title: Option<&str>, num_terms: usize) -> serde_json::Value {
    let terms: Vec<_> = (0..num_terms)
        .map(|i| {
            json!({
                "term": format!("Term {}", i + 1),
                "definition": format!("Definition {}", i + 1),
            })
        })
        .collect();

    match title {
        Some(t) => json!({ "title": t, "terms": terms }),
        None => json!({ "terms": terms }),
    }
}

/// Create a click request body.
pub fn click_request(index: usize) -> serde_json::Value {
    json!({ "index": index })
}

/// Create an answer request body.
pub fn answer_request(answer: &str) -> serde_json::Value {
    json!({ "answer": answer })
}

/// Create a toggle request body.
pub fn toggle_request(index: usize) -> serde_json::Value {
    json!({ "index": index })
}

/// Index pairs `(term, definition)` that solve the board.
pub fn solution(board: &MatchBoard) -> Vec<(usize, usize)> {
    board
        .faces
        .iter()
        .enumerate()
        .filter(|(_, f)| f.kind == flashcard_core::FaceKind::Term)
        .map(|(i, term)| {
            let j = board
                .faces
                .iter()
                .position(|other| term.pairs_with(other))
                .expect("every term has a definition on the board");
            (i, j)
        })
        .collect()
}

/// Two indices that do not form a pair.
pub fn wrong_pair(board: &MatchBoard) -> (usize, usize) {
    let first = &board.faces[0];
    let second = board
        .faces
        .iter()
        .position(|f| f.pair_id != first.pair_id)
        .expect("board holds at least two pairs");
    (0, second)
}

/// Generate a unique set id to avoid collisions.
pub fn unique_set_id(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
