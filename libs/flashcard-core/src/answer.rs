//! Answer grading for typed quiz sessions.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the expected definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCheck {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer.
    pub typed_normalized: String,
    /// Normalized expected answer.
    pub expected_normalized: String,
}

/// Trim surrounding whitespace and lowercase.
///
/// Inner whitespace and punctuation are kept as typed.
pub fn normalize_answer(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Compare a typed answer to the expected one.
pub fn grade_answer(typed: &str, expected: &str) -> AnswerCheck {
    let typed_normalized = normalize_answer(typed);
    let expected_normalized = normalize_answer(expected);

    AnswerCheck {
        is_correct: typed_normalized == expected_normalized,
        typed_normalized,
        expected_normalized,
    }
}
