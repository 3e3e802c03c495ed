//! Append-only attempt records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marks::LetterMark;

/// One scored guess for a (player, level) pair.
///
/// Records are appended to the player's per-level attempt log in submission
/// order and never mutated afterwards. The stored JSON is exactly what
/// `GET /api/level_state` returns in its `attempts` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// The submitted guess, normalized to uppercase.
    pub guess: String,
    /// Per-letter outcome, one mark per guess letter.
    pub result: Vec<LetterMark>,
    /// Whether every position scored [`LetterMark::Correct`].
    pub is_correct: bool,
    /// When the attempt was recorded.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl AttemptRecord {
    /// Build a record from a scored guess, stamped with the current time.
    pub fn new(guess: impl Into<String>, result: Vec<LetterMark>) -> Self {
        let is_correct = !result.is_empty() && result.iter().all(|m| m.is_correct());
        Self {
            guess: guess.into(),
            result,
            is_correct,
            submitted_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn correctness_derived_from_marks() {
        let rec = AttemptRecord::new("TRUCK", vec![LetterMark::Correct; 5]);
        assert!(rec.is_correct);

        let rec = AttemptRecord::new(
            "TRACK",
            vec![
                LetterMark::Correct,
                LetterMark::Correct,
                LetterMark::Absent,
                LetterMark::Correct,
                LetterMark::Correct,
            ],
        );
        assert!(!rec.is_correct);
    }

    #[test]
    fn empty_result_is_never_correct() {
        let rec = AttemptRecord::new("", Vec::new());
        assert!(!rec.is_correct);
    }

    #[test]
    fn deserializes_record_without_timestamp() {
        // Records written before the timestamp field existed must still parse.
        let json = r#"{"guess":"PLANE","result":["absent","absent","absent","absent","absent"],"is_correct":false}"#;
        let rec: AttemptRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.guess, "PLANE");
        assert!(rec.submitted_at.is_none());
    }
}
