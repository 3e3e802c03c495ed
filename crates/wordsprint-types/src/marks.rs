//! Per-letter scoring outcome for a guess.

use serde::{Deserialize, Serialize};

/// The outcome of scoring one guess letter against the target word.
///
/// Serialized lowercase on the wire (`"correct"`, `"present"`, `"absent"`),
/// which is the format stored in attempt records and returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterMark {
    /// The letter is in the target word at this exact position.
    Correct,
    /// The letter is in the target word, but at a different position.
    ///
    /// Duplicate letters are credited `Present` at most as many times as
    /// they appear among the target's unmatched positions.
    Present,
    /// The letter does not appear in the target word (or all of its
    /// occurrences are already accounted for).
    Absent,
}

impl LetterMark {
    /// Whether this mark is [`LetterMark::Correct`].
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&vec![
            LetterMark::Correct,
            LetterMark::Present,
            LetterMark::Absent,
        ])
        .unwrap();
        assert_eq!(json, r#"["correct","present","absent"]"#);
    }

    #[test]
    fn roundtrips() {
        let mark: LetterMark = serde_json::from_str(r#""present""#).unwrap();
        assert_eq!(mark, LetterMark::Present);
    }
}
