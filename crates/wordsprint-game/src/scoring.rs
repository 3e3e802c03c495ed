//! Pure two-pass guess scoring.
//!
//! The algorithm credits duplicate guess letters `Present` at most as many
//! times as they appear among the target's unmatched positions, which is the
//! standard Wordle fairness rule:
//!
//! 1. First pass: mark `Correct` wherever guess and target agree, consuming
//!    those target positions.
//! 2. Build a multiset of target letters at unconsumed positions only.
//! 3. Second pass over non-`Correct` positions: mark `Present` while the
//!    letter has remaining count in the multiset, else `Absent`.
//!
//! No state, no side effects, linear in word length.

use std::collections::HashMap;

use wordsprint_types::LetterMark;

/// Score `guess` against `target`, one mark per position.
///
/// Callers must have validated that both words have the same length (the
/// coordinator rejects mismatched lengths before scoring); positions beyond
/// the shorter word are not scored.
pub fn score(target: &str, guess: &str) -> Vec<LetterMark> {
    let target: Vec<char> = target.chars().collect();
    let guess: Vec<char> = guess.chars().collect();

    let mut marks: Vec<LetterMark> = target
        .iter()
        .zip(&guess)
        .map(|(t, g)| {
            if t == g {
                LetterMark::Correct
            } else {
                LetterMark::Absent
            }
        })
        .collect();

    let mut remaining: HashMap<char, u32> = HashMap::new();
    for (t, mark) in target.iter().zip(&marks) {
        if !mark.is_correct() {
            let count = remaining.entry(*t).or_insert(0);
            *count = count.saturating_add(1);
        }
    }

    for (g, mark) in guess.iter().zip(marks.iter_mut()) {
        if mark.is_correct() {
            continue;
        }
        if let Some(count) = remaining.get_mut(g)
            && *count > 0
        {
            *count = count.saturating_sub(1);
            *mark = LetterMark::Present;
        }
    }

    marks
}
