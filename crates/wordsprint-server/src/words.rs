//! Embedded fallback word list.
//!
//! Used when `dictionary.word_list_path` is not configured. Around two
//! thousand common English words, enough that honest guesses land and
//! keyboard mashing does not. Every target word in the default level
//! sequence is included.

use wordsprint_game::WordList;

const EMBEDDED_WORDS: &str = include_str!("../data/words.txt");

/// The word list baked into the binary.
pub fn default_word_list() -> WordList {
    WordList::from_lines(EMBEDDED_WORDS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wordsprint_game::{DictionaryOracle, GameConfig};

    use super::*;

    #[test]
    fn embedded_list_is_nontrivial() {
        let list = default_word_list();
        assert!(list.len() > 1000);
    }

    #[test]
    fn embedded_list_covers_every_default_target() {
        let list = default_word_list();
        for word in &GameConfig::default().words {
            assert!(list.contains(word), "missing target {word}");
        }
    }
}
