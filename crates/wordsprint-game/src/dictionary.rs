//! The "is this a real word" oracle boundary.
//!
//! The coordinator consults the oracle after structural validation and
//! before anything mutates, so a nonsense submission costs the player
//! nothing. The oracle itself is a dumb membership check with no state of
//! its own; the server wires in a [`WordList`] loaded from a file or the
//! embedded default list.

use std::collections::HashSet;
use std::path::Path;

/// An external oracle answering "is this a recognized English word?".
pub trait DictionaryOracle: Send + Sync {
    /// Whether `word` (any case) is a recognized word.
    fn contains(&self, word: &str) -> bool;
}

/// A dictionary backed by an in-memory set of uppercase words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build from an iterator of words; case and surrounding whitespace are
    /// normalized away, blank entries skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Build from newline-separated text (one word per line, `#` comments
    /// and blank lines ignored).
    pub fn from_lines(text: &str) -> Self {
        Self::from_words(text.lines().filter(|l| !l.trim_start().starts_with('#')))
    }

    /// Load a newline-separated word-list file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_lines(&text))
    }

    /// Number of distinct words in the list.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl DictionaryOracle for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_ascii_uppercase())
    }
}
