//! Data models for reading and vocabulary progress

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Progress for every word of a book, keyed by the word itself
pub type VocabularyProgress = BTreeMap<String, WordProgress>;

/// Spaced repetition state for a single word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    /// Set once the mastery threshold has been reached
    #[serde(default)]
    pub learned: bool,
    /// Consecutive correct answers since the last miss
    #[serde(default)]
    pub correct_count: u32,
    /// When the word was last answered
    pub last_review: Timestamp,
    /// The word is due when `now >= next_review`
    pub next_review: Timestamp,
}

impl WordProgress {
    /// State of a word that has never been answered: due right away
    pub fn new(now: Timestamp) -> Self {
        Self {
            learned: false,
            correct_count: 0,
            last_review: now,
            next_review: now,
        }
    }

    /// Check if the word is due for review at `now`
    pub fn is_due(&self, now: Timestamp) -> bool {
        !self.learned || self.next_review <= now
    }
}

/// Everything remembered about a single book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookProgress {
    /// Index of the furthest sentence read, -1 before the first one
    #[serde(default = "default_last_read_sentence")]
    pub last_read_sentence: i64,
    #[serde(default)]
    pub vocabulary: VocabularyProgress,
}

fn default_last_read_sentence() -> i64 {
    -1
}

impl Default for BookProgress {
    fn default() -> Self {
        Self {
            last_read_sentence: default_last_read_sentence(),
            vocabulary: VocabularyProgress::new(),
        }
    }
}

impl BookProgress {
    /// Number of sentences read so far; saturates on out-of-range records
    pub fn sentences_read(&self) -> usize {
        let next = self.last_read_sentence.saturating_add(1).max(0);
        usize::try_from(next).unwrap_or(usize::MAX)
    }

    /// Record that sentence `index` was read. Never moves backwards.
    ///
    /// Returns true if the position changed.
    pub fn mark_sentence_read(&mut self, index: i64) -> bool {
        if index > self.last_read_sentence {
            self.last_read_sentence = index;
            true
        } else {
            false
        }
    }
}
