//! Walking a study session over a snapshot of due words
//!
//! The due set is captured once when the session starts and the cursor only
//! moves forward through it. Recomputing after every answer would show the
//! same unlearned word again immediately, since unlearned words are always due.

use serde::{Deserialize, Serialize};

use crate::books::VocabularyItem;

/// Aggregated view of session progress, used by the CLI summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Position within a fixed list of due words
#[derive(Debug, Clone)]
pub struct ReviewCursor {
    words: Vec<VocabularyItem>,
    index: usize,
}

impl ReviewCursor {
    /// Start a session over a snapshot of the due set
    pub fn new<'a, I>(due: I) -> Self
    where
        I: IntoIterator<Item = &'a VocabularyItem>,
    {
        Self {
            words: due.into_iter().cloned().collect(),
            index: 0,
        }
    }

    /// The word to present, or `None` once the session is complete
    pub fn current(&self) -> Option<&VocabularyItem> {
        self.words.get(self.index)
    }

    /// Move to the next word. Does nothing after completion.
    pub fn advance(&mut self) -> Option<&VocabularyItem> {
        if !self.is_complete() {
            self.index += 1;
        }
        self.current()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.words.len()
    }

    /// Zero-based index of the current word
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.words.len().saturating_sub(self.index)
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.len(),
            answered: self.index.min(self.words.len()),
            remaining: self.remaining(),
            is_complete: self.is_complete(),
        }
    }
}
