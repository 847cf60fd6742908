//! Data models for book content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A word taught by a book. Content-defined and never mutated by review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub word: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub example: String,
}

/// A story plus the vocabulary it teaches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sentences: Vec<String>,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyItem>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            sentences: Vec::new(),
            vocabulary: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn find_word(&self, word: &str) -> Option<&VocabularyItem> {
        self.vocabulary.iter().find(|item| item.word == word)
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            sentence_count: self.sentences.len(),
            word_count: self.vocabulary.len(),
        }
    }
}

/// Listing entry for a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub sentence_count: usize,
    pub word_count: usize,
}

/// Book ids double as file names, so only `[A-Za-z0-9_-]` is allowed
pub fn is_valid_book_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Turn a free-form name into a valid book id
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "book".to_string()
    } else {
        slug
    }
}
