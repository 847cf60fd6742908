//! Fixed-interval spaced repetition
//!
//! Every answer is a plain "knew it" / "didn't know it" self-assessment:
//! - knew it: the streak grows; three in a row masters the word for a week,
//!   otherwise it comes back in two days
//! - didn't know it: the streak resets and the word cools down for an hour
//!
//! A missed answer does not clear `learned`. A mastered word that is missed
//! keeps `learned = true` with a one hour cooldown and a zero streak.

use serde::{Deserialize, Serialize};

use crate::books::VocabularyItem;
use crate::progress::{Timestamp, VocabularyProgress, WordProgress};

/// Consecutive correct answers needed to master a word
pub const MASTERY_THRESHOLD: u32 = 3;

pub const MINUTE_MS: i64 = 60 * 1000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Cooldown after a missed answer
pub const AGAIN_INTERVAL_MS: i64 = HOUR_MS;
/// Cooldown after a correct answer below the mastery threshold
pub const LEARNING_INTERVAL_MS: i64 = 2 * DAY_MS;
/// Cooldown once a word is mastered
pub const MASTERED_INTERVAL_MS: i64 = 7 * DAY_MS;

/// Where a word sits in the review cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WordStage {
    /// Never answered
    New,
    /// Answered at least once, not yet mastered
    CoolingDown,
    /// Reached the mastery threshold
    Mastered,
}

/// Counts over a book's vocabulary at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_words: usize,
    pub new_words: usize,
    pub cooling_down_words: usize,
    pub mastered_words: usize,
    pub due_words: usize,
}

/// Progress of `word`, or the state of a never-seen word if it has none
pub fn word_progress(progress: &VocabularyProgress, word: &str, now: Timestamp) -> WordProgress {
    progress
        .get(word)
        .copied()
        .unwrap_or_else(|| WordProgress::new(now))
}

/// Classify a word by its stored progress
pub fn word_stage(progress: &VocabularyProgress, word: &str) -> WordStage {
    match progress.get(word) {
        None => WordStage::New,
        Some(p) if p.learned => WordStage::Mastered,
        Some(_) => WordStage::CoolingDown,
    }
}

/// Vocabulary items due for review at `now`, in vocabulary order
///
/// A word is due when it is not learned yet or its review time has come.
pub fn compute_due_set<'a>(
    vocabulary: &'a [VocabularyItem],
    progress: &VocabularyProgress,
    now: Timestamp,
) -> Vec<&'a VocabularyItem> {
    vocabulary
        .iter()
        .filter(|item| word_progress(progress, &item.word, now).is_due(now))
        .collect()
}

/// Apply an answer for `word` at `now` and return its new progress
///
/// The entry is created first if the word has never been answered.
pub fn record_answer(
    word: &str,
    knew: bool,
    progress: &mut VocabularyProgress,
    now: Timestamp,
) -> WordProgress {
    let entry = progress
        .entry(word.to_string())
        .or_insert_with(|| WordProgress::new(now));

    if knew {
        entry.correct_count = entry.correct_count.saturating_add(1);
        if entry.correct_count >= MASTERY_THRESHOLD {
            entry.learned = true;
            entry.next_review = now.saturating_add(MASTERED_INTERVAL_MS);
        } else {
            entry.next_review = now.saturating_add(LEARNING_INTERVAL_MS);
        }
    } else {
        entry.correct_count = 0;
        entry.next_review = now.saturating_add(AGAIN_INTERVAL_MS);
    }
    entry.last_review = now;

    *entry
}

/// Interval that an answer would schedule for `word`: [didn't know, knew]
pub fn preview_intervals(progress: &VocabularyProgress, word: &str, now: Timestamp) -> [i64; 2] {
    let current = word_progress(progress, word, now);
    let knew = if current.correct_count.saturating_add(1) >= MASTERY_THRESHOLD {
        MASTERED_INTERVAL_MS
    } else {
        LEARNING_INTERVAL_MS
    };
    [AGAIN_INTERVAL_MS, knew]
}

/// Count words per stage and how many are due
pub fn review_stats(
    vocabulary: &[VocabularyItem],
    progress: &VocabularyProgress,
    now: Timestamp,
) -> ReviewStats {
    let mut stats = ReviewStats {
        total_words: vocabulary.len(),
        ..Default::default()
    };

    for item in vocabulary {
        match word_stage(progress, &item.word) {
            WordStage::New => stats.new_words += 1,
            WordStage::CoolingDown => stats.cooling_down_words += 1,
            WordStage::Mastered => stats.mastered_words += 1,
        }
    }
    stats.due_words = compute_due_set(vocabulary, progress, now).len();

    stats
}

/// Format an interval in milliseconds to a short human-readable string
pub fn format_interval(ms: i64) -> String {
    if ms <= 0 {
        return "now".to_string();
    }

    let minutes = ms / MINUTE_MS;
    let hours = ms / HOUR_MS;
    let days = ms / DAY_MS;

    if hours == 0 {
        format!("{}m", minutes.max(1))
    } else if days == 0 {
        format!("{}h", hours)
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
