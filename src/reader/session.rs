//! Reader session: one opened book, its progress and its interface state

use crate::books::{Book, VocabularyItem};
use crate::progress::{BookProgress, ProgressStore, Timestamp, WordProgress};
use crate::review::{self, ReviewCursor, ReviewStats};
use crate::speech::Speaker;

use super::context::{ReaderContext, Tab};

/// A book opened for reading and review
///
/// The in-memory progress is authoritative for the whole session. A failed
/// save is logged and remembered, never fatal.
pub struct ReaderSession<'a> {
    book: Book,
    progress: BookProgress,
    store: &'a dyn ProgressStore,
    context: ReaderContext,
    last_save_error: Option<String>,
}

impl<'a> ReaderSession<'a> {
    /// Open `book`, loading its progress from `store`
    pub fn open(book: Book, store: &'a dyn ProgressStore) -> Self {
        let progress = store.load(&book.id);
        log::debug!(
            "Opened '{}' at sentence {} with {} tracked words",
            book.id,
            progress.last_read_sentence,
            progress.vocabulary.len()
        );

        Self {
            book,
            progress,
            store,
            context: ReaderContext::default(),
            last_save_error: None,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn progress(&self) -> &BookProgress {
        &self.progress
    }

    pub fn context(&self) -> &ReaderContext {
        &self.context
    }

    /// Message of the most recent failed save, cleared by the next success
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    // ==================== Reading ====================

    /// Index of the first unread sentence, `None` when the book is finished
    pub fn current_sentence_index(&self) -> Option<usize> {
        let next = self.progress.sentences_read();
        (next < self.book.sentences.len()).then_some(next)
    }

    pub fn current_sentence(&self) -> Option<&str> {
        self.current_sentence_index()
            .map(|i| self.book.sentences[i].as_str())
    }

    /// Record that sentence `index` has been read and persist
    ///
    /// The reading position never moves backwards; indices past the end
    /// count as the last sentence. Returns true if the position advanced.
    pub fn mark_sentence_read(&mut self, index: usize) -> bool {
        let Some(last) = self.book.sentences.len().checked_sub(1) else {
            return false;
        };

        let index = index.min(last) as i64;
        let advanced = self.progress.mark_sentence_read(index);
        self.persist();
        advanced
    }

    /// Return the next unread sentence and mark it read
    pub fn read_next(&mut self) -> Option<String> {
        let index = self.current_sentence_index()?;
        let sentence = self.book.sentences[index].clone();
        self.mark_sentence_read(index);
        Some(sentence)
    }

    // ==================== Review ====================

    /// Words due at `now`, in vocabulary order
    pub fn due_words(&self, now: Timestamp) -> Vec<&VocabularyItem> {
        review::compute_due_set(&self.book.vocabulary, &self.progress.vocabulary, now)
    }

    /// Start a review over a fresh snapshot of the due words
    pub fn start_review(&mut self, now: Timestamp) -> ReviewCursor {
        self.context.set_tab(Tab::Review);
        self.context.card_flipped = false;
        ReviewCursor::new(review::compute_due_set(
            &self.book.vocabulary,
            &self.progress.vocabulary,
            now,
        ))
    }

    /// Record a self-assessed answer for `word` and persist
    pub fn answer(&mut self, word: &str, knew: bool, now: Timestamp) -> WordProgress {
        if self.book.find_word(word).is_none() {
            log::debug!("Answer for '{}', which is not in '{}'", word, self.book.id);
        }

        let result = review::record_answer(word, knew, &mut self.progress.vocabulary, now);
        log::debug!(
            "Answered '{}' ({}): streak {}, learned {}",
            word,
            if knew { "knew" } else { "again" },
            result.correct_count,
            result.learned
        );

        self.context.card_flipped = false;
        self.persist();
        result
    }

    /// Progress of `word`, with the never-seen default for untracked words
    pub fn word_progress(&self, word: &str, now: Timestamp) -> WordProgress {
        review::word_progress(&self.progress.vocabulary, word, now)
    }

    pub fn stats(&self, now: Timestamp) -> ReviewStats {
        review::review_stats(&self.book.vocabulary, &self.progress.vocabulary, now)
    }

    // ==================== Interface state ====================

    pub fn set_tab(&mut self, tab: Tab) {
        self.context.set_tab(tab);
    }

    pub fn set_speech_rate(&mut self, rate: f32) {
        self.context.set_speech_rate(rate);
    }

    pub fn flip_card(&mut self) -> bool {
        self.context.flip_card()
    }

    /// Speak `text` at the session's rate. Failures are logged and ignored.
    pub fn speak(&self, speaker: &dyn Speaker, text: &str) -> bool {
        match speaker.speak(text, self.context.speech_rate) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Speech failed: {}", e);
                false
            }
        }
    }

    fn persist(&mut self) {
        match self.store.save(&self.book.id, &self.progress) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                log::error!("Failed to save progress for '{}': {}", self.book.id, e);
                self.last_save_error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::progress::{FileProgressStore, MemoryProgressStore};
    use crate::speech::{SilentSpeaker, SpeechError};
    use tempfile::TempDir;

    fn sample_book() -> Book {
        let mut book = Book::new("crow".to_string(), "The Crow".to_string());
        book.sentences = vec![
            "A crow was thirsty.".to_string(),
            "It found a pitcher.".to_string(),
            "It dropped in pebbles.".to_string(),
        ];
        book.vocabulary = ["thirsty", "pitcher", "pebble"]
            .iter()
            .map(|w| VocabularyItem {
                word: w.to_string(),
                meaning: format!("meaning of {}", w),
                example: String::new(),
            })
            .collect();
        book
    }

    struct FailingSpeaker;

    impl Speaker for FailingSpeaker {
        fn speak(&self, text: &str, _rate: f32) -> Result<(), SpeechError> {
            Err(SpeechError::ProgramNotFound(text.to_string()))
        }
    }

    #[test]
    fn test_reading_advances_and_persists() {
        let store = MemoryProgressStore::new();
        let mut session = ReaderSession::open(sample_book(), &store);

        assert_eq!(session.current_sentence_index(), Some(0));
        assert_eq!(session.read_next().as_deref(), Some("A crow was thirsty."));
        assert_eq!(session.current_sentence(), Some("It found a pitcher."));
        assert_eq!(store.load("crow").last_read_sentence, 0);
    }

    #[test]
    fn test_reading_position_never_moves_back() {
        let store = MemoryProgressStore::new();
        let mut session = ReaderSession::open(sample_book(), &store);

        assert!(session.mark_sentence_read(1));
        assert!(!session.mark_sentence_read(0));
        assert_eq!(session.progress().last_read_sentence, 1);

        // Past the end counts as the last sentence
        assert!(session.mark_sentence_read(99));
        assert_eq!(session.progress().last_read_sentence, 2);
        assert_eq!(session.current_sentence_index(), None);
        assert!(session.read_next().is_none());
    }

    #[test]
    fn test_out_of_range_saved_position_does_not_panic() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("progress");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("crow.json"),
            r#"{"lastReadSentence": 9223372036854775807, "vocabulary": {}}"#,
        )
        .unwrap();

        let store = FileProgressStore::new(temp.path().to_path_buf());
        let mut session = ReaderSession::open(sample_book(), &store);
        assert_eq!(session.progress().last_read_sentence, i64::MAX);
        assert_eq!(session.current_sentence_index(), None);
        assert!(session.current_sentence().is_none());
        assert!(session.read_next().is_none());
        assert!(!session.mark_sentence_read(0));
    }

    #[test]
    fn test_empty_book_has_nothing_to_read() {
        let store = MemoryProgressStore::new();
        let book = Book::new("empty".to_string(), "Empty".to_string());
        let mut session = ReaderSession::open(book, &store);

        assert!(!session.mark_sentence_read(0));
        assert_eq!(session.progress().last_read_sentence, -1);
    }

    #[test]
    fn test_answers_are_persisted() {
        let store = MemoryProgressStore::new();
        let mut session = ReaderSession::open(sample_book(), &store);

        session.answer("pitcher", true, 1000);
        let saved = store.load("crow");
        assert_eq!(saved.vocabulary["pitcher"].correct_count, 1);

        // Reopening sees the saved progress
        let reopened = ReaderSession::open(sample_book(), &store);
        assert_eq!(reopened.word_progress("pitcher", 0).correct_count, 1);
    }

    #[test]
    fn test_failed_save_keeps_session_going() {
        let store = MemoryProgressStore::new();
        let mut session = ReaderSession::open(sample_book(), &store);
        store.set_fail_saves(true);

        let result = session.answer("pebble", true, 0);
        assert_eq!(result.correct_count, 1);
        assert!(session.last_save_error().is_some());
        assert_eq!(session.progress().vocabulary["pebble"].correct_count, 1);

        store.set_fail_saves(false);
        session.answer("pebble", true, 1);
        assert!(session.last_save_error().is_none());
        assert_eq!(store.load("crow").vocabulary["pebble"].correct_count, 2);
    }

    #[test]
    fn test_review_session_over_snapshot() {
        let store = MemoryProgressStore::new();
        let mut session = ReaderSession::open(sample_book(), &store);
        for now in [0, 1, 2] {
            session.answer("thirsty", true, now);
        }

        let mut cursor = session.start_review(10);
        assert_eq!(session.context().tab, Tab::Review);
        assert_eq!(cursor.len(), 2);

        let mut answered = Vec::new();
        while let Some(item) = cursor.current() {
            let word = item.word.clone();
            session.answer(&word, false, 20);
            answered.push(word);
            cursor.advance();
        }

        assert_eq!(answered, vec!["pitcher", "pebble"]);
        assert!(cursor.is_complete());
        assert_eq!(session.stats(20).cooling_down_words, 2);
    }

    #[test]
    fn test_answer_unflips_card() {
        let store = MemoryProgressStore::new();
        let mut session = ReaderSession::open(sample_book(), &store);

        assert!(session.flip_card());
        session.answer("thirsty", true, 0);
        assert!(!session.context().card_flipped);
    }

    #[test]
    fn test_speech_is_best_effort() {
        let store = MemoryProgressStore::new();
        let mut session = ReaderSession::open(sample_book(), &store);
        session.set_speech_rate(1.25);

        assert!(session.speak(&SilentSpeaker, "hello"));
        assert!(!session.speak(&FailingSpeaker, "hello"));
    }
}
