//! Storage operations for book content
//!
//! Directory structure:
//! ```text
//! {data_dir}/books/
//! └── {book-id}.json   # Book content: sentences and vocabulary
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::models::*;
use crate::progress::{ProgressStore, ProgressStoreError};

#[derive(Error, Debug)]
pub enum BookStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Progress error: {0}")]
    Progress(#[from] ProgressStoreError),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Invalid book id: {0:?}")]
    InvalidBookId(String),

    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("Unsupported book format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, BookStorageError>;

/// Storage manager for book content
pub struct BookStorage {
    books_dir: PathBuf,
}

impl BookStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            books_dir: data_dir.join("books"),
        }
    }

    fn book_path(&self, id: &str) -> Result<PathBuf> {
        if !is_valid_book_id(id) {
            return Err(BookStorageError::InvalidBookId(id.to_string()));
        }
        Ok(self.books_dir.join(format!("{}.json", id)))
    }

    /// List all readable books, sorted by title
    pub fn list_books(&self) -> Result<Vec<BookSummary>> {
        if !self.books_dir.exists() {
            return Ok(Vec::new());
        }

        let mut books = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                match read_json_book(&path) {
                    Ok(book) => books.push(book.summary()),
                    Err(e) => log::warn!("Skipping unreadable book {:?}: {}", path, e),
                }
            }
        }

        books.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        Ok(books)
    }

    /// Get a specific book
    pub fn get_book(&self, id: &str) -> Result<Book> {
        let path = self.book_path(id)?;
        if !path.exists() {
            return Err(BookStorageError::BookNotFound(id.to_string()));
        }
        read_json_book(&path)
    }

    /// Create or replace a book
    pub fn save_book(&self, book: &Book) -> Result<()> {
        validate_book(book)?;
        let path = self.book_path(&book.id)?;
        fs::create_dir_all(&self.books_dir)?;
        fs::write(&path, serde_json::to_string_pretty(book)?)?;
        Ok(())
    }

    /// Import a book from a `.json`, `.yaml`/`.yml` or plain `.txt` file
    ///
    /// Re-importing an existing id replaces the content and keeps progress.
    pub fn import_file(&self, path: &Path) -> Result<Book> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let book = match extension.as_str() {
            "json" => read_json_book(path)?,
            "yaml" | "yml" => {
                let content = fs::read_to_string(path)?;
                serde_yaml::from_str(&content)?
            }
            "txt" => {
                let content = fs::read_to_string(path)?;
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("book");
                book_from_text(stem, &content)
            }
            _ => {
                return Err(BookStorageError::UnsupportedFormat(
                    path.display().to_string(),
                ))
            }
        };

        self.save_book(&book)?;
        log::info!(
            "Imported book '{}' ({} sentences, {} words)",
            book.id,
            book.sentences.len(),
            book.vocabulary.len()
        );
        Ok(book)
    }

    /// Delete a book and purge its progress record
    pub fn remove_book(&self, id: &str, progress_store: &dyn ProgressStore) -> Result<()> {
        let path = self.book_path(id)?;
        if !path.exists() {
            return Err(BookStorageError::BookNotFound(id.to_string()));
        }

        fs::remove_file(&path)?;
        progress_store.remove(id)?;

        log::info!("Removed book '{}' and its progress", id);
        Ok(())
    }
}

fn read_json_book(path: &Path) -> Result<Book> {
    let content = fs::read_to_string(path)?;
    let book: Book = serde_json::from_str(&content)?;
    Ok(book)
}

fn validate_book(book: &Book) -> Result<()> {
    if !is_valid_book_id(&book.id) {
        return Err(BookStorageError::InvalidBookId(book.id.clone()));
    }

    let mut seen = HashSet::new();
    for item in &book.vocabulary {
        if item.word.trim().is_empty() {
            return Err(BookStorageError::InvalidVocabulary(
                "empty word".to_string(),
            ));
        }
        if !seen.insert(item.word.as_str()) {
            return Err(BookStorageError::InvalidVocabulary(format!(
                "duplicate word '{}'",
                item.word
            )));
        }
    }

    Ok(())
}

fn sentence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[^.!?\s][^.!?]*(?:[.!?]+["'”’)\]]*|$)"#).expect("valid sentence regex")
    })
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Split prose into sentences on `.`, `!` and `?`
pub fn split_sentences(text: &str) -> Vec<String> {
    sentence_regex()
        .find_iter(text)
        .map(|m| whitespace_regex().replace_all(m.as_str().trim(), " ").into_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build a book from plain text: the first line is the title, the rest is the story
fn book_from_text(file_stem: &str, content: &str) -> Book {
    let mut lines = content.lines().skip_while(|l| l.trim().is_empty());
    let first = lines.next().unwrap_or("").trim();
    let rest: Vec<&str> = lines.collect();

    let (title, body) = if rest.iter().all(|l| l.trim().is_empty()) {
        (file_stem.to_string(), first.to_string())
    } else {
        (first.to_string(), rest.join("\n"))
    };

    let mut book = Book::new(slugify(file_stem), title);
    book.sentences = split_sentences(&body);
    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{BookProgress, MemoryProgressStore};
    use tempfile::TempDir;

    fn create_test_storage() -> (BookStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = BookStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    fn sample_book(id: &str, title: &str) -> Book {
        let mut book = Book::new(id.to_string(), title.to_string());
        book.sentences = vec!["A fox saw a crow.".to_string()];
        book.vocabulary = vec![VocabularyItem {
            word: "crow".to_string(),
            meaning: "a large black bird".to_string(),
            example: "The crow sat on a branch.".to_string(),
        }];
        book
    }

    #[test]
    fn test_save_and_get_book() {
        let (storage, _temp) = create_test_storage();
        storage.save_book(&sample_book("fox", "The Fox")).unwrap();

        let book = storage.get_book("fox").unwrap();
        assert_eq!(book.title, "The Fox");
        assert_eq!(book.vocabulary.len(), 1);
    }

    #[test]
    fn test_get_missing_book() {
        let (storage, _temp) = create_test_storage();
        assert!(matches!(
            storage.get_book("nope"),
            Err(BookStorageError::BookNotFound(_))
        ));
    }

    #[test]
    fn test_list_books_sorted_and_skips_broken() {
        let (storage, temp) = create_test_storage();
        storage.save_book(&sample_book("b", "zebra stories")).unwrap();
        storage.save_book(&sample_book("a", "Apple Tales")).unwrap();
        fs::write(temp.path().join("books/broken.json"), "[").unwrap();

        let books = storage.list_books().unwrap();
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple Tales", "zebra stories"]);
        assert_eq!(books[0].sentence_count, 1);
        assert_eq!(books[0].word_count, 1);
    }

    #[test]
    fn test_rejects_duplicate_words() {
        let (storage, _temp) = create_test_storage();
        let mut book = sample_book("dup", "Dup");
        book.vocabulary.push(book.vocabulary[0].clone());

        assert!(matches!(
            storage.save_book(&book),
            Err(BookStorageError::InvalidVocabulary(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_id() {
        let (storage, _temp) = create_test_storage();
        assert!(matches!(
            storage.save_book(&sample_book("../x", "X")),
            Err(BookStorageError::InvalidBookId(_))
        ));
    }

    #[test]
    fn test_import_text_file() {
        let (storage, temp) = create_test_storage();
        let path = temp.path().join("The Crow.txt");
        fs::write(
            &path,
            "The Crow and the Pitcher\n\nA thirsty crow found a pitcher. \
             The water was low!\nWhat could it do?",
        )
        .unwrap();

        let book = storage.import_file(&path).unwrap();
        assert_eq!(book.id, "the-crow");
        assert_eq!(book.title, "The Crow and the Pitcher");
        assert_eq!(
            book.sentences,
            vec![
                "A thirsty crow found a pitcher.",
                "The water was low!",
                "What could it do?",
            ]
        );
        assert!(storage.get_book("the-crow").is_ok());
    }

    #[test]
    fn test_import_yaml_file() {
        let (storage, temp) = create_test_storage();
        let path = temp.path().join("owl.yaml");
        fs::write(
            &path,
            "id: owl\ntitle: The Owl\nsentences:\n  - The owl hooted.\nvocabulary:\n  - word: hoot\n    meaning: the cry of an owl\n",
        )
        .unwrap();

        let book = storage.import_file(&path).unwrap();
        assert_eq!(book.id, "owl");
        assert_eq!(book.find_word("hoot").unwrap().meaning, "the cry of an owl");
    }

    #[test]
    fn test_import_unsupported_format() {
        let (storage, temp) = create_test_storage();
        let path = temp.path().join("book.pdf");
        fs::write(&path, "%PDF").unwrap();

        assert!(matches!(
            storage.import_file(&path),
            Err(BookStorageError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_remove_book_purges_progress() {
        let (storage, _temp) = create_test_storage();
        let progress_store = MemoryProgressStore::new();
        storage.save_book(&sample_book("fox", "The Fox")).unwrap();

        let mut progress = BookProgress::default();
        progress.last_read_sentence = 0;
        progress_store.save("fox", &progress).unwrap();

        storage.remove_book("fox", &progress_store).unwrap();
        assert!(storage.get_book("fox").is_err());
        assert!(progress_store.is_empty());
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("Hi there. \"Who are you?\" she asked.  No end"),
            vec!["Hi there.", "\"Who are you?\"", "she asked.", "No end"]
        );
        assert!(split_sentences("   ").is_empty());
    }
}
