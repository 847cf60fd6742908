//! Storage operations for book progress
//!
//! Directory structure:
//! ```text
//! {data_dir}/progress/
//! └── {book-id}.json   # BookProgress for one book
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::models::BookProgress;
use crate::books::is_valid_book_id;

#[derive(Error, Debug)]
pub enum ProgressStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid book id: {0:?}")]
    InvalidBookId(String),

    #[error("Progress store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, ProgressStoreError>;

/// Durable per-book progress persistence
///
/// `load` never fails: a record that is missing, unreadable or corrupt is
/// reported and replaced by the default progress.
pub trait ProgressStore {
    fn load(&self, book_id: &str) -> BookProgress;

    fn save(&self, book_id: &str, progress: &BookProgress) -> Result<()>;

    /// Purge the progress record of a book. Missing records are not an error.
    fn remove(&self, book_id: &str) -> Result<()>;
}

/// Progress stored as one JSON file per book
pub struct FileProgressStore {
    progress_dir: PathBuf,
}

impl FileProgressStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            progress_dir: data_dir.join("progress"),
        }
    }

    fn progress_path(&self, book_id: &str) -> Result<PathBuf> {
        if !is_valid_book_id(book_id) {
            return Err(ProgressStoreError::InvalidBookId(book_id.to_string()));
        }
        Ok(self.progress_dir.join(format!("{}.json", book_id)))
    }

    fn read(&self, book_id: &str) -> Result<Option<BookProgress>> {
        let path = self.progress_path(book_id)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let progress: BookProgress = serde_json::from_str(&content)?;
        Ok(Some(progress))
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self, book_id: &str) -> BookProgress {
        match self.read(book_id) {
            Ok(Some(progress)) => progress,
            Ok(None) => BookProgress::default(),
            Err(e) => {
                log::warn!("Discarding unreadable progress for '{}': {}", book_id, e);
                BookProgress::default()
            }
        }
    }

    fn save(&self, book_id: &str, progress: &BookProgress) -> Result<()> {
        let path = self.progress_path(book_id)?;
        fs::create_dir_all(&self.progress_dir)?;

        // Write-then-rename so a crash never leaves a truncated record
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(progress)?)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    fn remove(&self, book_id: &str) -> Result<()> {
        let path = self.progress_path(book_id)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Progress kept in memory only
#[derive(Default)]
pub struct MemoryProgressStore {
    records: RefCell<HashMap<String, BookProgress>>,
    fail_saves: Cell<bool>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of books with a stored record
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self, book_id: &str) -> BookProgress {
        self.records
            .borrow()
            .get(book_id)
            .cloned()
            .unwrap_or_default()
    }

    fn save(&self, book_id: &str, progress: &BookProgress) -> Result<()> {
        if self.fail_saves.get() {
            return Err(ProgressStoreError::Unavailable(
                "saves disabled".to_string(),
            ));
        }
        self.records
            .borrow_mut()
            .insert(book_id.to_string(), progress.clone());
        Ok(())
    }

    fn remove(&self, book_id: &str) -> Result<()> {
        self.records.borrow_mut().remove(book_id);
        Ok(())
    }
}
