//! Book library
//!
//! Books are read-only content: the story sentences and the vocabulary
//! they teach. Removing a book also purges its progress.

mod models;
mod storage;

pub use models::*;
pub use storage::{split_sentences, BookStorage, BookStorageError};
