//! Reading a book and reviewing its vocabulary
//!
//! A `ReaderSession` owns a book's progress for the duration of a session and
//! persists it after every sentence read and every answer.

mod context;
mod session;

pub use context::{ReaderContext, Tab, MAX_SPEECH_RATE, MIN_SPEECH_RATE};
pub use session::ReaderSession;
