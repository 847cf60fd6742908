//! Vocabulary review for Wordhoard
//!
//! This module provides:
//! - The fixed-interval spaced repetition schedule
//! - Due-set computation and answer recording
//! - A cursor for walking a study session

pub mod algorithm;
pub mod session;

pub use algorithm::{
    compute_due_set, record_answer, review_stats, word_progress, word_stage, ReviewStats,
    WordStage,
};
pub use session::{ReviewCursor, SessionProgress};
