//! Wordhoard: read short books and learn their vocabulary with
//! fixed-interval spaced repetition.

pub mod books;
pub mod config;
pub mod progress;
pub mod reader;
pub mod review;
pub mod speech;

pub use progress::Timestamp;

/// Current time in epoch milliseconds
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
