//! Per-book learning progress
//!
//! This module provides:
//! - Word and book progress models (the persisted shape)
//! - The `ProgressStore` boundary with file-backed and in-memory stores

mod models;
mod storage;

pub use models::*;
pub use storage::{FileProgressStore, MemoryProgressStore, ProgressStore, ProgressStoreError};
