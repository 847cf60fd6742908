pub mod books;
pub mod due;
pub mod import;
pub mod read;
pub mod remove;
pub mod stats;
pub mod study;
