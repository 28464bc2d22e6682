//! Data models for Shelfmark

pub mod book;
pub mod copy;

// Re-export commonly used types
pub use book::BookTitle;
pub use copy::{BookCopy, CopyData, CopyDraft, CopyForm, CopyStatus, DeleteCopyForm};
