//! Data models for My Library

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookFields, NewBook};
