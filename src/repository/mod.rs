//! Repository layer for remote catalog operations

pub mod books;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookFields, NewBook},
};

pub use books::HttpBookRepository;

/// The four operations of the remote catalog.
///
/// Implementations never retry; every failure is returned once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, in the order the service returns them
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Create a book; the service assigns its id
    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Replace the editable fields of the book identified by `id`
    async fn update(&self, id: &str, fields: &BookFields) -> AppResult<Book>;

    /// Remove the book identified by `id`
    async fn delete(&self, id: &str) -> AppResult<()>;
}
