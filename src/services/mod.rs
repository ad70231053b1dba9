//! Business logic services

pub mod catalog;
pub mod editor;
pub mod library;

use std::sync::Arc;

use crate::repository::BookRepository;

pub use catalog::{AssumeYes, CatalogService, Confirm, DeleteOutcome};
pub use editor::EditSession;
pub use library::{LibraryState, LibraryView};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: CatalogService,
}

impl Services {
    /// Create all services on top of the given repository
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self {
            catalog: CatalogService::new(repository),
        }
    }
}
