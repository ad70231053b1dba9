//! Catalog mutation flows: create, update, delete and favorite toggle.
//!
//! Every successful mutation is followed by exactly one full refetch of the
//! list. Nothing is changed locally before the remote service has answered.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Book, BookFields, NewBook},
    repository::BookRepository,
};

use super::{editor::EditSession, library::LibraryState};

/// Yes/no question put to the user before a destructive call
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, question: &str) -> AppResult<bool>;
}

/// Always answers yes
pub struct AssumeYes;

#[async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&mut self, _question: &str) -> AppResult<bool> {
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn BookRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Refetch the list into `state`
    pub async fn refresh(&self, state: &mut LibraryState) -> AppResult<usize> {
        state.refresh(self.repository.as_ref()).await
    }

    /// Fetch the list the first time the view is shown
    pub async fn activate(&self, state: &mut LibraryState) -> Option<AppResult<usize>> {
        state.activate(self.repository.as_ref()).await
    }

    /// Create a new book. Title and author must be non-empty.
    pub async fn create(&self, state: &mut LibraryState, book: &NewBook) -> AppResult<Book> {
        book.validate()?;
        let created = self.repository.create(book).await?;
        self.refresh_after_mutation(state).await;
        Ok(created)
    }

    /// Replace the editable fields of a book. Title and author must be non-empty.
    pub async fn update(
        &self,
        state: &mut LibraryState,
        id: &str,
        fields: &BookFields,
    ) -> AppResult<Book> {
        fields.validate()?;
        let updated = self.repository.update(id, fields).await?;
        self.refresh_after_mutation(state).await;
        Ok(updated)
    }

    /// Save the draft of an edit session
    pub async fn save_edit(
        &self,
        state: &mut LibraryState,
        session: &EditSession,
    ) -> AppResult<Book> {
        self.update(state, session.id(), session.draft()).await
    }

    /// Delete a book once the user has confirmed it
    pub async fn delete(
        &self,
        state: &mut LibraryState,
        book: &Book,
        confirm: &mut dyn Confirm,
    ) -> AppResult<DeleteOutcome> {
        let question = format!("Are you sure you want to delete \"{}\"?", book.title);
        if !confirm.confirm(&question).await? {
            tracing::debug!("Delete of book id={} declined", book.id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.repository.delete(&book.id).await?;
        self.refresh_after_mutation(state).await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Send the full record with the favorite flag inverted.
    ///
    /// Returns the new flag value.
    pub async fn toggle_favorite(&self, state: &mut LibraryState, book: &Book) -> AppResult<bool> {
        let fields = book.fields().with_favorite(!book.is_favorite);
        self.repository.update(&book.id, &fields).await?;
        self.refresh_after_mutation(state).await;
        Ok(fields.is_favorite)
    }

    async fn refresh_after_mutation(&self, state: &mut LibraryState) {
        // A failed refetch is logged by the state and does not undo the mutation
        let _ = self.refresh(state).await;
    }
}
