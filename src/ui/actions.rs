//! Flow boundary: run a catalog flow and report the outcome to the user.
//!
//! Errors stop here. They are logged and turned into a notification; the
//! returned flag tells the caller whether its editing surface may close.

use crate::{
    error::AppError,
    models::{Book, NewBook},
    services::{CatalogService, Confirm, DeleteOutcome, EditSession, LibraryState},
};

use super::notify::Notifier;

fn report_failure(notifier: &mut dyn Notifier, flow: &str, err: &AppError, message: &str) {
    if err.is_local() {
        notifier.warning(message);
    } else {
        tracing::error!("Error in {}: {}", flow, err);
        notifier.error(message);
    }
}

/// Report a failed lookup of a book the user addressed
pub fn report_lookup(notifier: &mut dyn Notifier, err: &AppError) {
    match err {
        AppError::NotFound(what) => report_failure(notifier, "lookup", err, what),
        _ => report_failure(notifier, "lookup", err, "Failed to load books"),
    }
}

pub async fn create_book(
    catalog: &CatalogService,
    state: &mut LibraryState,
    form: &NewBook,
    notifier: &mut dyn Notifier,
) -> bool {
    match catalog.create(state, form).await {
        Ok(_) => {
            notifier.success("Book created successfully!");
            true
        }
        Err(e @ AppError::Validation(_)) => {
            report_failure(notifier, "create", &e, "Please fill in the Title and Author!");
            false
        }
        Err(e) => {
            report_failure(notifier, "create", &e, "Failed to create book. Try again later.");
            false
        }
    }
}

pub async fn save_edit(
    catalog: &CatalogService,
    state: &mut LibraryState,
    session: &EditSession,
    notifier: &mut dyn Notifier,
) -> bool {
    match catalog.save_edit(state, session).await {
        Ok(_) => {
            notifier.success("Book updated successfully!");
            true
        }
        Err(e @ AppError::Validation(_)) => {
            report_failure(notifier, "save changes", &e, "Title and Author are required!");
            false
        }
        Err(e) => {
            report_failure(notifier, "save changes", &e, "Failed to update book");
            false
        }
    }
}

pub async fn delete_book(
    catalog: &CatalogService,
    state: &mut LibraryState,
    book: &Book,
    confirm: &mut dyn Confirm,
    notifier: &mut dyn Notifier,
) -> bool {
    match catalog.delete(state, book, confirm).await {
        Ok(DeleteOutcome::Deleted) => {
            notifier.success("Book deleted successfully!");
            true
        }
        Ok(DeleteOutcome::Cancelled) => false,
        Err(e) => {
            report_failure(notifier, "delete", &e, "Book delete failed");
            false
        }
    }
}

pub async fn toggle_favorite(
    catalog: &CatalogService,
    state: &mut LibraryState,
    book: &Book,
    notifier: &mut dyn Notifier,
) -> bool {
    match catalog.toggle_favorite(state, book).await {
        Ok(true) => {
            notifier.success("Added to favorites");
            true
        }
        Ok(false) => {
            notifier.info("Deleted from favorites");
            true
        }
        Err(e) => {
            report_failure(notifier, "toggle favorite", &e, "Failed to update favorite status");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        error::TransportError,
        repository::MockBookRepository,
        services::AssumeYes,
        ui::notify::{Level, Toast},
    };

    fn liked() -> Book {
        Book {
            id: "5".to_string(),
            title: "Hyperion".to_string(),
            author: "Dan Simmons".to_string(),
            description: None,
            cover_image: None,
            is_favorite: true,
        }
    }

    #[tokio::test]
    async fn test_empty_title_warns() {
        let mut repo = MockBookRepository::new();
        repo.expect_create().never();
        let catalog = CatalogService::new(Arc::new(repo));

        let form = NewBook {
            title: String::new(),
            author: "King".to_string(),
            ..Default::default()
        };
        let mut state = LibraryState::new();
        let mut toasts: Vec<Toast> = Vec::new();

        assert!(!create_book(&catalog, &mut state, &form, &mut toasts).await);
        assert_eq!(
            toasts,
            vec![Toast::new(Level::Warning, "Please fill in the Title and Author!")]
        );
    }

    #[test]
    fn test_missing_book_warns() {
        let mut toasts: Vec<Toast> = Vec::new();
        report_lookup(&mut toasts, &AppError::NotFound("No book at position 4".to_string()));
        report_lookup(&mut toasts, &AppError::Transport(TransportError::Timeout));
        assert_eq!(
            toasts,
            vec![
                Toast::new(Level::Warning, "No book at position 4"),
                Toast::new(Level::Error, "Failed to load books"),
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_one_error_toast() {
        let mut repo = MockBookRepository::new();
        repo.expect_update()
            .returning(|_, _| Err(AppError::Transport(TransportError::Timeout)));
        let catalog = CatalogService::new(Arc::new(repo));

        let mut state = LibraryState::new();
        let mut toasts: Vec<Toast> = Vec::new();
        let session = EditSession::open(&liked());

        assert!(!save_edit(&catalog, &mut state, &session, &mut toasts).await);
        assert_eq!(toasts, vec![Toast::new(Level::Error, "Failed to update book")]);
    }

    #[tokio::test]
    async fn test_unfavorite_is_info() {
        let mut repo = MockBookRepository::new();
        repo.expect_update().returning(|_, _| Ok(liked()));
        repo.expect_list().returning(|| Ok(vec![liked()]));
        let catalog = CatalogService::new(Arc::new(repo));

        let mut state = LibraryState::new();
        let mut toasts: Vec<Toast> = Vec::new();

        assert!(toggle_favorite(&catalog, &mut state, &liked(), &mut toasts).await);
        assert_eq!(toasts, vec![Toast::new(Level::Info, "Deleted from favorites")]);
    }

    #[tokio::test]
    async fn test_delete_success_toast() {
        let mut repo = MockBookRepository::new();
        repo.expect_delete().returning(|_| Ok(()));
        repo.expect_list().returning(|| Ok(Vec::new()));
        let catalog = CatalogService::new(Arc::new(repo));

        let mut state = LibraryState::new();
        let mut toasts: Vec<Toast> = Vec::new();

        assert!(delete_book(&catalog, &mut state, &liked(), &mut AssumeYes, &mut toasts).await);
        assert_eq!(toasts, vec![Toast::new(Level::Success, "Book deleted successfully!")]);
    }
}
