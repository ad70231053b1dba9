//! In-memory view state: the fetched book list, loading flag and search term

use crate::{
    error::{AppError, AppResult},
    models::Book,
    repository::BookRepository,
};

/// What the catalog view shows, evaluated in priority order
#[derive(Debug, PartialEq, Eq)]
pub enum LibraryView<'a> {
    Loading,
    EmptyCatalog,
    NoResults(&'a str),
    Grid(Vec<&'a Book>),
}

#[derive(Debug)]
pub struct LibraryState {
    books: Vec<Book>,
    is_loading: bool,
    search_term: String,
    activated: bool,
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryState {
    /// Initial state: loading, nothing fetched yet
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            is_loading: true,
            search_term: String::new(),
            activated: false,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replace the search term; never touches the network
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Books whose title contains the search term, case-insensitively, in list order
    pub fn filtered_books(&self) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| book.title_matches(&self.search_term))
            .collect()
    }

    pub fn view(&self) -> LibraryView<'_> {
        if self.is_loading {
            return LibraryView::Loading;
        }
        if self.books.is_empty() {
            return LibraryView::EmptyCatalog;
        }
        let filtered = self.filtered_books();
        if filtered.is_empty() {
            LibraryView::NoResults(&self.search_term)
        } else {
            LibraryView::Grid(filtered)
        }
    }

    /// Book by id among everything fetched
    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Book at a 1-based position of the filtered grid
    pub fn nth_filtered(&self, position: usize) -> Option<&Book> {
        position
            .checked_sub(1)
            .and_then(|index| self.filtered_books().get(index).copied())
    }

    pub fn book(&self, id: &str) -> AppResult<&Book> {
        self.find(id)
            .ok_or_else(|| AppError::NotFound(format!("No book with id \"{}\"", id)))
    }

    pub fn book_at(&self, position: usize) -> AppResult<&Book> {
        self.nth_filtered(position)
            .ok_or_else(|| AppError::NotFound(format!("No book at position {}", position)))
    }

    /// Refetch the full list.
    ///
    /// On failure the current books are kept. The loading flag is cleared
    /// whatever the outcome.
    pub async fn refresh(&mut self, repository: &dyn BookRepository) -> AppResult<usize> {
        self.is_loading = true;
        let result = repository.list().await;
        self.is_loading = false;

        match result {
            Ok(books) => {
                self.books = books;
                Ok(self.books.len())
            }
            Err(e) => {
                tracing::error!("Error fetching books: {}", e);
                Err(e)
            }
        }
    }

    /// First activation fetches the list; later calls do nothing
    pub async fn activate(&mut self, repository: &dyn BookRepository) -> Option<AppResult<usize>> {
        if self.activated {
            return None;
        }
        self.activated = true;
        Some(self.refresh(repository).await)
    }
}
