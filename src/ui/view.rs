//! Text rendering of the catalog: header, book cards and the list view

use crate::{
    models::Book,
    services::{LibraryState, LibraryView},
};

pub const TITLE: &str = "My Library";
pub const FOOTER: &str = "© 2026 My Library App";

pub const LOADING: &str = "Loading books...";
pub const EMPTY_CATALOG: &str = "The book list is empty. Create your first one!";

pub fn no_results(term: &str) -> String {
    format!("No results for \"{}\"", term)
}

pub fn header() -> String {
    let rule = "=".repeat(40);
    format!("{rule}\n{TITLE}\n{rule}\n")
}

pub fn footer() -> String {
    format!("{}\n{}\n", "-".repeat(40), FOOTER)
}

fn favorite_badge(book: &Book) -> &'static str {
    if book.is_favorite {
        "♥ Liked"
    } else {
        "♡ Like"
    }
}

/// One book card; `position` is the number the shell addresses it by
pub fn card(position: usize, book: &Book, placeholder_cover: &str) -> String {
    let description = match book.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => format!("    {}\n", description),
        None => String::new(),
    };
    format!(
        "[{}] {}  ({})\n    Author: {}\n    Cover:  {}\n{}    id: {}\n",
        position,
        book.title,
        favorite_badge(book),
        book.author,
        book.cover_or(placeholder_cover),
        description,
        book.id
    )
}

/// Full detail of a single book
pub fn details(book: &Book, placeholder_cover: &str) -> String {
    format!(
        "Title:       {}\nAuthor:      {}\nDescription: {}\nCover:       {}\nFavorite:    {}\nId:          {}\n",
        book.title,
        book.author,
        book.description.as_deref().unwrap_or(""),
        book.cover_or(placeholder_cover),
        if book.is_favorite { "yes" } else { "no" },
        book.id
    )
}

/// The catalog as the current state dictates
pub fn library(state: &LibraryState, placeholder_cover: &str) -> String {
    match state.view() {
        LibraryView::Loading => format!("{}\n", LOADING),
        LibraryView::EmptyCatalog => format!("{}\n", EMPTY_CATALOG),
        LibraryView::NoResults(term) => format!("{}\n", no_results(term)),
        LibraryView::Grid(books) => books
            .iter()
            .enumerate()
            .map(|(i, book)| card(i + 1, book, placeholder_cover))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
