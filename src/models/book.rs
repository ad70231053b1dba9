//! Book (catalog record) model and request payloads.
//!
//! Field names follow the remote catalog's camelCase JSON. The remote service
//! owns `id`; nothing in this crate assigns or changes it.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Book record as returned by the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Book {
    /// Cover URL, or `placeholder` when the book has none
    pub fn cover_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.cover_image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => placeholder,
        }
    }

    /// Case-insensitive title match; an empty needle matches every book
    pub fn title_matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Complete editable field set of this record
    pub fn fields(&self) -> BookFields {
        BookFields::from(self)
    }
}

/// Create book request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Always sent, possibly empty
    pub cover_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Update book request.
///
/// Always the full editable set: the remote record is replaced as a whole, so
/// any field not carried here is lost on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookFields {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl BookFields {
    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

impl From<&Book> for BookFields {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            cover_image: book.cover_image.clone(),
            is_favorite: book.is_favorite,
        }
    }
}
