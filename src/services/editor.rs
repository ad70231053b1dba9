//! Edit draft of a single book

use crate::models::{Book, BookFields};

/// Local copy of a book's editable fields, seeded from the book when editing starts
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Book,
    draft: BookFields,
}

impl EditSession {
    pub fn open(book: &Book) -> Self {
        Self {
            original: book.clone(),
            draft: book.fields(),
        }
    }

    pub fn id(&self) -> &str {
        &self.original.id
    }

    pub fn original(&self) -> &Book {
        &self.original
    }

    pub fn draft(&self) -> &BookFields {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookFields {
        &mut self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original.fields()
    }

    /// Discard the draft, going back to the original book's fields
    pub fn cancel(&mut self) {
        self.draft = self.original.fields();
    }
}
