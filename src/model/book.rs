//! Book domain record.
//!
//! # Responsibility
//! - Represent one book (title, author, read status) in memory.
//! - Carry the optional durable identity assigned on first save.
//!
//! # Invariants
//! - `id` is `None` until the book is first persisted.
//! - Once assigned, `id` is stable and never reused for another book.

use crate::store::book_store::{BookStore, StoreResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Durable identity of a persisted book.
///
/// This is the SQLite rowid of the backing row. Kept as a type alias to make
/// semantic intent explicit in signatures.
pub type BookId = i64;

/// One book in the catalog.
///
/// Equality and hashing are structural over all four fields. Because `id`
/// changes from `None` to `Some` on first save, the hash of an unsaved book
/// differs from the hash of the same book after saving: do not put an unsaved
/// `Book` in a hash-based set and then save it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    /// Assigned by the store on first save; `None` for unsaved books.
    pub id: Option<BookId>,
    /// Compared case-insensitively for duplicate checks. May be empty.
    pub title: String,
    /// Same case rule as `title`.
    pub author: String,
    /// Whether the owner has read this book.
    pub read: bool,
}

impl Book {
    /// Creates an unsaved, unread book.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            read: false,
        }
    }

    /// Creates a book with a known durable identity.
    ///
    /// Used when hydrating rows from the store; callers should not invent ids.
    pub fn with_id(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            author: author.into(),
            read,
        }
    }

    /// Returns whether this book has been persisted.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Persists this book through the given store.
    ///
    /// Inserts and adopts the freshly assigned id when the book is unsaved;
    /// overwrites the existing row otherwise. Store errors propagate
    /// unchanged, and on an insert failure `id` stays `None`.
    pub fn save(&mut self, store: &dyn BookStore) -> StoreResult<()> {
        match self.id {
            Some(_) => store.update(self),
            None => {
                let id = store.add(self)?;
                self.id = Some(id);
                Ok(())
            }
        }
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let read_phrase = if self.read { "have" } else { "have not" };
        match self.id {
            Some(id) => write!(
                f,
                "ID {id}, Title: {}, Author: {}. You {read_phrase} read this book.",
                self.title, self.author
            ),
            None => write!(
                f,
                "ID unsaved, Title: {}, Author: {}. You {read_phrase} read this book.",
                self.title, self.author
            ),
        }
    }
}
