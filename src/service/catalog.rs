//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for callers managing the book catalog.
//! - Delegate persistence to the store contract.
//!
//! # Invariants
//! - Service APIs never bypass the store's uniqueness or not-found checks.

use crate::model::book::{Book, BookId};
use crate::store::book_store::{BookStore, StoreError, StoreResult};

/// Use-case wrapper around a [`BookStore`] implementation.
pub struct CatalogService<S: BookStore> {
    store: S,
}

impl<S: BookStore> CatalogService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds an unread book and returns it with its assigned id.
    pub fn add_book(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> StoreResult<Book> {
        let mut book = Book::new(title, author);
        let id = self.store.add(&book)?;
        book.id = Some(id);
        Ok(book)
    }

    /// Sets the read flag of an existing book and returns the updated record.
    pub fn mark_read(&self, id: BookId, read: bool) -> StoreResult<Book> {
        let mut book = self
            .store
            .find_by_id(id)?
            .ok_or(StoreError::NotFound(id))?;
        book.read = read;
        self.store.update(&book)?;
        Ok(book)
    }

    /// Removes a book from the catalog.
    pub fn remove_book(&self, id: BookId) -> StoreResult<()> {
        self.store.delete(id)
    }

    /// Case-insensitive substring search over titles and authors.
    pub fn search(&self, term: &str) -> StoreResult<Vec<Book>> {
        self.store.search(term)
    }

    /// Returns the books already read.
    pub fn read_books(&self) -> StoreResult<Vec<Book>> {
        self.store.find_by_read_status(true)
    }

    /// Returns the books not yet read.
    pub fn unread_books(&self) -> StoreResult<Vec<Book>> {
        self.store.find_by_read_status(false)
    }

    /// Returns the whole catalog in insertion order.
    pub fn all_books(&self) -> StoreResult<Vec<Book>> {
        self.store.all_books()
    }

    /// Returns the catalog size.
    pub fn count(&self) -> StoreResult<u64> {
        self.store.count()
    }
}
