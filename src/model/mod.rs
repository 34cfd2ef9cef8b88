//! Domain model for the book catalog.
//!
//! # Responsibility
//! - Define the canonical book record used by all persistence operations.
//!
//! # Invariants
//! - A `Book` with `id = None` has never been persisted.
//! - Once assigned, an id is stable and names exactly one durable row.

pub mod book;
