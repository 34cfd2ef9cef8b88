//! Persistence layer for the book catalog.
//!
//! # Responsibility
//! - Define the store contract and its SQLite implementation.
//! - Manage the process-wide store instance lifecycle.
//!
//! # Invariants
//! - The store is the sole reader/writer of durable catalog state.
//! - No two rows share a case-insensitively equal title+author pair.

pub mod book_store;
pub mod global;
