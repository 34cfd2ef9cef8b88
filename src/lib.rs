//! Persistence core for a personal book catalog.
//! This crate is the single source of truth for catalog consistency rules:
//! duplicate prevention, identity assignment, and case-insensitive matching.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId};
pub use service::catalog::CatalogService;
pub use store::book_store::{BookStore, SqliteBookStore, StoreError, StoreResult};
pub use store::global::{global_store, init_global_store};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
