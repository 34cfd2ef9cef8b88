//! Process-wide store instance.
//!
//! # Responsibility
//! - Hold the single shared [`SqliteBookStore`] for callers that do not
//!   thread a store handle through explicitly.
//!
//! # Invariants
//! - Initialization happens at most once per process.
//! - Re-initialization with the same path is idempotent; a different path
//!   is rejected.

use crate::store::book_store::{SqliteBookStore, StoreError, StoreResult};
use once_cell::sync::OnceCell;
use std::path::Path;

static GLOBAL_STORE: OnceCell<SqliteBookStore> = OnceCell::new();

/// Initializes the process-wide store at the given database location.
///
/// The first successful call opens the store; later calls with the same path
/// return the existing instance. A call with a different path fails with
/// [`StoreError::AlreadyOpen`] instead of silently rebinding.
pub fn init_global_store(path: impl AsRef<Path>) -> StoreResult<&'static SqliteBookStore> {
    let requested = path.as_ref().to_path_buf();

    let store = GLOBAL_STORE.get_or_try_init(|| SqliteBookStore::open(&requested))?;

    if store.path() != requested {
        return Err(StoreError::AlreadyOpen {
            active: store.path().to_path_buf(),
            requested,
        });
    }

    Ok(store)
}

/// Returns the process-wide store, or `None` before initialization.
pub fn global_store() -> Option<&'static SqliteBookStore> {
    GLOBAL_STORE.get()
}
