use bookstore_core::{global_store, init_global_store, Book, BookStore, StoreError};

// The process-wide store can only be initialized once per test binary, so
// the whole lifecycle lives in a single test.
#[test]
fn global_store_initializes_once_and_rejects_other_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    assert!(global_store().is_none());

    let store = init_global_store(&path).unwrap();
    let again = init_global_store(&path).unwrap();
    assert_eq!(store.path(), again.path());

    let other = dir.path().join("other.db");
    let err = init_global_store(&other).unwrap_err();
    assert!(matches!(err, StoreError::AlreadyOpen { .. }));

    let shared = global_store().expect("store should be active");
    let mut book = Book::new("Dune", "Frank Herbert");
    book.save(shared).unwrap();
    assert_eq!(shared.count().unwrap(), 1);
}
