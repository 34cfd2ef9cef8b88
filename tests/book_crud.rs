use bookstore_core::{Book, BookStore, SqliteBookStore, StoreError};
use tempfile::TempDir;

#[test]
fn add_and_find_by_id_roundtrip() {
    let (_dir, store) = temp_store();

    let book = Book::new("Dune", "Frank Herbert");
    let id = store.add(&book).unwrap();

    let loaded = store.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.title, "Dune");
    assert_eq!(loaded.author, "Frank Herbert");
    assert!(!loaded.read);
}

#[test]
fn add_rejects_case_insensitive_duplicate() {
    let (_dir, store) = temp_store();

    store.add(&Book::new("Dune", "Frank Herbert")).unwrap();

    let err = store.add(&Book::new("DUNE", "frank herbert")).unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { .. }));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn exact_match_ignores_case_and_read_status() {
    let (_dir, store) = temp_store();

    let mut read_copy = Book::new("Dune", "Frank Herbert");
    read_copy.read = true;
    store.add(&read_copy).unwrap();

    let probe = Book::new("dune", "FRANK HERBERT");
    assert!(store.exact_match(&probe).unwrap());
    assert!(!store.exact_match(&Book::new("Dune", "Someone Else")).unwrap());
}

#[test]
fn update_changes_exactly_one_row() {
    let (_dir, store) = temp_store();

    let first = store.add(&Book::new("Dune", "Frank Herbert")).unwrap();
    let second = store.add(&Book::new("Emma", "Jane Austen")).unwrap();

    let updated = Book::with_id(first, "Dune Messiah", "Frank Herbert", true);
    store.update(&updated).unwrap();

    assert_eq!(store.count().unwrap(), 2);
    assert_eq!(store.find_by_id(first).unwrap().unwrap(), updated);

    let untouched = store.find_by_id(second).unwrap().unwrap();
    assert_eq!(untouched.title, "Emma");
    assert!(!untouched.read);
}

#[test]
fn update_missing_row_returns_not_found() {
    let (_dir, store) = temp_store();

    let ghost = Book::with_id(42, "Dune", "Frank Herbert", false);
    let err = store.update(&ghost).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(42)));
}

#[test]
fn update_unsaved_book_returns_missing_id() {
    let (_dir, store) = temp_store();

    let err = store.update(&Book::new("Dune", "Frank Herbert")).unwrap_err();
    assert!(matches!(err, StoreError::MissingId));
}

#[test]
fn update_rejects_collision_with_another_row() {
    let (_dir, store) = temp_store();

    store.add(&Book::new("Dune", "Frank Herbert")).unwrap();
    let id = store.add(&Book::new("Emma", "Jane Austen")).unwrap();

    let collision = Book::with_id(id, "dune", "FRANK HERBERT", false);
    let err = store.update(&collision).unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { .. }));

    // The rejected update left the row untouched.
    assert_eq!(store.find_by_id(id).unwrap().unwrap().title, "Emma");
}

#[test]
fn update_with_unchanged_fields_does_not_collide_with_itself() {
    let (_dir, store) = temp_store();

    let mut book = Book::new("Dune", "Frank Herbert");
    book.save(&store).unwrap();

    book.read = true;
    store.update(&book).unwrap();

    let loaded = store.find_by_id(book.id.unwrap()).unwrap().unwrap();
    assert!(loaded.read);
}

#[test]
fn delete_removes_the_row() {
    let (_dir, store) = temp_store();

    let id = store.add(&Book::new("Dune", "Frank Herbert")).unwrap();
    store.delete(id).unwrap();

    assert!(store.find_by_id(id).unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn delete_missing_row_fails_and_leaves_count_unchanged() {
    let (_dir, store) = temp_store();

    let id = store.add(&Book::new("Dune", "Frank Herbert")).unwrap();

    let err = store.delete(id + 1).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.count().unwrap(), 1);

    // A second delete of an already-removed id fails the same way.
    store.delete(id).unwrap();
    let err = store.delete(id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn delete_all_empties_the_table_and_is_safe_on_empty() {
    let (_dir, store) = temp_store();

    store.delete_all().unwrap();
    assert_eq!(store.count().unwrap(), 0);

    store.add(&Book::new("Dune", "Frank Herbert")).unwrap();
    store.add(&Book::new("Emma", "Jane Austen")).unwrap();

    store.delete_all().unwrap();
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.all_books().unwrap().is_empty());
}

#[test]
fn freed_duplicate_pair_can_be_added_again() {
    let (_dir, store) = temp_store();

    let id = store.add(&Book::new("Dune", "Frank Herbert")).unwrap();
    store.delete(id).unwrap();

    store.add(&Book::new("Dune", "Frank Herbert")).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

fn temp_store() -> (TempDir, SqliteBookStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteBookStore::open(dir.path().join("books.db")).unwrap();
    (dir, store)
}
