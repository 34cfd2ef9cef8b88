use bookstore_core::{CatalogService, SqliteBookStore, StoreError};
use tempfile::TempDir;

#[test]
fn add_book_returns_saved_record() {
    let (_dir, catalog) = temp_catalog();

    let book = catalog.add_book("Dune", "Frank Herbert").unwrap();
    assert!(book.id.is_some());
    assert!(!book.read);
    assert_eq!(catalog.count().unwrap(), 1);
}

#[test]
fn mark_read_flips_the_flag_and_returns_the_record() {
    let (_dir, catalog) = temp_catalog();

    let book = catalog.add_book("Dune", "Frank Herbert").unwrap();
    let id = book.id.unwrap();

    let read = catalog.mark_read(id, true).unwrap();
    assert!(read.read);

    let read_titles: Vec<String> = catalog
        .read_books()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(read_titles, ["Dune"]);
    assert!(catalog.unread_books().unwrap().is_empty());

    let unread_again = catalog.mark_read(id, false).unwrap();
    assert!(!unread_again.read);
    assert!(catalog.read_books().unwrap().is_empty());
}

#[test]
fn mark_read_on_missing_book_returns_not_found() {
    let (_dir, catalog) = temp_catalog();

    let err = catalog.mark_read(99, true).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(99)));
}

#[test]
fn remove_book_then_search_no_longer_finds_it() {
    let (_dir, catalog) = temp_catalog();

    let book = catalog.add_book("Harry Potter", "JK Rowling").unwrap();
    catalog.add_book("Emma", "Jane Austen").unwrap();

    catalog.remove_book(book.id.unwrap()).unwrap();

    assert!(catalog.search("rowling").unwrap().is_empty());
    assert_eq!(catalog.all_books().unwrap().len(), 1);
}

fn temp_catalog() -> (TempDir, CatalogService<SqliteBookStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteBookStore::open(dir.path().join("books.db")).unwrap();
    (dir, CatalogService::new(store))
}
