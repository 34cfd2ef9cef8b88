//! Book store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and search APIs over the canonical `books` table.
//! - Enforce the case-insensitive title+author uniqueness rule.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every mutation that expected to touch exactly one row and touched zero
//!   surfaces an error; reads return empty results instead.
//! - Each operation opens, uses and drops its own connection; no durable
//!   state is cached between calls.

use crate::db::{open_db, DbError};
use crate::model::book::{Book, BookId};
use log::{info, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BOOK_SELECT_SQL: &str = "SELECT rowid, title, author, read FROM books";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for book persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    /// A row with case-insensitively equal title and author already exists.
    Duplicate { title: String, author: String },
    /// The id names no durable row.
    NotFound(BookId),
    /// An update was requested for a book that has never been saved.
    MissingId,
    /// The process-wide store is already bound to a different location.
    AlreadyOpen { active: PathBuf, requested: PathBuf },
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate { title, author } => {
                write!(f, "`{title}` by `{author}` is already in the store")
            }
            Self::NotFound(id) => write!(f, "book not found: id {id}"),
            Self::MissingId => write!(f, "book has no id; it has never been saved"),
            Self::AlreadyOpen { active, requested } => write!(
                f,
                "store already open at `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for book CRUD and search operations.
pub trait BookStore {
    /// Inserts a new row and returns the freshly assigned id.
    ///
    /// Fails with [`StoreError::Duplicate`] when a case-insensitive
    /// title+author match already exists; nothing is inserted in that case.
    fn add(&self, book: &Book) -> StoreResult<BookId>;

    /// Overwrites the row named by `book.id` with the book's current fields.
    ///
    /// Fails with [`StoreError::MissingId`] for an unsaved book,
    /// [`StoreError::NotFound`] when the id names no row, and
    /// [`StoreError::Duplicate`] when the new title+author would collide
    /// with a different row.
    fn update(&self, book: &Book) -> StoreResult<()>;

    /// Removes the row with the given id.
    fn delete(&self, id: BookId) -> StoreResult<()>;

    /// Removes every row. A no-op on an empty table.
    fn delete_all(&self) -> StoreResult<()>;

    /// Returns whether some row matches the book's title and author
    /// case-insensitively. Read status is ignored.
    fn exact_match(&self, book: &Book) -> StoreResult<bool>;

    /// Returns the book with the given id, or `None` if absent.
    fn find_by_id(&self, id: BookId) -> StoreResult<Option<Book>>;

    /// Returns all books whose title or author contains `term` as a
    /// case-insensitive substring. An empty term matches every row.
    fn search(&self, term: &str) -> StoreResult<Vec<Book>>;

    /// Returns all books with the given read status, in insertion order.
    fn find_by_read_status(&self, read: bool) -> StoreResult<Vec<Book>>;

    /// Returns every book in insertion order.
    fn all_books(&self) -> StoreResult<Vec<Book>>;

    /// Returns the number of books in the store.
    fn count(&self) -> StoreResult<u64>;
}

/// SQLite-backed book store.
///
/// Holds only the database location. Every operation acquires its own scoped
/// connection so that each call is transactionally self-contained and the
/// handle is released on every exit path.
#[derive(Debug)]
pub struct SqliteBookStore {
    path: PathBuf,
}

impl SqliteBookStore {
    /// Opens the store at `path`, creating the database and its table when
    /// missing. Safe to call for an already-initialized database.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        open_db(&path)?;
        info!(
            "event=store_open module=store status=ok path={}",
            path.display()
        );
        Ok(Self { path })
    }

    /// Returns the database location this store is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> StoreResult<Connection> {
        Ok(open_db(&self.path)?)
    }
}

impl BookStore for SqliteBookStore {
    fn add(&self, book: &Book) -> StoreResult<BookId> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;

        if duplicate_exists(&tx, book, None)? {
            warn!(
                "event=book_add module=store status=rejected reason=duplicate id={:?}",
                book.id
            );
            return Err(StoreError::Duplicate {
                title: book.title.clone(),
                author: book.author.clone(),
            });
        }

        tx.execute(
            "INSERT INTO books (title, author, read) VALUES (?1, ?2, ?3);",
            params![book.title, book.author, bool_to_int(book.read)],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn update(&self, book: &Book) -> StoreResult<()> {
        let id = book.id.ok_or(StoreError::MissingId)?;

        let mut conn = self.connection()?;
        let tx = conn.transaction()?;

        // The insert-time uniqueness rule holds across updates as well; the
        // book's own row is excluded so re-saving unchanged fields succeeds.
        if duplicate_exists(&tx, book, Some(id))? {
            return Err(StoreError::Duplicate {
                title: book.title.clone(),
                author: book.author.clone(),
            });
        }

        let changed = tx.execute(
            "UPDATE books SET title = ?1, author = ?2, read = ?3 WHERE rowid = ?4;",
            params![book.title, book.author, bool_to_int(book.read), id],
        )?;
        tx.commit()?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: BookId) -> StoreResult<()> {
        let conn = self.connection()?;
        let removed = conn.execute("DELETE FROM books WHERE rowid = ?1;", [id])?;

        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete_all(&self) -> StoreResult<()> {
        let conn = self.connection()?;
        let removed = conn.execute("DELETE FROM books;", [])?;
        info!("event=delete_all module=store status=ok removed={removed}");
        Ok(())
    }

    fn exact_match(&self, book: &Book) -> StoreResult<bool> {
        let conn = self.connection()?;
        duplicate_exists(&conn, book, None)
    }

    fn find_by_id(&self, id: BookId) -> StoreResult<Option<Book>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} WHERE rowid = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn search(&self, term: &str) -> StoreResult<Vec<Book>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             WHERE UPPER(title) LIKE UPPER(?1) ESCAPE '\\'
                OR UPPER(author) LIKE UPPER(?1) ESCAPE '\\'
             ORDER BY rowid;"
        ))?;

        let pattern = format!("%{}%", escape_like(term));
        let rows = stmt.query([pattern])?;
        collect_books(rows)
    }

    fn find_by_read_status(&self, read: bool) -> StoreResult<Vec<Book>> {
        let conn = self.connection()?;
        let mut stmt =
            conn.prepare(&format!("{BOOK_SELECT_SQL} WHERE read = ?1 ORDER BY rowid;"))?;

        let rows = stmt.query([bool_to_int(read)])?;
        collect_books(rows)
    }

    fn all_books(&self) -> StoreResult<Vec<Book>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} ORDER BY rowid;"))?;

        let rows = stmt.query([])?;
        collect_books(rows)
    }

    fn count(&self) -> StoreResult<u64> {
        let conn = self.connection()?;
        let total = conn.query_row("SELECT COUNT(*) FROM books;", [], |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(total as u64)
    }
}

/// Case-insensitive title+author membership test, optionally excluding one
/// row so a book never collides with itself.
fn duplicate_exists(
    conn: &Connection,
    book: &Book,
    exclude: Option<BookId>,
) -> StoreResult<bool> {
    let found = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM books
            WHERE UPPER(title) = UPPER(?1)
              AND UPPER(author) = UPPER(?2)
              AND (?3 IS NULL OR rowid <> ?3)
        );",
        params![book.title, book.author, exclude],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(found)
}

fn collect_books(mut rows: rusqlite::Rows<'_>) -> StoreResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> StoreResult<Book> {
    let id: BookId = row.get("rowid")?;

    let read = match row.get::<_, i64>("read")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid read value `{other}` in books.read"
            )));
        }
    };

    Ok(Book::with_id(
        id,
        row.get::<_, String>("title")?,
        row.get::<_, String>("author")?,
        read,
    ))
}

/// Escapes LIKE metacharacters so a search term means plain "contains".
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
