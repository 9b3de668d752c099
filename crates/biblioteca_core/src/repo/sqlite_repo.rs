//! SQLite implementation of the book repository.
//!
//! # Responsibility
//! - Keep `books` SQL inside the core persistence boundary.
//! - Run every mutation inside one transaction.
//!
//! # Invariants
//! - The owned connection has the catalog schema applied before any query.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory, Schema};
use crate::model::book::{Book, BookId, NewBook};
use crate::repo::book_repo::{
    expect_row_id, BookRepository, MarkReadOutcome, StoreError, StoreKind, StoreResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    publication_year,
    genre,
    is_read
FROM books";

/// SQLite-backed book repository owning its connection.
pub struct SqliteBookRepository {
    conn: Connection,
}

impl SqliteBookRepository {
    /// Wraps a connection that already carries the catalog schema.
    ///
    /// # Errors
    /// - `InvalidData` when the connection was not migrated to the latest
    ///   catalog version or lacks the `books` table.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let actual = current_user_version(&conn)?;
        let expected = latest_version(Schema::Catalog);
        if actual != expected {
            return Err(StoreError::InvalidData(format!(
                "catalog schema version {actual}, expected {expected}"
            )));
        }

        let has_books: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'books'
            );",
            [],
            |row| row.get(0),
        )?;
        if !has_books {
            return Err(StoreError::InvalidData(
                "missing required table `books`".to_string(),
            ));
        }

        Ok(Self { conn })
    }

    /// Opens (or creates) the catalog database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path, Schema::Catalog)?)
    }

    /// Opens a fresh in-memory catalog.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory(Schema::Catalog)?)
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl BookRepository for SqliteBookRepository {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    fn create_book(&mut self, book: &NewBook) -> StoreResult<Book> {
        book.validate()?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO books (title, author, publication_year, genre, is_read)
             VALUES (?1, ?2, ?3, ?4, 0);",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.publication_year,
                book.genre.as_deref(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Book::from_new(BookId::Row(id), book))
    }

    fn list_books(&mut self) -> StoreResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn get_book(&mut self, id: &BookId) -> StoreResult<Option<Book>> {
        let row_id = expect_row_id(id)?;
        select_book(&self.conn, row_id)
    }

    fn mark_read(&mut self, id: &BookId) -> StoreResult<MarkReadOutcome> {
        let row_id = expect_row_id(id)?;
        let tx = self.conn.transaction()?;

        let Some(book) = select_book(&tx, row_id)? else {
            return Err(StoreError::NotFound(id.clone()));
        };
        if book.is_read {
            return Ok(MarkReadOutcome::AlreadyRead(book));
        }

        tx.execute(
            "UPDATE books SET is_read = 1 WHERE id = ?1 AND is_read = 0;",
            [row_id],
        )?;
        tx.commit()?;

        Ok(MarkReadOutcome::Marked(Book {
            is_read: true,
            ..book
        }))
    }

    fn delete_book(&mut self, id: &BookId) -> StoreResult<Book> {
        let row_id = expect_row_id(id)?;
        let tx = self.conn.transaction()?;

        let Some(book) = select_book(&tx, row_id)? else {
            return Err(StoreError::NotFound(id.clone()));
        };
        let changed = tx.execute("DELETE FROM books WHERE id = ?1;", [row_id])?;
        if changed != 1 {
            return Err(StoreError::InvalidData(format!(
                "delete of book {row_id} affected {changed} rows"
            )));
        }
        tx.commit()?;

        Ok(book)
    }
}

fn select_book(conn: &Connection, row_id: i64) -> StoreResult<Option<Book>> {
    let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
    let raw = stmt.query_row([row_id], read_raw_row).optional()?;
    raw.map(RawBookRow::into_book).transpose()
}

fn parse_book_row(row: &Row<'_>) -> StoreResult<Book> {
    read_raw_row(row)?.into_book()
}

struct RawBookRow {
    id: i64,
    title: String,
    author: String,
    publication_year: Option<i32>,
    genre: Option<String>,
    is_read: i64,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawBookRow> {
    Ok(RawBookRow {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        publication_year: row.get("publication_year")?,
        genre: row.get("genre")?,
        is_read: row.get("is_read")?,
    })
}

impl RawBookRow {
    fn into_book(self) -> StoreResult<Book> {
        let is_read = match self.is_read {
            0 => false,
            1 => true,
            other => {
                return Err(StoreError::InvalidData(format!(
                    "invalid is_read value `{other}` in books.is_read"
                )));
            }
        };

        Ok(Book {
            id: BookId::Row(self.id),
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            genre: self.genre,
            is_read,
        })
    }
}
