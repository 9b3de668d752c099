//! MariaDB/MySQL implementation of the book repository.
//!
//! # Responsibility
//! - Map `books` rows to domain records through `sqlx::FromRow`.
//! - Expose the async driver through the blocking repository contract.
//!
//! # Invariants
//! - One connection is opened at startup and owned until drop.
//! - Every mutation runs in its own transaction; failures roll it back.

use crate::model::book::{Book, BookId, NewBook};
use crate::repo::book_repo::{
    expect_row_id, BookRepository, MarkReadOutcome, StoreError, StoreKind, StoreResult,
};
use crate::repo::build_runtime;
use log::info;
use sqlx::mysql::MySqlConnection;
use sqlx::{Connection, FromRow};
use tokio::runtime::Runtime;

const CREATE_BOOKS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS books (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    author VARCHAR(255) NOT NULL,
    publication_year INT NULL,
    genre VARCHAR(100) NULL,
    is_read BOOLEAN NOT NULL DEFAULT FALSE
)";

const BOOK_COLUMNS: &str = "id, title, author, publication_year, genre, is_read";

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    publication_year: Option<i32>,
    genre: Option<String>,
    is_read: bool,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: BookId::Row(row.id),
            title: row.title,
            author: row.author,
            publication_year: row.publication_year,
            genre: row.genre,
            is_read: row.is_read,
        }
    }
}

/// MySQL-backed book repository owning one connection and its runtime.
pub struct MySqlBookRepository {
    runtime: Runtime,
    conn: MySqlConnection,
}

impl MySqlBookRepository {
    /// Connects to `database_url` and creates the `books` table if absent.
    ///
    /// # Errors
    /// - `MySql` when the server is unreachable, credentials are rejected, or
    ///   the database does not exist.
    pub fn connect(database_url: &str) -> StoreResult<Self> {
        let runtime = build_runtime()?;
        let conn = runtime.block_on(connect_and_bootstrap(database_url))?;
        info!("event=store_connect module=repo status=ok store=mariadb");
        Ok(Self { runtime, conn })
    }
}

impl BookRepository for MySqlBookRepository {
    fn kind(&self) -> StoreKind {
        StoreKind::MariaDb
    }

    fn create_book(&mut self, book: &NewBook) -> StoreResult<Book> {
        book.validate()?;
        self.runtime.block_on(insert_book(&mut self.conn, book))
    }

    fn list_books(&mut self) -> StoreResult<Vec<Book>> {
        self.runtime.block_on(select_all(&mut self.conn))
    }

    fn get_book(&mut self, id: &BookId) -> StoreResult<Option<Book>> {
        let row_id = expect_row_id(id)?;
        self.runtime.block_on(select_one(&mut self.conn, row_id))
    }

    fn mark_read(&mut self, id: &BookId) -> StoreResult<MarkReadOutcome> {
        let row_id = expect_row_id(id)?;
        self.runtime.block_on(mark_read(&mut self.conn, row_id))
    }

    fn delete_book(&mut self, id: &BookId) -> StoreResult<Book> {
        let row_id = expect_row_id(id)?;
        self.runtime.block_on(delete_book(&mut self.conn, row_id))
    }
}

async fn connect_and_bootstrap(database_url: &str) -> StoreResult<MySqlConnection> {
    let mut conn = MySqlConnection::connect(database_url).await?;
    conn.ping().await?;
    sqlx::query(CREATE_BOOKS_TABLE_SQL)
        .execute(&mut conn)
        .await?;
    Ok(conn)
}

async fn insert_book(conn: &mut MySqlConnection, book: &NewBook) -> StoreResult<Book> {
    let mut tx = conn.begin().await?;
    let result = sqlx::query(
        "INSERT INTO books (title, author, publication_year, genre, is_read) \
         VALUES (?, ?, ?, ?, FALSE)",
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.publication_year)
    .bind(book.genre.as_deref())
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    let id = i64::try_from(result.last_insert_id()).map_err(|_| {
        StoreError::InvalidData(format!(
            "insert id {} does not fit books.id",
            result.last_insert_id()
        ))
    })?;
    Ok(Book::from_new(BookId::Row(id), book))
}

async fn select_all(conn: &mut MySqlConnection) -> StoreResult<Vec<Book>> {
    let query = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id DESC");
    let rows = sqlx::query_as::<_, BookRow>(&query)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

async fn select_one(conn: &mut MySqlConnection, id: i64) -> StoreResult<Option<Book>> {
    let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?");
    let row = sqlx::query_as::<_, BookRow>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Book::from))
}

async fn mark_read(conn: &mut MySqlConnection, id: i64) -> StoreResult<MarkReadOutcome> {
    let mut tx = conn.begin().await?;
    let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ? FOR UPDATE");
    let row = sqlx::query_as::<_, BookRow>(&query)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Err(StoreError::NotFound(BookId::Row(id)));
    };
    let book = Book::from(row);
    if book.is_read {
        tx.rollback().await?;
        return Ok(MarkReadOutcome::AlreadyRead(book));
    }

    sqlx::query("UPDATE books SET is_read = TRUE WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(MarkReadOutcome::Marked(Book {
        is_read: true,
        ..book
    }))
}

async fn delete_book(conn: &mut MySqlConnection, id: i64) -> StoreResult<Book> {
    let mut tx = conn.begin().await?;
    let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ? FOR UPDATE");
    let row = sqlx::query_as::<_, BookRow>(&query)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Err(StoreError::NotFound(BookId::Row(id)));
    };

    sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(Book::from(row))
}

#[cfg(test)]
mod tests {
    use super::BookRow;
    use crate::model::book::{Book, BookId};

    #[test]
    fn row_maps_to_domain_book() {
        let row = BookRow {
            id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            publication_year: Some(1965),
            genre: None,
            is_read: true,
        };

        let book = Book::from(row);
        assert_eq!(book.id, BookId::Row(7));
        assert_eq!(book.publication_year, Some(1965));
        assert!(book.is_read);
    }
}
