//! Book repository contract, errors and operation outcomes.
//!
//! # Responsibility
//! - Provide one CRUD surface over the catalog for every store kind.
//! - Describe how user-typed identifiers are resolved per store.
//!
//! # Invariants
//! - `mark_read` never writes when the book is already read.
//! - `delete_book` removes at most one record.

use crate::db::DbError;
use crate::model::book::{Book, BookId, BookValidationError, NewBook};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for catalog persistence and lookup operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] BookValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("mysql: {0}")]
    MySql(#[from] sqlx::Error),
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("no book found with ID {0}")]
    NotFound(BookId),
    #[error("no book ID ends in `{0}`")]
    NoSuffixMatch(String),
    #[error("`{0}` is not a valid book ID")]
    InvalidId(String),
    #[error("{matches} book IDs end in `{suffix}`; enter more characters")]
    AmbiguousId { suffix: String, matches: usize },
    #[error("invalid persisted book data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl StoreError {
    /// Returns whether the error comes from user input or a missing record
    /// rather than from the store itself.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::NoSuffixMatch(_) | Self::AmbiguousId { .. }
        )
    }
}

/// Backing technology of a catalog repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    MariaDb,
    MongoDb,
}

/// How users type book identifiers for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScheme {
    /// Whole integer row id.
    Serial,
    /// Trailing hex characters of an object id.
    ObjectSuffix,
}

impl StoreKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sqlite => "SQLite",
            Self::MariaDb => "MariaDB",
            Self::MongoDb => "MongoDB",
        }
    }

    pub fn id_scheme(self) -> IdScheme {
        match self {
            Self::Sqlite | Self::MariaDb => IdScheme::Serial,
            Self::MongoDb => IdScheme::ObjectSuffix,
        }
    }
}

/// Result of a mark-read request on an existing book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkReadOutcome {
    /// The flag was flipped and persisted. Carries the updated book.
    Marked(Book),
    /// The book was already read; nothing was written.
    AlreadyRead(Book),
}

/// Repository interface for catalog operations.
pub trait BookRepository {
    fn kind(&self) -> StoreKind;
    fn create_book(&mut self, book: &NewBook) -> StoreResult<Book>;
    /// Lists every book, newest first.
    fn list_books(&mut self) -> StoreResult<Vec<Book>>;
    fn get_book(&mut self, id: &BookId) -> StoreResult<Option<Book>>;
    fn mark_read(&mut self, id: &BookId) -> StoreResult<MarkReadOutcome>;
    /// Deletes one book and returns it as it was before removal.
    fn delete_book(&mut self, id: &BookId) -> StoreResult<Book>;

    /// Turns user input into an id of this store.
    ///
    /// The default accepts whole integer row ids.
    fn resolve_id(&mut self, input: &str) -> StoreResult<BookId> {
        parse_row_id(input)
    }
}

/// Parses a whole integer row id, surrounding whitespace ignored.
pub fn parse_row_id(input: &str) -> StoreResult<BookId> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map(BookId::Row)
        .map_err(|_| StoreError::InvalidId(trimmed.to_string()))
}

pub(crate) fn expect_row_id(id: &BookId) -> StoreResult<i64> {
    match id {
        BookId::Row(value) => Ok(*value),
        BookId::Object(hex) => Err(StoreError::InvalidId(hex.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_row_id, IdScheme, StoreError, StoreKind};
    use crate::model::book::BookId;

    #[test]
    fn row_id_parses_trimmed_integers() {
        assert_eq!(parse_row_id(" 12 ").unwrap(), BookId::Row(12));
    }

    #[test]
    fn row_id_rejects_non_numeric_input() {
        let err = parse_row_id("twelve").unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(ref value) if value == "twelve"));
        assert!(!err.is_lookup_miss());
    }

    #[test]
    fn only_document_store_uses_suffix_ids() {
        assert_eq!(StoreKind::Sqlite.id_scheme(), IdScheme::Serial);
        assert_eq!(StoreKind::MariaDb.id_scheme(), IdScheme::Serial);
        assert_eq!(StoreKind::MongoDb.id_scheme(), IdScheme::ObjectSuffix);
    }
}
