//! Catalog use-case service.
//!
//! # Responsibility
//! - Resolve user-typed identifiers before mutating a book.
//! - Coerce optional console input (year, genre) into domain values.
//! - Emit one diagnostic event per use case.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - The service stays storage-agnostic.

use crate::model::book::{Book, NewBook};
use crate::repo::book_repo::{
    BookRepository, MarkReadOutcome, StoreError, StoreKind, StoreResult,
};
use log::{error, info, warn};

/// Interpretation of the optional year typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearInput {
    /// Nothing usable was typed; the year is stored as absent.
    Absent,
    Year(i32),
    /// Non-numeric input; stored as absent after a warning.
    Ignored(String),
}

impl YearInput {
    pub fn value(&self) -> Option<i32> {
        match self {
            Self::Year(year) => Some(*year),
            Self::Absent | Self::Ignored(_) => None,
        }
    }
}

/// Parses the optional publication year.
///
/// Digits only; `0` counts as absent.
pub fn parse_publication_year(raw: &str) -> YearInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return YearInput::Absent;
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return YearInput::Ignored(trimmed.to_string());
    }
    match trimmed.parse::<i32>() {
        Ok(0) => YearInput::Absent,
        Ok(year) => YearInput::Year(year),
        Err(_) => YearInput::Ignored(trimmed.to_string()),
    }
}

/// Use-case service over one catalog repository.
pub struct CatalogService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn kind(&self) -> StoreKind {
        self.repo.kind()
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Persists a new book and returns it with its assigned id.
    pub fn add_book(&mut self, book: &NewBook) -> StoreResult<Book> {
        let result = self.repo.create_book(book);
        match &result {
            Ok(created) => info!(
                "event=book_create module=service status=ok store={} id={}",
                self.kind().label(),
                created.id
            ),
            Err(err) => self.log_failure("book_create", err),
        }
        result
    }

    /// Lists all books, newest first.
    pub fn list_books(&mut self) -> StoreResult<Vec<Book>> {
        let result = self.repo.list_books();
        match &result {
            Ok(books) => info!(
                "event=book_list module=service status=ok store={} count={}",
                self.kind().label(),
                books.len()
            ),
            Err(err) => self.log_failure("book_list", err),
        }
        result
    }

    /// Resolves `input` to a book and marks it read.
    pub fn mark_read(&mut self, input: &str) -> StoreResult<MarkReadOutcome> {
        let result = self
            .repo
            .resolve_id(input)
            .and_then(|id| self.repo.mark_read(&id));
        match &result {
            Ok(MarkReadOutcome::Marked(book)) => info!(
                "event=book_mark_read module=service status=ok store={} id={}",
                self.kind().label(),
                book.id
            ),
            Ok(MarkReadOutcome::AlreadyRead(book)) => warn!(
                "event=book_mark_read module=service status=noop store={} id={} reason=already_read",
                self.kind().label(),
                book.id
            ),
            Err(err) => self.log_failure("book_mark_read", err),
        }
        result
    }

    /// Resolves `input` to a book and deletes it.
    pub fn delete_book(&mut self, input: &str) -> StoreResult<Book> {
        let result = self
            .repo
            .resolve_id(input)
            .and_then(|id| self.repo.delete_book(&id));
        match &result {
            Ok(book) => info!(
                "event=book_delete module=service status=ok store={} id={}",
                self.kind().label(),
                book.id
            ),
            Err(err) => self.log_failure("book_delete", err),
        }
        result
    }

    fn log_failure(&self, event: &str, err: &StoreError) {
        let store = self.kind().label();
        match err {
            StoreError::Validation(_) | StoreError::InvalidId(_) => warn!(
                "event={event} module=service status=rejected store={store} error={err}"
            ),
            err if err.is_lookup_miss() => warn!(
                "event={event} module=service status=not_found store={store} error={err}"
            ),
            _ => error!("event={event} module=service status=error store={store} error={err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_publication_year, YearInput};

    #[test]
    fn blank_and_zero_years_are_absent() {
        assert_eq!(parse_publication_year(""), YearInput::Absent);
        assert_eq!(parse_publication_year("   "), YearInput::Absent);
        assert_eq!(parse_publication_year("0"), YearInput::Absent);
    }

    #[test]
    fn digit_years_are_kept() {
        assert_eq!(parse_publication_year(" 1965 "), YearInput::Year(1965));
        assert_eq!(parse_publication_year("1965").value(), Some(1965));
    }

    #[test]
    fn non_numeric_years_are_ignored() {
        assert_eq!(
            parse_publication_year("nineteen"),
            YearInput::Ignored("nineteen".to_string())
        );
        assert_eq!(
            parse_publication_year("-5"),
            YearInput::Ignored("-5".to_string())
        );
        assert_eq!(parse_publication_year("99999999999").value(), None);
    }
}
