//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog record and its creation request.
//! - Validate creation-time invariants before any store is touched.
//!
//! # Invariants
//! - `title` and `author` are non-empty after trimming.
//! - `publication_year`, when present, is a positive year.
//! - `is_read` starts as `false` for every new book.

use std::fmt::{Display, Formatter};

/// Number of trailing id characters shown for document-store ids.
pub const SHORT_ID_CHARS: usize = 5;

/// Store-assigned identifier of a book.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookId {
    /// Auto-increment row id of a relational store.
    Row(i64),
    /// 24-hex-digit object id of a document store.
    Object(String),
}

impl BookId {
    /// Returns the form shown in list tables.
    ///
    /// Row ids are shown whole; object ids only by their last characters.
    pub fn short(&self) -> String {
        match self {
            Self::Row(id) => id.to_string(),
            Self::Object(hex) => {
                let skip = hex.chars().count().saturating_sub(SHORT_ID_CHARS);
                hex.chars().skip(skip).collect()
            }
        }
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row(id) => write!(f, "{id}"),
            Self::Object(hex) => f.write_str(hex),
        }
    }
}

/// Creation-time validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookValidationError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("author cannot be empty")]
    EmptyAuthor,
    #[error("publication year must be positive, got {0}")]
    InvalidYear(i32),
}

/// Request to create one book. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
    pub genre: Option<String>,
}

impl NewBook {
    /// Creates a request with trimmed title/author and no optional fields.
    pub fn new(title: impl AsRef<str>, author: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            author: author.as_ref().trim().to_string(),
            publication_year: None,
            genre: None,
        }
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.publication_year = year;
        self
    }

    /// Sets the genre; blank input is stored as absent.
    pub fn with_genre(mut self, genre: Option<&str>) -> Self {
        self.genre = genre
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        self
    }

    /// Checks creation-time invariants.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyAuthor` when a required field is blank.
    /// - `InvalidYear` when the year is zero or negative.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        if let Some(year) = self.publication_year {
            if year <= 0 {
                return Err(BookValidationError::InvalidYear(year));
            }
        }
        Ok(())
    }
}

/// Persisted catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
    pub genre: Option<String>,
    pub is_read: bool,
}

impl Book {
    /// Builds the record a store returns right after inserting `new`.
    pub fn from_new(id: BookId, new: &NewBook) -> Self {
        Self {
            id,
            title: new.title.clone(),
            author: new.author.clone(),
            publication_year: new.publication_year,
            genre: new.genre.clone(),
            is_read: false,
        }
    }
}
