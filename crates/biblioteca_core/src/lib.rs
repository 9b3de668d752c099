//! Core of the library catalog tools.
//! Owns the book model, the per-store repositories, and the console loop
//! shared by every catalog binary.

pub mod config;
pub mod console;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod world;

pub use config::{AppConfig, ConfigError};
pub use console::{CatalogConsole, MenuChoice};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookValidationError, NewBook};
pub use repo::book_repo::{
    BookRepository, IdScheme, MarkReadOutcome, StoreError, StoreKind, StoreResult,
};
pub use repo::mongo_repo::MongoBookRepository;
pub use repo::mysql_repo::MySqlBookRepository;
pub use repo::sqlite_repo::SqliteBookRepository;
pub use service::catalog_service::{parse_publication_year, CatalogService, YearInput};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
